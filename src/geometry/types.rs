//! Geometry value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A size, in pixels.
///
/// Serialized as a `[w, h]` pair so pipeline definitions can write `[1920, 1080]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl From<[u32; 2]> for Size {
    fn from([w, h]: [u32; 2]) -> Self {
        Self { w, h }
    }
}

impl From<Size> for [u32; 2] {
    fn from(size: Size) -> Self {
        [size.w, size.h]
    }
}

/// Formats as ImageMagick geometry, e.g. `1920x1080`
impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A position, in pixels, with (0, 0) at the top left,
/// x increasing to the right and y increasing down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Vector addition, or None if either coordinate leaves the `i32` range
    pub fn checked_add(self, other: Pos) -> Option<Pos> {
        Some(Pos::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
        ))
    }
}

impl From<[i32; 2]> for Pos {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Pos> for [i32; 2] {
    fn from(pos: Pos) -> Self {
        [pos.x, pos.y]
    }
}


/// Formats as an ImageMagick offset, e.g. `+860+490` or `-10+0`
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}{:+}", self.x, self.y)
    }
}
