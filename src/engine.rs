//! Image engine abstraction
//!
//! The pixel work behind every pipeline operation is delegated to an engine.
//! Each call reads its input file(s) and writes exactly one output file; the
//! output format follows the output path's extension.
//!
//! ## Backends
//! - **Magick**: the ImageMagick command line (`magick`, or legacy `convert`)
//! - **Native**: in-process, built on the `image` crate

mod magick;
mod native;

pub use magick::MagickEngine;
pub use native::NativeEngine;

use crate::config::EnginePreference;
use crate::error::Result;
use crate::geometry::{Pos, Size};
use std::path::Path;

/// Operations an image engine provides
pub trait ImageEngine {
    /// Human-readable name for this engine
    fn name(&self) -> &'static str;

    /// Solid-color canvas
    fn blank(&self, color: &str, size: Size, out: &Path) -> Result<()>;

    /// Sub-rectangle of `input`. Callers check bounds beforehand.
    fn crop(&self, input: &Path, offset: Pos, size: Size, out: &Path) -> Result<()>;

    /// Resample to exactly `size`
    fn resize(&self, input: &Path, size: Size, out: &Path) -> Result<()>;

    /// Composite `overlay` onto `base` at `offset`, clipping at the base's edges
    fn place(&self, overlay: &Path, offset: Pos, base: &Path, out: &Path) -> Result<()>;

    /// Re-encode `input` in the format implied by `out`'s extension
    fn convert(&self, input: &Path, out: &Path) -> Result<()>;
}

/// Enum wrapper for dispatch over the available engines
pub enum EngineBackend {
    Magick(MagickEngine),
    Native(NativeEngine),
}

impl EngineBackend {
    /// Prefer ImageMagick, fall back to the in-process engine
    pub fn detect() -> Self {
        match MagickEngine::detect() {
            Some(magick) => {
                tracing::info!("engine - using {}", magick.name());
                Self::Magick(magick)
            }
            None => {
                tracing::warn!("engine - ImageMagick not found, using the native engine");
                Self::Native(NativeEngine::new())
            }
        }
    }

    pub fn from_preference(preference: EnginePreference) -> Self {
        match preference {
            EnginePreference::Auto => Self::detect(),
            EnginePreference::Magick => match MagickEngine::detect() {
                Some(magick) => Self::Magick(magick),
                None => {
                    // Keep the choice; the first operation reports the missing tool
                    tracing::warn!("engine - ImageMagick requested but not found on PATH");
                    Self::Magick(MagickEngine::new(false))
                }
            },
            EnginePreference::Native => Self::Native(NativeEngine::new()),
        }
    }
}

impl ImageEngine for EngineBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Magick(e) => e.name(),
            Self::Native(e) => e.name(),
        }
    }

    fn blank(&self, color: &str, size: Size, out: &Path) -> Result<()> {
        match self {
            Self::Magick(e) => e.blank(color, size, out),
            Self::Native(e) => e.blank(color, size, out),
        }
    }

    fn crop(&self, input: &Path, offset: Pos, size: Size, out: &Path) -> Result<()> {
        match self {
            Self::Magick(e) => e.crop(input, offset, size, out),
            Self::Native(e) => e.crop(input, offset, size, out),
        }
    }

    fn resize(&self, input: &Path, size: Size, out: &Path) -> Result<()> {
        match self {
            Self::Magick(e) => e.resize(input, size, out),
            Self::Native(e) => e.resize(input, size, out),
        }
    }

    fn place(&self, overlay: &Path, offset: Pos, base: &Path, out: &Path) -> Result<()> {
        match self {
            Self::Magick(e) => e.place(overlay, offset, base, out),
            Self::Native(e) => e.place(overlay, offset, base, out),
        }
    }

    fn convert(&self, input: &Path, out: &Path) -> Result<()> {
        match self {
            Self::Magick(e) => e.convert(input, out),
            Self::Native(e) => e.convert(input, out),
        }
    }
}
