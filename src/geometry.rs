//! Geometry primitives for laying out images on a screen
//!
//! Positions and sizes are plain `Copy` values. All scaling helpers round
//! half-up (`floor(x + 0.5)`) so results are stable across runs.
//!
//! ## Module Structure
//! - `types.rs`: Size, Pos
//! - `pure.rs`: Scaling and offset computation

mod pure;
mod types;

pub use pure::{
    add_pos, aspect_ratio, centering_offset, scale_factor, scale_to_fit, scale_to_height,
    scale_to_width,
};
pub use types::{Pos, Size};
