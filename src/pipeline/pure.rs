//! Input validation for pipeline operations (no I/O)

use crate::error::{Error, Result};
use crate::geometry::{Pos, Size};
use crate::store::Image;

/// Largest image an operation may produce, 16384x16384
pub const MAX_PIXELS: u64 = 1 << 28;

/// Reject target sizes with a zero dimension or more than [`MAX_PIXELS`]
pub fn check_size(operation: &'static str, size: Size) -> Result<()> {
    if size.is_empty() || size.w as u64 * size.h as u64 > MAX_PIXELS {
        return Err(Error::InvalidSize { operation, size });
    }
    Ok(())
}

/// Reject crop rectangles that reach outside the image on either axis
pub fn check_crop_bounds(image: &Image, offset: Pos, size: Size) -> Result<()> {
    let bounds = image.size();
    let fits = |start: i32, len: u32, limit: u32| -> bool {
        start >= 0 && start as u64 + len as u64 <= limit as u64
    };

    if fits(offset.x, size.w, bounds.w) && fits(offset.y, size.h, bounds.h) {
        Ok(())
    } else {
        Err(Error::OutOfBounds {
            path: image.path().to_path_buf(),
            offset,
            size,
            bounds,
        })
    }
}
