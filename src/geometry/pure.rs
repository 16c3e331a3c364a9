//! Scaling and placement math
//!
//! Pure functions, no side effects. Every conversion from a fractional
//! result back to pixels goes through [`round_half_up`].

use super::types::{Pos, Size};

/// `floor(x + 0.5)`, saturating at zero
fn round_half_up(value: f64) -> u32 {
    let rounded = (value + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Vector addition on Pos; None on `i32` overflow.
pub fn add_pos(a: Pos, b: Pos) -> Option<Pos> {
    a.checked_add(b)
}

/// Width over height. Zero-height sizes have an infinite aspect ratio.
pub fn aspect_ratio(size: Size) -> f64 {
    size.w as f64 / size.h as f64
}

/// Multiply both dimensions by `factor`.
pub fn scale_factor(size: Size, factor: f64) -> Size {
    Size::new(
        round_half_up(size.w as f64 * factor),
        round_half_up(size.h as f64 * factor),
    )
}

/// Size with the given width and the aspect ratio of `size`.
pub fn scale_to_width(size: Size, width: u32) -> Size {
    if size.w == 0 {
        return Size::new(width, 0);
    }
    let height = round_half_up(width as f64 * size.h as f64 / size.w as f64);
    Size::new(width, height)
}

/// Size with the given height and the aspect ratio of `size`.
pub fn scale_to_height(size: Size, height: u32) -> Size {
    if size.h == 0 {
        return Size::new(0, height);
    }
    let width = round_half_up(height as f64 * size.w as f64 / size.h as f64);
    Size::new(width, height)
}

/// Largest size with the aspect ratio of `size` that fits inside `frame`.
///
/// One dimension always matches the frame exactly; the other is clamped so
/// rounding can never push it past the frame.
pub fn scale_to_fit(size: Size, frame: Size) -> Size {
    let by_width = scale_to_width(size, frame.w);
    if by_width.h <= frame.h {
        return by_width;
    }
    let by_height = scale_to_height(size, frame.h);
    Size::new(by_height.w.min(frame.w), by_height.h)
}

/// Offset that places `inner` in the center of `outer`, where `outer` itself
/// sits at `outer_offset`. Odd differences round toward negative infinity.
/// None if the result does not fit in `i32`.
pub fn centering_offset(inner: Size, outer: Size, outer_offset: Pos) -> Option<Pos> {
    let half = |outer: u32, inner: u32| -> i64 { (outer as i64 - inner as i64).div_euclid(2) };
    let axis = |start: i32, shift: i64| i32::try_from(start as i64 + shift).ok();
    Some(Pos::new(
        axis(outer_offset.x, half(outer.w, inner.w))?,
        axis(outer_offset.y, half(outer.h, inner.h))?,
    ))
}
