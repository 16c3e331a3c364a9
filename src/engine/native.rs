//! In-process engine built on the `image` crate
//!
//! Lossless outputs are written as RGBA so PNG artifacts match what the
//! ImageMagick engine produces with `png:color-type=6`.

use crate::engine::ImageEngine;
use crate::error::{Error, Result};
use crate::geometry::{Pos, Size};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});

/// Parse a color name or `#rgb` / `#rrggbb` / `#rrggbbaa` hex string
pub fn parse_color(color: &str) -> Option<Rgba<u8>> {
    let color = color.trim();

    if let Some(caps) = HEX_COLOR.captures(color) {
        let hex = &caps[1];
        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
        return match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let [r, g, b] = [channel(0, 1)?, channel(1, 1)?, channel(2, 1)?];
                Some(Rgba([r * 17, g * 17, b * 17, 255]))
            }
            6 => Some(Rgba([channel(0, 2)?, channel(2, 2)?, channel(4, 2)?, 255])),
            _ => Some(Rgba([
                channel(0, 2)?,
                channel(2, 2)?,
                channel(4, 2)?,
                channel(6, 2)?,
            ])),
        };
    }

    let rgba = match color.to_ascii_lowercase().as_str() {
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "lime" => [0, 255, 0, 255],
        "blue" => [0, 0, 255, 255],
        "navy" => [0, 0, 128, 255],
        "yellow" => [255, 255, 0, 255],
        "cyan" | "aqua" => [0, 255, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255, 255],
        "gray" | "grey" => [128, 128, 128, 255],
        "transparent" | "none" => [0, 0, 0, 0],
        _ => return None,
    };
    Some(Rgba(rgba))
}

#[derive(Default)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }

    fn load(operation: &'static str, path: &Path) -> Result<DynamicImage> {
        image::open(path).map_err(|e| Error::tool(format!("{operation} {}", path.display()), e))
    }

    /// Save using the format implied by the extension. JPEG has no alpha
    /// channel, so it gets an RGB copy.
    fn save(operation: &'static str, image: DynamicImage, out: &Path) -> Result<()> {
        let format = ImageFormat::from_path(out)
            .map_err(|e| Error::tool(format!("{operation} {}", out.display()), e))?;

        let image = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => DynamicImage::ImageRgba8(image.to_rgba8()),
        };

        image
            .save_with_format(out, format)
            .map_err(|e| Error::tool(format!("{operation} {}", out.display()), e))
    }
}

impl ImageEngine for NativeEngine {
    fn name(&self) -> &'static str {
        "native"
    }

    fn blank(&self, color: &str, size: Size, out: &Path) -> Result<()> {
        let pixel = parse_color(color)
            .ok_or_else(|| Error::tool("blank", format!("unrecognised color \"{color}\"")))?;
        let canvas = RgbaImage::from_pixel(size.w, size.h, pixel);
        Self::save("blank", DynamicImage::ImageRgba8(canvas), out)
    }

    fn crop(&self, input: &Path, offset: Pos, size: Size, out: &Path) -> Result<()> {
        let image = Self::load("crop", input)?;
        let x = u32::try_from(offset.x).unwrap_or(0);
        let y = u32::try_from(offset.y).unwrap_or(0);
        Self::save("crop", image.crop_imm(x, y, size.w, size.h), out)
    }

    fn resize(&self, input: &Path, size: Size, out: &Path) -> Result<()> {
        let image = Self::load("resize", input)?;
        Self::save(
            "resize",
            image.resize_exact(size.w, size.h, FilterType::Lanczos3),
            out,
        )
    }

    fn place(&self, overlay: &Path, offset: Pos, base: &Path, out: &Path) -> Result<()> {
        let mut canvas = Self::load("place", base)?.to_rgba8();
        let top = Self::load("place", overlay)?.to_rgba8();
        // overlay() clips anything outside the canvas
        imageops::overlay(&mut canvas, &top, offset.x as i64, offset.y as i64);
        Self::save("place", DynamicImage::ImageRgba8(canvas), out)
    }

    fn convert(&self, input: &Path, out: &Path) -> Result<()> {
        let image = Self::load("convert", input)?;
        Self::save("convert", image, out)
    }
}
