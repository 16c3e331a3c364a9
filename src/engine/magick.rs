//! ImageMagick engine (via the `magick` / `convert` command line)

use crate::engine::ImageEngine;
use crate::error::Result;
use crate::geometry::{Pos, Size};
use crate::util::{is_runnable, run_with_echo};

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Must come right before the output name of any command writing a PNG,
/// otherwise ImageMagick may pick a grayscale or palette colorspace.
const PNG_COLOR_TYPE: [&str; 2] = ["-define", "png:color-type=6"];

pub struct MagickEngine {
    /// ImageMagick 6 only ships `convert`; 7 ships `magick`
    legacy: bool,
}

impl MagickEngine {
    pub fn new(legacy: bool) -> Self {
        Self { legacy }
    }

    /// Find an installed ImageMagick, preferring version 7
    pub fn detect() -> Option<Self> {
        if is_runnable("magick", "-version") {
            Some(Self::new(false))
        } else if is_runnable("convert", "-version") {
            Some(Self::new(true))
        } else {
            None
        }
    }

    fn command<I>(&self, args: I) -> Command
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let program = if self.legacy { "convert" } else { "magick" };
        let mut cmd = Command::new(program);
        cmd.args(args.into_iter().map(Into::into));
        cmd
    }

    fn output_args(out: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if out.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")) {
            args.extend(PNG_COLOR_TYPE.iter().map(OsString::from));
        }
        args.push(out.into());
        args
    }

    fn blank_cmd(&self, color: &str, size: Size, out: &Path) -> Command {
        let mut args: Vec<OsString> = vec![
            "-size".into(),
            size.to_string().into(),
            format!("canvas:{color}").into(),
        ];
        args.extend(Self::output_args(out));
        self.command(args)
    }

    fn crop_cmd(&self, input: &Path, offset: Pos, size: Size, out: &Path) -> Command {
        let mut args: Vec<OsString> = vec![
            input.into(),
            "-crop".into(),
            format!("{size}{offset}").into(),
            "+repage".into(),
        ];
        args.extend(Self::output_args(out));
        self.command(args)
    }

    fn resize_cmd(&self, input: &Path, size: Size, out: &Path) -> Command {
        // `!` forces the exact size instead of fitting inside it
        let mut args: Vec<OsString> =
            vec![input.into(), "-resize".into(), format!("{size}!").into()];
        args.extend(Self::output_args(out));
        self.command(args)
    }

    fn place_cmd(&self, overlay: &Path, offset: Pos, base: &Path, out: &Path) -> Command {
        let mut args: Vec<OsString> = vec![
            base.into(),
            overlay.into(),
            "-geometry".into(),
            offset.to_string().into(),
            "-composite".into(),
        ];
        args.extend(Self::output_args(out));
        self.command(args)
    }

    fn convert_cmd(&self, input: &Path, out: &Path) -> Command {
        let mut args: Vec<OsString> = vec![input.into()];
        args.extend(Self::output_args(out));
        self.command(args)
    }
}

impl ImageEngine for MagickEngine {
    fn name(&self) -> &'static str {
        if self.legacy {
            "ImageMagick 6"
        } else {
            "ImageMagick"
        }
    }

    fn blank(&self, color: &str, size: Size, out: &Path) -> Result<()> {
        run_with_echo(&mut self.blank_cmd(color, size, out))
    }

    fn crop(&self, input: &Path, offset: Pos, size: Size, out: &Path) -> Result<()> {
        run_with_echo(&mut self.crop_cmd(input, offset, size, out))
    }

    fn resize(&self, input: &Path, size: Size, out: &Path) -> Result<()> {
        run_with_echo(&mut self.resize_cmd(input, size, out))
    }

    fn place(&self, overlay: &Path, offset: Pos, base: &Path, out: &Path) -> Result<()> {
        run_with_echo(&mut self.place_cmd(overlay, offset, base, out))
    }

    fn convert(&self, input: &Path, out: &Path) -> Result<()> {
        run_with_echo(&mut self.convert_cmd(input, out))
    }
}
