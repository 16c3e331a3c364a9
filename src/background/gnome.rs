//! GNOME backgrounds
//!
//! GNOME 2 keeps the wallpaper in gconf, GNOME 3 and Unity in gsettings.
//! Neither has been tried on a real desktop in a while.

use crate::background::BackgroundSetter;
use std::path::Path;
use std::process::Command;

const GSETTINGS_SCHEMA: &str = "org.gnome.desktop.background";

#[derive(Debug)]
pub struct Gnome2Sink;

impl BackgroundSetter for Gnome2Sink {
    fn name(&self) -> &'static str {
        "gnome2"
    }

    fn commands(&self, path: &Path) -> Vec<Command> {
        let mut cmd = Command::new("gconftool-2");
        cmd.args([
            "--type=string",
            "--set",
            "/desktop/gnome/background/picture_filename",
        ])
        .arg(path);
        vec![cmd]
    }
}

#[derive(Debug)]
pub struct Gnome3Sink;

impl Gnome3Sink {
    fn gsettings(key: &str, value: &str) -> Command {
        let mut cmd = Command::new("gsettings");
        cmd.args(["set", GSETTINGS_SCHEMA, key, value]);
        cmd
    }
}

impl BackgroundSetter for Gnome3Sink {
    fn name(&self) -> &'static str {
        "gnome3"
    }

    // Spanned so one wide image covers every monitor
    fn commands(&self, path: &Path) -> Vec<Command> {
        let uri = format!("file://{}", path.display());
        vec![
            Self::gsettings("picture-uri", &uri),
            Self::gsettings("picture-options", "spanned"),
        ]
    }
}
