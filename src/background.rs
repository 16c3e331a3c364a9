//! Desktop background setters
//!
//! Each sink knows the command line one desktop environment uses to change
//! its wallpaper. A pipeline names the sink it wants; nothing is detected.
//!
//! ## Sinks
//! - **wm**: bare window managers (`xloadimage -onroot`)
//! - **gnome2** / **gnome3**: GNOME 2 via gconf, GNOME 3 and Unity via gsettings
//! - **xfce**: one monitor at a time via xfconf
//! - **eog**: opens the image in Eye of GNOME, for debugging

mod gnome;
mod viewer;
mod xfce;
mod xloadimage;

pub use gnome::{Gnome2Sink, Gnome3Sink};
pub use viewer::EogSink;
pub use xfce::XfceSink;
pub use xloadimage::RootWindowSink;

use crate::error::{Error, Result};
use crate::store::Image;
use crate::util::{absolute, run_with_echo};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Something that can put an image on the desktop
pub trait BackgroundSetter {
    /// Name used in pipeline definitions
    fn name(&self) -> &'static str;

    /// Commands to run, in order, to show the file at `path`
    fn commands(&self, path: &Path) -> Vec<Command>;

    /// Put `image` up on the desktop background.
    ///
    /// The image should be a JPEG; some setters distort PNG colors.
    fn set(&self, image: &Image) -> Result<()> {
        let path = absolute(image.path())?;
        tracing::info!("background - setting {} via {}", path.display(), self.name());
        for mut cmd in self.commands(&path) {
            run_with_echo(&mut cmd)?;
        }
        Ok(())
    }
}

/// Sink names as written in `pipeline.yaml`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Wm,
    Gnome2,
    Gnome3,
    Xfce,
    Eog,
}

/// Enum wrapper for dispatch over the sinks
#[derive(Debug)]
pub enum BackgroundSink {
    RootWindow(RootWindowSink),
    Gnome2(Gnome2Sink),
    Gnome3(Gnome3Sink),
    Xfce(XfceSink),
    Eog(EogSink),
}

impl BackgroundSink {
    /// Build the sink for `kind`. Only xfce takes a monitor, and requires one
    /// (e.g. `screen0/monitorHDMI-0/workspace0`).
    pub fn from_kind(kind: SinkKind, monitor: Option<&str>) -> Result<Self> {
        match (kind, monitor) {
            (SinkKind::Xfce, Some(monitor)) => Ok(Self::Xfce(XfceSink::new(monitor))),
            (SinkKind::Xfce, None) => Err(Error::DefinitionError(
                "the xfce sink needs a monitor, list them with \
                 'xfconf-query --channel xfce4-desktop --list'"
                    .to_string(),
            )),
            (_, Some(_)) => Err(Error::DefinitionError(format!(
                "only the xfce sink takes a monitor, not {kind:?}"
            ))),
            (SinkKind::Wm, None) => Ok(Self::RootWindow(RootWindowSink)),
            (SinkKind::Gnome2, None) => Ok(Self::Gnome2(Gnome2Sink)),
            (SinkKind::Gnome3, None) => Ok(Self::Gnome3(Gnome3Sink)),
            (SinkKind::Eog, None) => Ok(Self::Eog(EogSink)),
        }
    }
}

impl BackgroundSetter for BackgroundSink {
    fn name(&self) -> &'static str {
        match self {
            Self::RootWindow(s) => s.name(),
            Self::Gnome2(s) => s.name(),
            Self::Gnome3(s) => s.name(),
            Self::Xfce(s) => s.name(),
            Self::Eog(s) => s.name(),
        }
    }

    fn commands(&self, path: &Path) -> Vec<Command> {
        match self {
            Self::RootWindow(s) => s.commands(path),
            Self::Gnome2(s) => s.commands(path),
            Self::Gnome3(s) => s.commands(path),
            Self::Xfce(s) => s.commands(path),
            Self::Eog(s) => s.commands(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::command_line;

    fn lines(sink: &BackgroundSink, path: &str) -> Vec<String> {
        sink.commands(Path::new(path))
            .iter()
            .map(command_line)
            .collect()
    }

    #[test]
    fn sink_kinds_parse_lowercase() {
        let kind: SinkKind = serde_yaml::from_str("gnome3").unwrap();
        assert_eq!(kind, SinkKind::Gnome3);
        assert!(serde_yaml::from_str::<SinkKind>("kde").is_err());
    }

    #[test]
    fn xfce_requires_monitor() {
        assert!(matches!(
            BackgroundSink::from_kind(SinkKind::Xfce, None),
            Err(Error::DefinitionError(_))
        ));
        let sink =
            BackgroundSink::from_kind(SinkKind::Xfce, Some("screen0/monitor0/workspace0")).unwrap();
        assert_eq!(sink.name(), "xfce");
    }

    #[test]
    fn monitor_rejected_for_other_sinks() {
        assert!(BackgroundSink::from_kind(SinkKind::Wm, Some("screen0")).is_err());
    }

    #[test]
    fn wm_uses_root_window() {
        let sink = BackgroundSink::from_kind(SinkKind::Wm, None).unwrap();
        assert_eq!(lines(&sink, "/tmp/bg.jpg"), ["xloadimage -onroot /tmp/bg.jpg"]);
    }

    #[test]
    fn gnome3_sets_uri_then_spans() {
        let sink = BackgroundSink::from_kind(SinkKind::Gnome3, None).unwrap();
        assert_eq!(
            lines(&sink, "/tmp/bg.jpg"),
            [
                "gsettings set org.gnome.desktop.background picture-uri file:///tmp/bg.jpg",
                "gsettings set org.gnome.desktop.background picture-options spanned",
            ]
        );
    }

    #[test]
    fn gnome2_uses_gconf() {
        let sink = BackgroundSink::from_kind(SinkKind::Gnome2, None).unwrap();
        assert_eq!(
            lines(&sink, "/tmp/bg.jpg"),
            ["gconftool-2 --type=string --set /desktop/gnome/background/picture_filename /tmp/bg.jpg"]
        );
    }

    #[test]
    fn xfce_targets_one_monitor() {
        let sink =
            BackgroundSink::from_kind(SinkKind::Xfce, Some("screen0/monitorHDMI-0/workspace0"))
                .unwrap();
        assert_eq!(
            lines(&sink, "/tmp/bg.jpg"),
            ["xfconf-query --channel xfce4-desktop --property \
              /backdrop/screen0/monitorHDMI-0/workspace0/last-image --set /tmp/bg.jpg"]
        );
    }

    #[test]
    fn eog_opens_viewer() {
        let sink = BackgroundSink::from_kind(SinkKind::Eog, None).unwrap();
        assert_eq!(lines(&sink, "/tmp/bg.jpg"), ["eog /tmp/bg.jpg"]);
    }
}
