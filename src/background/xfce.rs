//! Xfce backgrounds
//!
//! Xfce sets one monitor and workspace at a time, so multi-monitor setups
//! need one image (or one crop) per monitor and one sink step each.

use crate::background::BackgroundSetter;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
pub struct XfceSink {
    /// e.g. `screen0/monitorHDMI-0/workspace0`
    monitor: String,
}

impl XfceSink {
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            monitor: monitor.into(),
        }
    }

    fn property(&self) -> String {
        format!("/backdrop/{}/last-image", self.monitor.trim_matches('/'))
    }
}

impl BackgroundSetter for XfceSink {
    fn name(&self) -> &'static str {
        "xfce"
    }

    fn commands(&self, path: &Path) -> Vec<Command> {
        let mut cmd = Command::new("xfconf-query");
        cmd.args(["--channel", "xfce4-desktop", "--property"])
            .arg(self.property())
            .arg("--set")
            .arg(path);
        vec![cmd]
    }
}
