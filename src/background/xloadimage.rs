//! Root window background for window managers without a desktop environment
//! (XMonad, Openbox, ...)

use crate::background::BackgroundSetter;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
pub struct RootWindowSink;

impl BackgroundSetter for RootWindowSink {
    fn name(&self) -> &'static str {
        "wm"
    }

    fn commands(&self, path: &Path) -> Vec<Command> {
        let mut cmd = Command::new("xloadimage");
        cmd.arg("-onroot").arg(path);
        vec![cmd]
    }
}
