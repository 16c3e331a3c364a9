//! Image viewer "sink" for checking a pipeline's output by eye.
//! Blocks until the viewer window is closed.

use crate::background::BackgroundSetter;
use std::path::Path;
use std::process::Command;

#[derive(Debug)]
pub struct EogSink;

impl BackgroundSetter for EogSink {
    fn name(&self) -> &'static str {
        "eog"
    }

    fn commands(&self, path: &Path) -> Vec<Command> {
        let mut cmd = Command::new("eog");
        cmd.arg(path);
        vec![cmd]
    }
}
