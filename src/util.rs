use crate::error::{Error, Result};

use regex::Regex;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// Return true if a string has whitespace.
pub fn has_whitespace(s: &str) -> bool {
    WHITESPACE.is_match(s)
}

/// Single-quote a string if it has whitespace, escaping any single quotes inside.
pub fn quote_if_has_whitespace(s: &str) -> String {
    if !has_whitespace(s) {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "\\'"))
}

/// Replace spaces with underscores, for turning source names into filenames.
pub fn replace_spaces(s: &str) -> String {
    s.replace(' ', "_")
}

/// Render a command the way a user would type it into a shell
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| quote_if_has_whitespace(&part.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Echo a command to the log, run it to completion and fail on non-zero exit.
pub fn run_with_echo(cmd: &mut Command) -> Result<()> {
    let line = command_line(cmd);
    tracing::info!("{}", line);

    let output = cmd.output().map_err(|e| Error::tool(&line, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => output.status.to_string(),
            msg => format!("{}: {}", output.status, msg),
        };
        return Err(Error::tool(line, reason));
    }

    Ok(())
}

/// Check whether a program can be started (runs it with a version flag).
pub fn is_runnable(program: &str, version_flag: &str) -> bool {
    Command::new(program)
        .arg(version_flag)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Absolute form of `path`, for tools that run with a different working directory
pub fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    std::path::absolute(path).map_err(|e| Error::storage(path, e))
}
