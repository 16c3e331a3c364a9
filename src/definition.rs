//! Pipeline definitions
//!
//! A pipeline directory holds a `pipeline.yaml` describing, step by step,
//! how to turn satellite downloads and local pictures into a background:
//!
//! ```yaml
//! sizes: { monitor: [1920, 1080] }
//! steps:
//!   - let: earth
//!     clean: GOES-East Full Disk
//!   - let: bg
//!     blank: { color: black, size: monitor }
//!   - let: final
//!     place: { image: earth, offset: [0, 0], base: bg }
//!   - background: { sink: gnome3, image: final }
//! ```
//!
//! Steps run strictly in order. Every image-producing step names its result
//! with `let`; a later step may rebind the same name.
//!
//! ## Module Structure
//!
//! - `types`: Definition, Step, Op and the size/position expressions
//! - `eval`: Scope, evaluating expressions against bound names
//! - `validate`: static name and binding checks
//! - `run`: step execution

mod eval;
mod run;
#[cfg(test)]
mod tests;
mod types;
mod validate;

pub use run::RunOptions;
pub use types::Definition;

use crate::error::{Error, Result};

use std::fs;
use std::path::Path;

impl Definition {
    /// Parse and validate a definition. Relative `open` paths resolve
    /// against the current directory.
    pub fn parse(text: &str) -> Result<Self> {
        let to_error = |e: serde_yaml::Error| Error::DefinitionError(e.to_string());
        let raw: serde_yaml::Value = serde_yaml::from_str(text).map_err(to_error)?;
        validate::check_step_keys(&raw).map_err(Error::DefinitionError)?;
        let definition: Definition = serde_yaml::from_str(text).map_err(to_error)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Load `path`; relative `open` paths resolve against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::storage(path, e))?;
        let mut definition = Self::parse(&text).map_err(|e| match e {
            Error::DefinitionError(msg) => {
                Error::DefinitionError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        if let Some(dir) = path.parent() {
            definition.base_dir = dir.to_path_buf();
        }
        tracing::debug!(
            "definition - loaded {} ({} steps)",
            path.display(),
            definition.steps.len()
        );
        Ok(definition)
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate(self).map_err(Error::DefinitionError)
    }
}
