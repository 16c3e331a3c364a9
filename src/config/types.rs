use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which image engine performs the pixel work
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnginePreference {
    /// ImageMagick when installed, otherwise the built-in engine
    #[default]
    Auto,
    Magick,
    Native,
}

/// User settings, shared by every pipeline run on this machine
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub engine: EnginePreference,
    /// Upper bound on a single download, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Catalog used when a pipeline directory has no sources.json of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

fn default_http_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("downlinx/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            engine: EnginePreference::Auto,
            http_timeout_secs: default_http_timeout_secs(),
            user_agent: default_user_agent(),
            catalog: None,
        }
    }
}
