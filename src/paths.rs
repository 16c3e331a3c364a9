use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Name of the pipeline definition file inside a pipeline directory
pub const PIPELINE_FILE: &str = "pipeline.yaml";

/// Name of the per-pipeline catalog override
pub const SOURCES_FILE: &str = "sources.json";

/// Subdirectory of a pipeline directory holding downloads and artifacts
pub const IMAGES_DIR: &str = "images";

pub static PATH_HOME: LazyLock<PathBuf> =
    LazyLock::new(|| env::var_os("HOME").map(PathBuf::from).unwrap_or_default());

pub static PATH_CONFIG: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(xdg_config_home) = env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home).join("downlinx");
    }
    PATH_HOME.join(".config/downlinx")
});

pub static PATH_SETTINGS: LazyLock<PathBuf> = LazyLock::new(|| PATH_CONFIG.join("settings.json"));
