use crate::config::types::Settings;
use crate::error::{Error, Result};
use crate::paths::{PATH_CONFIG, PATH_SETTINGS};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn load_settings() -> Settings {
    load_settings_from(&PATH_SETTINGS)
}

/// Read settings from `path`, falling back to defaults if the file is
/// missing or malformed.
pub fn load_settings_from(path: &Path) -> Settings {
    let Ok(file) = File::open(path) else {
        tracing::debug!("no settings at {}, using defaults", path.display());
        return Settings::default();
    };

    match serde_json::from_reader::<_, Settings>(BufReader::new(file)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("ignoring malformed {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    fs::create_dir_all(&*PATH_CONFIG).map_err(|e| Error::storage(&*PATH_CONFIG, e))?;
    save_settings_to(&PATH_SETTINGS, settings)
}

/// Write `settings` to `path` as pretty JSON
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::storage(path, e))?;
    serde_json::to_writer_pretty(file, settings).map_err(|e| Error::storage(path, e.into()))?;
    tracing::info!("saved settings to {}", path.display());
    Ok(())
}
