//! Catalog loading
//!
//! Lookup order for a run:
//! 1. `sources.json` in the pipeline directory
//! 2. the `catalog` path from the user settings
//! 3. the catalog compiled into the binary

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::paths::SOURCES_FILE;
use crate::sources::pure::validate_sources;
use crate::sources::types::{Catalog, CatalogFile, Source};

use std::fs;
use std::path::Path;

/// Catalog shipped with downlinx
const BUNDLED_CATALOG: &str = include_str!("../../../res/sources.json");

impl Catalog {
    /// Build a validated catalog
    pub fn new(sources: Vec<Source>) -> Result<Self> {
        validate_sources(&sources)?;
        Ok(Self::from_sources_unchecked(sources))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|e| Error::CatalogError(e.to_string()))?;
        Self::new(file.sources)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::storage(path, e))?;
        Self::from_json(&text)
            .map_err(|e| Error::CatalogError(format!("{}: {}", path.display(), e)))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }
}

/// Find and load the catalog for the pipeline in `pipeline_dir`
pub fn locate_catalog(pipeline_dir: &Path, settings: &Settings) -> Result<Catalog> {
    let local = pipeline_dir.join(SOURCES_FILE);
    if local.is_file() {
        tracing::info!("sources - using catalog {}", local.display());
        return Catalog::load(&local);
    }

    if let Some(path) = &settings.catalog {
        tracing::info!("sources - using catalog {}", path.display());
        return Catalog::load(path);
    }

    tracing::debug!("sources - using bundled catalog");
    Catalog::bundled()
}
