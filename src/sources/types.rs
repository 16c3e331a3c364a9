//! Source catalog type definitions

use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Fixed post-processing that hides a source's info bar and logo.
///
/// The raw image has `trim_bottom` rows cut off its bottom edge, then a black
/// `mask` rectangle is placed over the bottom-left corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CleanRecipe {
    /// Size variant the recipe's pixel values were measured on
    #[serde(default = "default_clean_variant")]
    pub variant: String,
    #[serde(default)]
    pub trim_bottom: u32,
    pub mask: Size,
}

fn default_clean_variant() -> String {
    "large".to_string()
}

/// One satellite image feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Unique key, e.g. "GOES-East Full Disk"
    pub name: String,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display: String,
    /// Size variant (tiny/small/large/full) -> image URL
    pub url: BTreeMap<String, String>,
    /// Minimum time between downloads, in seconds
    pub interval: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<CleanRecipe>,
}

impl Source {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Label for log lines; falls back to the name
    pub fn label(&self) -> &str {
        if self.display.is_empty() {
            &self.name
        } else {
            &self.display
        }
    }

    /// Comma-separated variant names, for error messages
    pub fn variants(&self) -> String {
        self.url.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Read-only catalog of known sources, loaded once per run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    sources: Vec<Source>,
}

/// On-disk layout of sources.json
#[derive(Deserialize, Serialize)]
pub(super) struct CatalogFile {
    pub sources: Vec<Source>,
}

impl Catalog {
    /// Build a catalog without validation; see `Catalog::new` for the checked form
    pub(super) fn from_sources_unchecked(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}
