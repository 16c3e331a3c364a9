//! Catalog consistency checks (no I/O)

use crate::error::{Error, Result};
use crate::sources::pure::cache_filename;
use crate::sources::types::Source;
use crate::util::{has_whitespace, replace_spaces};

use std::collections::HashSet;

/// Check that every source can be cached and fetched unambiguously.
///
/// - names are unique, and stay unique once spaces become underscores
///   (cache file names are built that way)
/// - every source has at least one variant and a non-zero interval
/// - variant names are usable in file names, and no two (source, variant)
///   pairs share a cache file
/// - every URL serves a JPEG, since cache files are stored as `.jpg`
pub fn validate_sources(sources: &[Source]) -> Result<()> {
    let mut names = HashSet::new();
    let mut spaceless_names = HashSet::new();
    let mut cache_files = HashSet::new();

    for source in sources {
        let name = &source.name;
        if name.trim().is_empty() {
            return Err(Error::CatalogError("source with an empty name".to_string()));
        }
        if !names.insert(name.as_str()) {
            return Err(Error::CatalogError(format!(
                "name \"{name}\" is not unique in the sources list"
            )));
        }
        let spaceless = replace_spaces(name);
        if has_whitespace(&spaceless) || !spaceless_names.insert(spaceless.clone()) {
            return Err(Error::CatalogError(format!(
                "spaceless name \"{spaceless}\" is not unique in the sources list"
            )));
        }

        if source.url.is_empty() {
            return Err(Error::CatalogError(format!(
                "source \"{name}\" has no size variants"
            )));
        }
        if source.interval == 0 {
            return Err(Error::CatalogError(format!(
                "source \"{name}\" has a zero refresh interval"
            )));
        }

        for (variant, url) in &source.url {
            if variant.is_empty()
                || !variant
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(Error::CatalogError(format!(
                    "source \"{name}\" has an invalid size variant \"{variant}\""
                )));
            }
            let file = cache_filename(name, variant);
            if !cache_files.insert(file.clone()) {
                return Err(Error::CatalogError(format!(
                    "source \"{name}\" variant \"{variant}\" shares cache file {file} with another source"
                )));
            }
            if !url.to_ascii_lowercase().ends_with(".jpg") {
                return Err(Error::CatalogError(format!(
                    "source \"{name}\" variant \"{variant}\" is not a .jpg URL: {url}"
                )));
            }
        }

        if let Some(clean) = &source.clean
            && !source.url.contains_key(&clean.variant)
        {
            return Err(Error::CatalogError(format!(
                "source \"{name}\" cleans variant \"{}\" which it does not offer",
                clean.variant
            )));
        }
    }

    Ok(())
}
