//! Source cache - fresh local copies of satellite images
//!
//! A source's size variant always maps to the same file in the images
//! directory. That file is reused while it is younger than the source's
//! refresh interval and replaced with a new download otherwise.

use crate::error::{Error, Result};
use crate::geometry::{Pos, Size};
use crate::pipeline::Pipeline;
use crate::sources::operations::{Fetch, HttpFetcher, check_image_body, write_atomically};
use crate::sources::pure::{cache_filename, is_fresh};
use crate::sources::types::{Catalog, Source};
use crate::store::Image;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub struct SourceCache<F: Fetch = HttpFetcher> {
    catalog: Catalog,
    dir: PathBuf,
    fetcher: F,
}

impl<F: Fetch> SourceCache<F> {
    pub fn new(catalog: Catalog, dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            catalog,
            dir: dir.into(),
            fetcher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn source(&self, name: &str) -> Result<&Source> {
        self.catalog
            .get(name)
            .ok_or_else(|| Error::UnknownSource(name.to_string()))
    }

    /// Where the cached copy of a source's size variant lives
    pub fn cache_path(&self, name: &str, variant: &str) -> PathBuf {
        self.dir.join(cache_filename(name, variant))
    }

    /// Get an image from one of the sources, downloading it only if the
    /// cached copy is missing or older than the source's refresh interval.
    ///
    /// A failed download returns `FetchError` and leaves any cached copy
    /// exactly as it was. Stale copies are never served in its place.
    pub fn get(&self, name: &str, variant: &str) -> Result<Image> {
        let source = self.source(name)?;
        let url = source
            .url
            .get(variant)
            .ok_or_else(|| Error::UnknownVariant {
                source_name: name.to_string(),
                variant: variant.to_string(),
                available: source.variants(),
            })?;

        fs::create_dir_all(&self.dir).map_err(|e| Error::storage(&self.dir, e))?;
        let path = self.cache_path(name, variant);

        if let Some(mtime) = modified(&path)? {
            let now = SystemTime::now();
            if is_fresh(now, mtime, source.refresh_interval()) {
                let age = now.duration_since(mtime).unwrap_or_default();
                tracing::info!(
                    "sources - skipping download of {}, it's only {} seconds old",
                    path.display(),
                    age.as_secs()
                );
                return Image::probe(&path).inspect_err(|_| {
                    tracing::warn!(
                        "sources - cached {} is unreadable but fresh, delete it or wait {} seconds for a new download",
                        path.display(),
                        source.refresh_interval().as_secs()
                    );
                });
            }
            tracing::info!("sources - {} is stale", path.display());
        }

        let body = self.fetcher.fetch(url)?;
        check_image_body(url, &body)?;
        write_atomically(&path, &body)?;
        tracing::info!(
            "sources - saved {} ({} bytes) from {}",
            path.display(),
            body.len(),
            source.label()
        );

        Image::probe(&path)
    }

    /// Get a source with its info bar and logo hidden, per the source's
    /// clean recipe. The raw download goes through [`SourceCache::get`];
    /// the cleanup itself runs on every call.
    pub fn clean(&self, pipeline: &mut Pipeline, name: &str) -> Result<Image> {
        let source = self.source(name)?;
        let recipe = source.clean.as_ref().ok_or_else(|| {
            Error::CatalogError(format!("source \"{name}\" has no clean recipe"))
        })?;

        let raw = self.get(name, &recipe.variant)?;
        let raw_size = raw.size();

        let trimmed = if recipe.trim_bottom > 0 {
            let kept = Size::new(raw_size.w, raw_size.h.saturating_sub(recipe.trim_bottom));
            pipeline.crop(&raw, Pos::ORIGIN, kept)?
        } else {
            raw
        };

        if recipe.mask.is_empty() {
            return Ok(trimmed);
        }

        let logo_hider = pipeline.blank("black", recipe.mask)?;
        let offset = Pos::new(
            0,
            trimmed.size().h as i32 - logo_hider.size().h as i32,
        );
        pipeline.place(&logo_hider, offset, &trimmed)
    }
}

/// mtime of a regular file, or None if there is no file
fn modified(path: &Path) -> Result<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta
            .modified()
            .map(Some)
            .map_err(|e| Error::storage(path, e)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::storage(path, e)),
    }
}
