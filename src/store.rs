//! Artifact store - durable, uniquely named image files
//!
//! The store owns a pipeline's `images/` directory. It hands out fresh output
//! paths for operations and wraps files as [`Image`] handles. It never deletes
//! a handle's file and keeps no record of how artifacts depend on each other.

use crate::error::{Error, Result};
use crate::geometry::Size;

use image::ImageReader;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An image file on disk together with its pixel dimensions.
///
/// The dimensions are probed when the handle is created, so a handle always
/// describes a file that existed and decoded at that moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    path: PathBuf,
    size: Size,
}

impl Image {
    /// Probe the image at `path` (header only, pixels are not decoded).
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = ImageReader::open(path)
            .map_err(|e| Error::unreadable(path, e))?
            .with_guessed_format()
            .map_err(|e| Error::unreadable(path, e))?;
        let (w, h) = reader
            .into_dimensions()
            .map_err(|e| Error::unreadable(path, e))?;

        tracing::debug!("probed {} ({}x{})", path.display(), w, h);

        Ok(Self {
            path: path.to_path_buf(),
            size: Size::new(w, h),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Hands out collision-free artifact paths inside one working directory
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
    generated: u64,
}

impl ArtifactStore {
    /// Open the store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::storage(&dir, e))?;
        Ok(Self { dir, generated: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Wrap an existing file as an image handle
    pub fn wrap(&self, path: impl AsRef<Path>) -> Result<Image> {
        Image::probe(path)
    }

    /// Path for a new artifact with extension `kind` (`png`, `jpg`, ...).
    ///
    /// Names are `generated<N>.<kind>` with `N` counting up for the lifetime
    /// of the store, so two calls never return the same path. A file left at
    /// that path by an earlier run is removed so it can't be mistaken for
    /// this run's output.
    pub fn new_artifact_path(&mut self, kind: &str) -> Result<PathBuf> {
        if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::storage(
                &self.dir,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid artifact kind \"{kind}\""),
                ),
            ));
        }

        let path = self.dir.join(format!("generated{}.{}", self.generated, kind));
        self.generated += 1;

        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!("removed stale artifact {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::storage(&path, e)),
        }

        Ok(path)
    }
}
