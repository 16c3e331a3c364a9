//! Error types for downlinx
//!
//! Every error is fatal to the current run. Messages name the failing
//! operation and its inputs so the log line alone explains what broke.

use crate::geometry::{Pos, Size};
use std::io;
use std::path::{Path, PathBuf};

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The path is missing or is not a decodable image
    #[error("unreadable image {}: {reason}", path.display())]
    UnreadableImage { path: PathBuf, reason: String },

    /// Filesystem failure (permissions, disk full, ...)
    #[error("storage error at {}", path.display())]
    StorageError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source name is not in the catalog
    #[error("unknown source \"{0}\"")]
    UnknownSource(String),

    /// The source exists but offers no such size variant
    #[error("source \"{source_name}\" has no size variant \"{variant}\" (available: {available})")]
    UnknownVariant {
        source_name: String,
        variant: String,
        available: String,
    },

    /// Network error, non-success response, or a body that is not an image
    #[error("failed to fetch {url}: {reason}")]
    FetchError { url: String, reason: String },

    /// A target size with a zero dimension or too many pixels
    #[error("{operation}: invalid size {size}")]
    InvalidSize { operation: &'static str, size: Size },

    /// A crop rectangle reaching outside its source image
    #[error("crop: {size} at {offset} exceeds {bounds} image {}", path.display())]
    OutOfBounds {
        path: PathBuf,
        offset: Pos,
        size: Size,
        bounds: Size,
    },

    /// The image engine or a desktop tool failed
    #[error("{command} failed: {reason}")]
    ExternalToolError { command: String, reason: String },

    /// The source catalog is malformed or inconsistent
    #[error("invalid source catalog: {0}")]
    CatalogError(String),

    /// The pipeline definition is malformed or refers to unknown names
    #[error("invalid pipeline definition: {0}")]
    DefinitionError(String),
}

impl Error {
    /// Wrap an io error with the path it happened at
    pub fn storage(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::StorageError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn unreadable(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Error::UnreadableImage {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Error::FetchError {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn tool(command: impl ToString, reason: impl ToString) -> Self {
        Error::ExternalToolError {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }
}
