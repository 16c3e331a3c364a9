//! Download validation and crash-safe writes

use crate::error::{Error, Result};

use image::ImageReader;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Check that a response body is a complete, decodable image header
pub fn check_image_body(url: &str, body: &[u8]) -> Result<()> {
    if body.is_empty() {
        return Err(Error::fetch(url, "empty response body"));
    }

    ImageReader::new(Cursor::new(body))
        .with_guessed_format()
        .map_err(|e| Error::fetch(url, e))?
        .into_dimensions()
        .map_err(|e| Error::fetch(url, format!("response is not a decodable image: {e}")))?;

    Ok(())
}

/// Write `bytes` to `dest` so readers see either the old file or the whole
/// new one. The data goes to a temporary file next to `dest` and is renamed
/// over it; on any error the temporary file is removed and `dest` is left alone.
pub fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::storage(dir, e))?;
    tmp.write_all(bytes)
        .map_err(|e| Error::storage(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::storage(tmp.path(), e))?;
    tmp.persist(dest).map_err(|e| Error::storage(dest, e.error))?;

    Ok(())
}
