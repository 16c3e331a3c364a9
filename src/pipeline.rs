//! Pipeline engine - image operations that turn artifacts into new artifacts
//!
//! Every operation validates its inputs, asks the image engine to do the
//! pixel work into a fresh path from the artifact store, and returns a new
//! [`Image`] handle. Input handles are never modified.
//!
//! ## Module Structure
//! - `pure.rs`: Size and bounds validation

mod pure;

pub use pure::{check_crop_bounds, check_size};

use crate::engine::{EngineBackend, ImageEngine};
use crate::error::Result;
use crate::geometry::{Pos, Size, aspect_ratio};
use crate::paths::IMAGES_DIR;
use crate::store::{ArtifactStore, Image};

use std::path::Path;

/// Format used for every intermediate artifact
const LOSSLESS_KIND: &str = "png";

pub struct Pipeline {
    store: ArtifactStore,
    engine: EngineBackend,
}

impl Pipeline {
    /// Bind a pipeline to `pipeline_dir`; artifacts go to its `images/` subdirectory
    pub fn new(pipeline_dir: &Path, engine: EngineBackend) -> Result<Self> {
        let store = ArtifactStore::open(pipeline_dir.join(IMAGES_DIR))?;
        tracing::debug!(
            "pipeline - {} with {} engine",
            store.dir().display(),
            engine.name()
        );
        Ok(Self { store, engine })
    }

    /// Directory holding this pipeline's downloads and artifacts
    pub fn images_dir(&self) -> &Path {
        self.store.dir()
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Wrap an existing image file (e.g. a local photo) as a handle
    pub fn open(&self, path: &Path) -> Result<Image> {
        self.store.wrap(path)
    }

    /// Create a blank image with the given color and dimensions
    pub fn blank(&mut self, color: &str, size: Size) -> Result<Image> {
        check_size("blank", size)?;
        tracing::info!("blank {} {}", color, size);

        let out = self.store.new_artifact_path(LOSSLESS_KIND)?;
        self.engine.blank(color, size, &out)?;
        self.store.wrap(&out)
    }

    /// Cut the `size` rectangle at `offset` out of an image
    pub fn crop(&mut self, image: &Image, offset: Pos, size: Size) -> Result<Image> {
        check_size("crop", size)?;
        // Before allocating a path, so a failed crop leaves nothing behind
        check_crop_bounds(image, offset, size)?;
        tracing::info!("crop {} {}{}", image.path().display(), size, offset);

        let out = self.store.new_artifact_path(LOSSLESS_KIND)?;
        self.engine.crop(image.path(), offset, size, &out)?;
        self.store.wrap(&out)
    }

    /// Resample an image to exactly `size`; aspect ratio is the caller's business
    pub fn resize(&mut self, image: &Image, size: Size) -> Result<Image> {
        check_size("resize", size)?;
        tracing::info!("resize {} {} -> {}", image.path().display(), image.size(), size);
        let (from, to) = (aspect_ratio(image.size()), aspect_ratio(size));
        if (from - to).abs() > 0.01 * from {
            tracing::debug!("resize - aspect ratio changes from {:.3} to {:.3}", from, to);
        }

        let out = self.store.new_artifact_path(LOSSLESS_KIND)?;
        self.engine.resize(image.path(), size, &out)?;
        self.store.wrap(&out)
    }

    /// Place `overlay` on top of `base` at `offset`.
    ///
    /// Parts of the overlay that fall outside the base are clipped; the result
    /// always has the base's size.
    pub fn place(&mut self, overlay: &Image, offset: Pos, base: &Image) -> Result<Image> {
        tracing::info!(
            "place {} at {} on {}",
            overlay.path().display(),
            offset,
            base.path().display()
        );

        let out = self.store.new_artifact_path(LOSSLESS_KIND)?;
        self.engine.place(overlay.path(), offset, base.path(), &out)?;
        self.store.wrap(&out)
    }

    /// Re-encode an image as JPEG. Some background setters render PNG
    /// colors wrong, so finished backgrounds usually go through this.
    pub fn to_jpg(&mut self, image: &Image) -> Result<Image> {
        tracing::info!("to_jpg {}", image.path().display());

        let out = self.store.new_artifact_path("jpg")?;
        self.engine.convert(image.path(), &out)?;
        self.store.wrap(&out)
    }
}
