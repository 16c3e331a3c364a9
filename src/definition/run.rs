//! Step execution

use crate::background::{BackgroundSetter, BackgroundSink};
use crate::definition::eval::Scope;
use crate::definition::types::{Definition, Op, Step};
use crate::error::{Error, Result};
use crate::paths::PATH_HOME;
use crate::pipeline::Pipeline;
use crate::sources::{Fetch, SourceCache};
use crate::store::Image;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Evaluate everything but leave the desktop alone
    pub dry_run: bool,
}

impl Definition {
    /// Run every step in order. Returns the final image bindings.
    pub fn execute<F: Fetch>(
        &self,
        pipeline: &mut Pipeline,
        cache: &SourceCache<F>,
        options: RunOptions,
    ) -> Result<HashMap<String, Image>> {
        self.validate()?;

        let mut scope = Scope::new(self);
        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!("definition - step {}: {}", i + 1, step.op.name());
            let produced = self.run_step(i, step, &scope, pipeline, cache, options)?;
            if let (Some(name), Some(image)) = (&step.bind, produced) {
                scope.bind(name, image);
            }
        }

        Ok(scope.into_images())
    }

    fn run_step<F: Fetch>(
        &self,
        index: usize,
        step: &Step,
        scope: &Scope,
        pipeline: &mut Pipeline,
        cache: &SourceCache<F>,
        options: RunOptions,
    ) -> Result<Option<Image>> {
        let fail = |msg: String| {
            Error::DefinitionError(format!("step {} ({}): {}", index + 1, step.op.name(), msg))
        };

        let image = match &step.op {
            Op::Open(path) => pipeline.open(&self.resolve(path))?,
            Op::Get { source, variant } => cache.get(source, variant)?,
            Op::Clean(source) => cache.clean(pipeline, source)?,
            Op::Blank { color, size } => {
                let size = scope.size(size).map_err(fail)?;
                pipeline.blank(color, size)?
            }
            Op::Crop {
                image,
                offset,
                size,
            } => {
                let input = scope.image(image).map_err(fail)?;
                let offset = scope.pos(offset).map_err(fail)?;
                let size = scope.size(size).map_err(fail)?;
                pipeline.crop(input, offset, size)?
            }
            Op::Resize { image, size } => {
                let input = scope.image(image).map_err(fail)?;
                let size = scope.size(size).map_err(fail)?;
                pipeline.resize(input, size)?
            }
            Op::Place {
                image,
                offset,
                base,
            } => {
                let overlay = scope.image(image).map_err(fail)?;
                let base = scope.image(base).map_err(fail)?;
                let offset = scope.pos(offset).map_err(fail)?;
                pipeline.place(overlay, offset, base)?
            }
            Op::ToJpg(image) => {
                let input = scope.image(image).map_err(fail)?;
                pipeline.to_jpg(input)?
            }
            Op::Background {
                sink,
                image,
                monitor,
            } => {
                let input = scope.image(image).map_err(fail)?;
                let sink = BackgroundSink::from_kind(*sink, monitor.as_deref())?;
                if options.dry_run {
                    tracing::info!(
                        "definition - dry run, not setting {} via {}",
                        input.path().display(),
                        sink.name()
                    );
                } else {
                    sink.set(input)?;
                }
                return Ok(None);
            }
        };

        Ok(Some(image))
    }

    /// Resolve an `open` path: `~/` is the home directory, relative paths
    /// start at the definition's directory
    fn resolve(&self, path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix("~") {
            return PATH_HOME.join(rest);
        }
        self.base_dir.join(path)
    }
}
