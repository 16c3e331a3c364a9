mod background;
mod config;
mod definition;
mod engine;
mod error;
mod geometry;
mod paths;
mod pipeline;
mod sources;
mod store;
mod util;

use crate::config::{load_settings, save_settings};
use crate::definition::{Definition, RunOptions};
use crate::engine::EngineBackend;
use crate::error::Result;
use crate::paths::{PATH_SETTINGS, PIPELINE_FILE};
use crate::pipeline::Pipeline;
use crate::sources::{HttpFetcher, SourceCache, locate_catalog};

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("downlinx=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|arg| arg == "--write-settings") {
        return match save_settings(&load_settings()) {
            Ok(()) => {
                println!("{}", PATH_SETTINGS.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("{}", error_chain(&e));
                ExitCode::FAILURE
            }
        };
    }

    let dry_run = args.iter().any(|arg| arg == "--dry-run");
    let positional: Vec<&String> = args.iter().filter(|arg| !arg.starts_with("--")).collect();
    let unknown = args
        .iter()
        .find(|arg| arg.starts_with("--") && arg.as_str() != "--dry-run");

    let pipeline_dir = match (positional.as_slice(), unknown) {
        ([dir], None) if Path::new(dir.as_str()).join(PIPELINE_FILE).is_file() => {
            PathBuf::from(dir.as_str())
        }
        _ => {
            eprintln!(
                "downlinx takes one argument: the pipeline directory (containing {}).",
                PIPELINE_FILE
            );
            eprintln!("{}", USAGE_TEXT);
            return ExitCode::FAILURE;
        }
    };

    match run(&pipeline_dir, RunOptions { dry_run }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(pipeline_dir: &Path, options: RunOptions) -> Result<()> {
    let settings = load_settings();
    let definition = Definition::from_file(&pipeline_dir.join(PIPELINE_FILE))?;
    let catalog = locate_catalog(pipeline_dir, &settings)?;

    let mut pipeline = Pipeline::new(pipeline_dir, EngineBackend::from_preference(settings.engine))?;
    let cache = SourceCache::new(catalog, pipeline.images_dir(), HttpFetcher::new(&settings)?);
    tracing::info!(
        "running {} ({} steps, {} engine, {} sources)",
        pipeline_dir.display(),
        definition.steps.len(),
        pipeline.engine_name(),
        cache.catalog().sources().len()
    );

    let images = definition.execute(&mut pipeline, &cache, options)?;
    tracing::info!(
        "done, {} images bound, artifacts in {}",
        images.len(),
        pipeline.images_dir().display()
    );
    Ok(())
}

/// Error message followed by its sources, `a: b: c`
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

static USAGE_TEXT: &str = r#"
Usage: downlinx [OPTIONS] <PIPELINE_DIR>

Runs the pipeline.yaml in PIPELINE_DIR, for example:
    downlinx pipelines/simple

Options:
    --dry-run          Build every image but don't change the desktop background
    --write-settings   Write the current settings (defaults filled in) to the settings file
    --help             Show this text

Set RUST_LOG (e.g. RUST_LOG=downlinx=debug) for more output.
"#;
