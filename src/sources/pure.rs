//! Pure functions for the source cache
//!
//! These functions have no side effects and are deterministic.

mod freshness;
mod validation;

pub use freshness::{cache_filename, is_fresh};
pub use validation::validate_sources;
