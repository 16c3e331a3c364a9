//! Satellite image sources
//!
//! A catalog of named image feeds, each offering its picture in several size
//! variants, plus a cache that keeps one local copy per variant and only
//! downloads again once the copy is older than the feed's refresh interval.
//!
//! ## Module Structure
//!
//! - `types`: Source, CleanRecipe, Catalog
//! - `pure`: freshness rule, cache file names, catalog validation
//! - `operations`: catalog loading, HTTP fetch, atomic writes
//! - `cache`: SourceCache (get, clean)

mod cache;
pub mod operations;
pub mod pure;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use cache::SourceCache;
pub use operations::{Fetch, HttpFetcher, locate_catalog};
