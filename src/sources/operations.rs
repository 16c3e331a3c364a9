//! Source operations - catalog loading, downloads and atomic writes

mod catalog;
mod download;
mod fetch;

pub use catalog::locate_catalog;
pub use download::{check_image_body, write_atomically};
pub use fetch::{Fetch, HttpFetcher};
