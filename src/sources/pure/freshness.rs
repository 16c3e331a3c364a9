//! Cache freshness and naming
//!
//! The filesystem is the only cache index: a download's mtime is its fetch
//! time, and its name is derived from (source, variant).

use crate::util::replace_spaces;
use std::time::{Duration, SystemTime};

/// A cached file is fresh while its age is below the refresh interval.
///
/// An mtime in the future means the clock moved or the file was touched by
/// hand; it counts as stale so the next fetch resets it.
pub fn is_fresh(now: SystemTime, mtime: SystemTime, interval: Duration) -> bool {
    match now.duration_since(mtime) {
        Ok(age) => age < interval,
        Err(_) => false,
    }
}

/// Cache file name for a source's size variant, e.g. `GOES-East_Full_Disk_large.jpg`
pub fn cache_filename(source_name: &str, variant: &str) -> String {
    format!("{}_{}.jpg", replace_spaces(source_name), variant)
}
