//! # vitrine-client
//!
//! Index sources for Vitrine search:
//! - [`HttpIndexLoader`]: fetches the published index over HTTP, caching
//!   successes and 404s per URL in an [`IndexCache`]
//! - [`FileIndexSource`]: reads an index file from disk
//!
//! [`source_for`] picks one from a location string.

pub mod cache;
pub mod file;
pub mod loader;

use std::sync::Arc;
use std::time::Duration;

use vitrine_core::{IndexSource, Result};

pub use cache::{CacheEntry, IndexCache};
pub use file::FileIndexSource;
pub use loader::{DEFAULT_TIMEOUT, HttpIndexLoader};

/// Returns `true` if `location` should be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Build an index source for `location`.
///
/// `http://` and `https://` URLs use an [`HttpIndexLoader`] with the given
/// timeout and cache; anything else is read as a local file.
pub fn source_for(
    location: &str,
    timeout: Duration,
    cache: Arc<IndexCache>,
) -> Result<Arc<dyn IndexSource>> {
    if is_remote(location) {
        Ok(Arc::new(HttpIndexLoader::with_options(
            location.trim(),
            timeout,
            cache,
        )?))
    } else {
        Ok(Arc::new(FileIndexSource::new(location)))
    }
}

// ============================================================================
// Tests
// ============================================================================
