//! Index source backed by a local file.
//!
//! Useful for previewing a freshly generated index before publishing it.
//! Validation is identical to the HTTP loader; a missing file means "no
//! index", just like a 404.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use vitrine_core::{Error, IndexDocument, IndexSource, Result};

/// Reads the index document from a path on every load.
#[derive(Debug, Clone)]
pub struct FileIndexSource {
    path: PathBuf,
    location: String,
}

impl FileIndexSource {
    /// Create a source for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IndexSource for FileIndexSource {
    async fn load(&self) -> Result<Option<Arc<IndexDocument>>> {
        let body = match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No search index file at {}", self.location);
                return Ok(None);
            }
            Err(e) => return Err(Error::io_with_path(e, &self.path)),
        };
        let document = IndexDocument::from_json(&self.location, &body)?;
        log::debug!(
            "Read search index from {}: {} items",
            self.location,
            document.items.len()
        );
        Ok(Some(Arc::new(document)))
    }

    fn location(&self) -> &str {
        &self.location
    }
}

// ============================================================================
// Tests
// ============================================================================
