//! HTTP loader for the published search index.
//!
//! | Response              | Result                     | Cached |
//! |-----------------------|----------------------------|--------|
//! | 200 with valid body   | `Ok(Some(document))`       | yes    |
//! | 404                   | `Ok(None)`                 | yes    |
//! | other status          | `Err(Error::Status)`       | no     |
//! | unparseable body      | `Err(Error::Parse)`        | no     |
//! | wrong document shape  | `Err(Error::Structure)`    | no     |
//! | transport or timeout  | `Err(Error::Network)`      | no     |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use vitrine_core::{Error, IndexDocument, IndexSource, Result};

use crate::cache::{CacheEntry, IndexCache};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches one index document from a fixed URL, through an [`IndexCache`].
#[derive(Debug, Clone)]
pub struct HttpIndexLoader {
    url: String,
    client: reqwest::Client,
    cache: Arc<IndexCache>,
}

impl HttpIndexLoader {
    /// Create a loader for `url` with the default timeout and a private cache.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_options(url, DEFAULT_TIMEOUT, Arc::new(IndexCache::new()))
    }

    /// Create a loader with an explicit timeout and a (possibly shared) cache.
    pub fn with_options(
        url: impl Into<String>,
        timeout: Duration,
        cache: Arc<IndexCache>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
            cache,
        })
    }

    /// The index URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The cache this loader reads and fills.
    pub fn cache(&self) -> &Arc<IndexCache> {
        &self.cache
    }

    /// Fetch the document, answering from the cache when possible.
    pub async fn fetch(&self) -> Result<Option<Arc<IndexDocument>>> {
        if let Some(entry) = self.cache.get(&self.url) {
            log::debug!("Search index cache hit for {}", self.url);
            return Ok(entry.document());
        }

        log::info!("Fetching search index from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(&self.url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::info!("No search index published at {} (404)", self.url);
            self.cache.insert(&self.url, CacheEntry::Absent);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::status(&self.url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(&self.url, e))?;
        let document = Arc::new(IndexDocument::from_json(&self.url, &body)?);

        log::info!(
            "Loaded search index from {}: {} items, version {}",
            self.url,
            document.items.len(),
            document.version
        );
        self.cache
            .insert(&self.url, CacheEntry::Loaded(Arc::clone(&document)));
        Ok(Some(document))
    }
}

#[async_trait]
impl IndexSource for HttpIndexLoader {
    async fn load(&self) -> Result<Option<Arc<IndexDocument>>> {
        self.fetch().await
    }

    fn location(&self) -> &str {
        &self.url
    }
}

// ============================================================================
// Tests
// ============================================================================
