//! Process-lifetime cache of fetched index documents, keyed by URL.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use vitrine_core::IndexDocument;

/// Outcome remembered for one URL.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// The document was fetched and validated.
    Loaded(Arc<IndexDocument>),
    /// The server answered 404; no index is published there.
    Absent,
}

impl CacheEntry {
    /// The cached document, or `None` for a cached absence.
    pub fn document(&self) -> Option<Arc<IndexDocument>> {
        match self {
            Self::Loaded(document) => Some(Arc::clone(document)),
            Self::Absent => None,
        }
    }
}

/// Shared URL → document cache.
///
/// A URL missing from the cache has not been fetched yet. Failures are never
/// cached, so they are retried on the next load.
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl IndexCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered outcome for `url`, if it was fetched before.
    pub fn get(&self, url: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Remember the outcome for `url`, replacing any previous one.
    pub fn insert(&self, url: impl Into<String>, entry: CacheEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), entry);
    }

    /// Forget `url`, returning what was cached for it.
    pub fn remove(&self, url: &str) -> Option<CacheEntry> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(url)
    }

    /// Forget every URL.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached URLs.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
