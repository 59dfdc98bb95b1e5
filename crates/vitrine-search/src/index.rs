//! In-memory search index with a shared, one-time build.
//!
//! [`SearchIndex`] is a cheap-to-clone handle. The first [`SearchIndex::build_index`]
//! call starts exactly one load from its [`IndexSource`]; concurrent callers
//! await the same in-flight future. A failed or absent load leaves the index
//! empty ("search unavailable") and releases the in-flight handle, so a later
//! build may try again.
//!
//! Lock order is `pending` before `state`. Neither lock is held across an
//! `.await`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use vitrine_core::{IndexDocument, IndexSource, IndexedItem, ItemId, Result};

use crate::matcher::SubsequenceMatcher;
use crate::scoring::relevance_score;
use crate::tiers::sort_by_context_tier;
use crate::types::{MatchStrategy, SearchConfig, SearchResult};

/// Root album id of the legacy gallery, used when none is configured.
pub const DEFAULT_ROOT_ID: ItemId = 7;

type SharedBuild = Shared<BoxFuture<'static, ()>>;

// ============================================================================
// IndexState
// ============================================================================

/// Lifecycle of a [`SearchIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexState {
    /// Never built, or cleared.
    #[default]
    Empty,
    /// A load is in flight.
    Building,
    /// Populated and searchable.
    Ready,
    /// The last load failed, found nothing, or held no items.
    Unavailable,
}

impl IndexState {
    /// Returns `true` if searches can return results.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Building => write!(f, "building"),
            Self::Ready => write!(f, "ready"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

// ============================================================================
// SearchIndex
// ============================================================================

/// Searchable map of gallery items, loaded once from an [`IndexSource`].
#[derive(Clone)]
pub struct SearchIndex {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn IndexSource>,
    config: SearchConfig,
    state: RwLock<Loaded>,
    pending: Mutex<Pending>,
}

#[derive(Default)]
struct Loaded {
    items: HashMap<ItemId, Arc<IndexedItem>>,
    document: Option<Arc<IndexDocument>>,
    root_id: Option<ItemId>,
    status: IndexState,
}

#[derive(Default)]
struct Pending {
    /// Bumped by `clear()`; loads started under an older generation are discarded.
    generation: u64,
    next_build: u64,
    in_flight: Option<InFlight>,
}

struct InFlight {
    id: u64,
    future: SharedBuild,
}

impl SearchIndex {
    /// Create an empty index over `source` with default settings.
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self::with_config(source, SearchConfig::default())
    }

    /// Create an empty index over `source` with custom settings.
    pub fn with_config(source: Arc<dyn IndexSource>, config: SearchConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                state: RwLock::new(Loaded::default()),
                pending: Mutex::new(Pending::default()),
            }),
        }
    }

    /// Search settings in effect.
    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    /// Populate the index for the gallery rooted at `root_id`.
    ///
    /// Returns immediately once the index holds items. Load failures are
    /// logged, never returned: the index simply stays empty.
    pub async fn build_index(&self, root_id: ItemId) {
        let build = {
            let mut pending = self.inner.lock_pending();
            if self.item_count() > 0 {
                return;
            }
            match &pending.in_flight {
                Some(in_flight) => in_flight.future.clone(),
                None => {
                    let id = pending.next_build;
                    pending.next_build += 1;
                    let generation = pending.generation;
                    let future = Arc::clone(&self.inner)
                        .run_build(id, generation, root_id)
                        .boxed()
                        .shared();
                    pending.in_flight = Some(InFlight {
                        id,
                        future: future.clone(),
                    });
                    self.inner.write_state().status = IndexState::Building;
                    future
                }
            }
        };
        build.await;
    }

    /// Rank every item against `query`.
    ///
    /// A blank query, or an empty index, yields no results. Results are
    /// ordered by score (descending), then title (case-insensitive, then
    /// ordinal), then id, and capped at the configured maximum.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let config = &self.inner.config;
        let matcher = match config.strategy {
            MatchStrategy::Substring => None,
            MatchStrategy::Subsequence => Some(SubsequenceMatcher::new(query)),
        };

        let mut results: Vec<SearchResult> = {
            let state = self.inner.read_state();
            state
                .items
                .values()
                .filter_map(|item| match &matcher {
                    None => score_substring(item, &normalized, config),
                    Some(matcher) => score_subsequence(item, query, &normalized, matcher, config),
                })
                .collect()
        };

        results.sort_by(compare_results);
        results.truncate(config.max_results);
        log::debug!("Search {query:?} returned {} results", results.len());
        results
    }

    /// [`search`](Self::search), then group results by structural distance
    /// from `context_id`.
    pub fn search_in_context(&self, query: &str, context_id: ItemId) -> Vec<SearchResult> {
        let results = self.search(query);
        sort_by_context_tier(&results, context_id, |id| self.get_item(id))
    }

    /// Look up one item by id.
    pub fn get_item(&self, id: ItemId) -> Option<Arc<IndexedItem>> {
        self.inner.read_state().items.get(&id).cloned()
    }

    /// Number of items in the index.
    pub fn item_count(&self) -> usize {
        self.inner.read_state().items.len()
    }

    /// Returns `true` if the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Root album id of the last completed build.
    pub fn root_id(&self) -> Option<ItemId> {
        self.inner.read_state().root_id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IndexState {
        self.inner.read_state().status
    }

    /// The document the index was built from, if any.
    pub fn document(&self) -> Option<Arc<IndexDocument>> {
        self.inner.read_state().document.clone()
    }

    /// Empty the index and forget any in-flight build.
    ///
    /// A load still running when this is called completes without effect.
    pub fn clear(&self) {
        let mut pending = self.inner.lock_pending();
        pending.generation += 1;
        pending.in_flight = None;
        *self.inner.write_state() = Loaded::default();
        log::debug!("Search index cleared");
    }
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.read_state();
        f.debug_struct("SearchIndex")
            .field("source", &self.inner.source.location())
            .field("state", &state.status)
            .field("items", &state.items.len())
            .field("root_id", &state.root_id)
            .finish()
    }
}

impl Inner {
    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, Loaded> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, Loaded> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_build(self: Arc<Self>, id: u64, generation: u64, root_id: ItemId) {
        log::info!(
            "Building search index for root {root_id} from {}",
            self.source.location()
        );
        let outcome = self.source.load().await;
        self.finish_build(id, generation, root_id, outcome);
    }

    fn finish_build(
        &self,
        id: u64,
        generation: u64,
        root_id: ItemId,
        outcome: Result<Option<Arc<IndexDocument>>>,
    ) {
        let mut pending = self.lock_pending();
        if pending.in_flight.as_ref().is_some_and(|f| f.id == id) {
            pending.in_flight = None;
        }
        if pending.generation != generation {
            log::debug!("Discarding search index load superseded by clear()");
            return;
        }

        let location = self.source.location();
        let loaded = match outcome {
            Ok(Some(document)) => Loaded::from_document(document, root_id, location),
            Ok(None) => {
                log::warn!("No search index at {location}; search unavailable");
                Loaded::unavailable(root_id)
            }
            Err(e) => {
                log::warn!("Failed to load search index from {location}: {e}; search unavailable");
                Loaded::unavailable(root_id)
            }
        };
        *self.write_state() = loaded;
    }
}

impl Loaded {
    fn from_document(document: Arc<IndexDocument>, root_id: ItemId, location: &str) -> Self {
        let mut items = HashMap::with_capacity(document.items.len());
        for item in &document.items {
            if items.insert(item.id, Arc::new(item.clone())).is_some() {
                log::warn!("Duplicate item id {} in {location}; keeping the last", item.id);
            }
        }

        let status = if items.is_empty() {
            log::warn!("Search index at {location} has no items; search unavailable");
            IndexState::Unavailable
        } else {
            log::info!(
                "Search index ready: {} items (version {}, root {root_id})",
                items.len(),
                document.version
            );
            IndexState::Ready
        };

        Self {
            items,
            document: Some(document),
            root_id: Some(root_id),
            status,
        }
    }

    fn unavailable(root_id: ItemId) -> Self {
        Self {
            root_id: Some(root_id),
            status: IndexState::Unavailable,
            ..Self::default()
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

fn title_bonus(title_lower: &str, normalized: &str, config: &SearchConfig) -> f64 {
    let mut bonus = 0.0;
    if title_lower == normalized {
        bonus += config.exact_title_bonus;
    }
    if title_lower.starts_with(normalized) {
        bonus += config.title_prefix_bonus;
    }
    bonus
}

fn score_substring(
    item: &Arc<IndexedItem>,
    normalized: &str,
    config: &SearchConfig,
) -> Option<SearchResult> {
    let title = item.title.to_lowercase();
    let matched_in_title = title.contains(normalized);
    let matched_in_description =
        !item.description.is_empty() && item.description.to_lowercase().contains(normalized);
    if !matched_in_title && !matched_in_description {
        return None;
    }

    let mut score = 0.0;
    if matched_in_title {
        score += config.title_weight + title_bonus(&title, normalized, config);
    }
    if matched_in_description {
        score += config.description_weight;
    }

    Some(SearchResult {
        item: Arc::clone(item),
        score,
        matched_in_title,
        matched_in_description,
    })
}

fn score_subsequence(
    item: &Arc<IndexedItem>,
    query: &str,
    normalized: &str,
    matcher: &SubsequenceMatcher,
    config: &SearchConfig,
) -> Option<SearchResult> {
    let in_title = matcher.find(&item.title);
    let in_description = matcher.find(&item.description);
    if !in_title.matched && !in_description.matched {
        return None;
    }

    let mut score = 0.0;
    if in_title.matched {
        let title = item.title.to_lowercase();
        score += config.title_weight
            + relevance_score(&item.title, query, &in_title.match_indices)
            + title_bonus(&title, normalized, config);
    }
    if in_description.matched {
        score += config.description_weight
            + relevance_score(&item.description, query, &in_description.match_indices);
    }

    Some(SearchResult {
        item: Arc::clone(item),
        score,
        matched_in_title: in_title.matched,
        matched_in_description: in_description.matched,
    })
}

fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.item.title.to_lowercase().cmp(&b.item.title.to_lowercase()))
        .then_with(|| a.item.title.cmp(&b.item.title))
        .then_with(|| a.item.id.cmp(&b.item.id))
}

// ============================================================================
// Tests
// ============================================================================
