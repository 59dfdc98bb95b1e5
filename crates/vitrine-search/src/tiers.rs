//! Re-ranking by structural distance from the album being viewed.
//!
//! Results inside the current album come first, then results anywhere below
//! it, then everything else. Relevance order is preserved within each tier.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use vitrine_core::{IndexedItem, ItemId};

use crate::types::SearchResult;

/// Relevance bucket relative to a context album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextTier {
    /// Direct child of the context album.
    Child = 1,
    /// Deeper descendant of the context album.
    Descendant = 2,
    /// Unrelated to the context album, or undecidable.
    Other = 3,
}

impl ContextTier {
    /// Numeric tier, 1 through 3.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ContextTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.rank())
    }
}

/// Classify `item` relative to `context_id`.
///
/// The parent chain is walked with `get_item`; the walk stops with
/// [`ContextTier::Other`] when it reaches the root, an unknown id, or an id it
/// has already visited.
pub fn context_tier<F>(item: &IndexedItem, context_id: ItemId, get_item: F) -> ContextTier
where
    F: Fn(ItemId) -> Option<Arc<IndexedItem>>,
{
    let Some(parent_id) = item.parent_id else {
        return ContextTier::Other;
    };
    if parent_id == context_id {
        return ContextTier::Child;
    }

    let mut visited = HashSet::from([item.id, parent_id]);
    let mut current = parent_id;
    loop {
        let Some(ancestor) = get_item(current) else {
            return ContextTier::Other;
        };
        let Some(next) = ancestor.parent_id else {
            return ContextTier::Other;
        };
        if !visited.insert(next) {
            log::debug!("Cycle in parent chain of item {} at {next}", item.id);
            return ContextTier::Other;
        }
        if next == context_id {
            return ContextTier::Descendant;
        }
        current = next;
    }
}

/// Stable-sort `results` by context tier.
///
/// The input is left untouched; the returned list holds the same results with
/// tier 1 first, and the original relative order inside each tier.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vitrine_core::IndexedItem;
/// use vitrine_search::{SearchResult, sort_by_context_tier};
///
/// let result = |item: IndexedItem| SearchResult {
///     item: Arc::new(item),
///     score: 10.0,
///     matched_in_title: true,
///     matched_in_description: false,
/// };
/// let results = vec![
///     result(IndexedItem::photo(1, "Elsewhere").with_parent(99)),
///     result(IndexedItem::photo(2, "Inside").with_parent(7)),
/// ];
///
/// let sorted = sort_by_context_tier(&results, 7, |_| None);
/// assert_eq!(sorted[0].item.id, 2);
/// assert_eq!(sorted[1].item.id, 1);
/// ```
pub fn sort_by_context_tier<F>(
    results: &[SearchResult],
    context_id: ItemId,
    get_item: F,
) -> Vec<SearchResult>
where
    F: Fn(ItemId) -> Option<Arc<IndexedItem>>,
{
    let mut tiered: Vec<(ContextTier, &SearchResult)> = results
        .iter()
        .map(|result| (context_tier(&result.item, context_id, &get_item), result))
        .collect();
    tiered.sort_by_key(|(tier, _)| *tier);
    tiered.into_iter().map(|(_, result)| result.clone()).collect()
}

// ============================================================================
// Tests
// ============================================================================
