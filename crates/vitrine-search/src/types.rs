//! Common types for gallery search.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vitrine_core::IndexedItem;

/// How an item qualifies for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Case-insensitive substring containment in title or description.
    #[default]
    Substring,
    /// Case-insensitive subsequence match in title or description; title
    /// matches add their relevance score on top of the title weight.
    Subsequence,
}

/// Search configuration.
///
/// The title weight is meant to dominate the description weight: a title hit
/// should outrank any description-only hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Gating strategy.
    #[serde(default)]
    pub strategy: MatchStrategy,

    /// Maximum number of results returned by a search.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Weight of a title match.
    #[serde(default = "default_title_weight")]
    pub title_weight: f64,

    /// Extra weight when the title equals the query.
    #[serde(default = "default_exact_title_bonus")]
    pub exact_title_bonus: f64,

    /// Extra weight when the title starts with the query.
    #[serde(default = "default_title_prefix_bonus")]
    pub title_prefix_bonus: f64,

    /// Weight of a description match.
    #[serde(default = "default_description_weight")]
    pub description_weight: f64,
}

fn default_max_results() -> usize {
    100
}

fn default_title_weight() -> f64 {
    10.0
}

fn default_exact_title_bonus() -> f64 {
    5.0
}

fn default_title_prefix_bonus() -> f64 {
    3.0
}

fn default_description_weight() -> f64 {
    2.0
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            max_results: default_max_results(),
            title_weight: default_title_weight(),
            exact_title_bonus: default_exact_title_bonus(),
            title_prefix_bonus: default_title_prefix_bonus(),
            description_weight: default_description_weight(),
        }
    }
}

/// A scored match of one item against one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The matched item, shared with the index.
    pub item: Arc<IndexedItem>,
    /// Relevance score; higher is better, never negative.
    pub score: f64,
    /// Whether the query matched the title.
    pub matched_in_title: bool,
    /// Whether the query matched the description.
    pub matched_in_description: bool,
}

// ============================================================================
// Tests
// ============================================================================
