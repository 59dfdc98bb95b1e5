//! Client-side search for Vitrine galleries.
//!
//! Everything except loading is synchronous and cheap enough to run on every
//! keystroke.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     vitrine-search                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchIndex                                                │
//! │  ├── build_index (one shared in-flight load)                │
//! │  ├── search / search_in_context                             │
//! │  └── get_item / item_count / clear                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SubsequenceMatcher   "fbsd" ~ FreeBSD -> [0, 4, 5, 6]      │
//! │  relevance_score      tight, early matches score highest    │
//! │  to_segments/to_html  one highlight per matched character   │
//! │  sort_by_context_tier current album first, stable           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_search::{SearchIndex, DEFAULT_ROOT_ID, to_html};
//!
//! let index = SearchIndex::new(Arc::new(loader));
//! index.build_index(DEFAULT_ROOT_ID).await;
//!
//! for result in index.search_in_context("harbour", current_album) {
//!     println!("{}", to_html(&result.item.title, "harbour"));
//! }
//! ```

pub mod highlight;
pub mod index;
pub mod matcher;
pub mod scoring;
pub mod tiers;
pub mod types;

mod proptests;

// Re-exports
pub use highlight::{Segment, escape_html, segments_from_indices, to_ansi, to_html, to_segments};
pub use index::{DEFAULT_ROOT_ID, IndexState, SearchIndex};
pub use matcher::{SubsequenceMatch, SubsequenceMatcher, subsequence_match};
pub use scoring::{average_gap, relevance_score};
pub use tiers::{ContextTier, context_tier, sort_by_context_tier};
pub use types::{MatchStrategy, SearchConfig, SearchResult};
