//! Integration tests for the build → search → re-rank → highlight pipeline.

use std::sync::Arc;

use vitrine_core::ItemType;
use vitrine_search::{
    IndexState, MatchStrategy, SearchConfig, SearchIndex, SearchResult, to_html, to_segments,
};

use crate::common::{FixtureSource, gallery};

fn ids(results: &[SearchResult]) -> Vec<u64> {
    results.iter().map(|r| r.item.id).collect()
}

async fn ready_index() -> SearchIndex {
    let index = SearchIndex::new(Arc::new(FixtureSource::serving(gallery())));
    index.build_index(7).await;
    assert_eq!(index.state(), IndexState::Ready);
    index
}

#[tokio::test]
async fn test_fixture_builds_every_item() {
    let index = ready_index().await;
    assert_eq!(index.item_count(), 12);

    let night = index.get_item(120).expect("item 120 should be indexed");
    assert_eq!(night.item_type, ItemType::Photo);
    assert_eq!(night.parent_id, Some(12));

    let square = index.get_item(130).unwrap();
    assert!(square.description.is_empty());

    let document = index.document().unwrap();
    assert_eq!(document.version, 2);
    assert!(document.generated_at.is_some());
    assert_eq!(document.album_count(), 6);
    assert_eq!(document.photo_count(), 6);
}

#[tokio::test]
async fn test_ranking_prefers_exact_then_prefix_titles() {
    let index = ready_index().await;
    let results = index.search("Harbour");

    assert_eq!(ids(&results), vec![201, 120, 200, 110, 111]);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

    let description_only = results.last().unwrap();
    assert!(description_only.matched_in_description);
    assert!(!description_only.matched_in_title);
}

#[tokio::test]
async fn test_context_reranking_keeps_relevance_within_tiers() {
    let index = ready_index().await;
    let results = index.search_in_context("harbour", 11);

    // Children of Norway 2009, then Lofoten below it, then everything else in
    // the original relevance order.
    assert_eq!(ids(&results), vec![110, 111, 120, 201, 200]);
}

#[tokio::test]
async fn test_context_outside_index_leaves_order_unchanged() {
    let index = ready_index().await;
    let plain = index.search("harbour");
    let in_context = index.search_in_context("harbour", 9999);
    assert_eq!(ids(&plain), ids(&in_context));
}

#[tokio::test]
async fn test_highlight_search_results() {
    let index = ready_index().await;
    let results = index.search("harbour");
    let bergen = results.iter().find(|r| r.item.id == 110).unwrap();

    let html = to_html(&bergen.item.title, "harbour");
    assert!(html.starts_with("Bergen <mark>h</mark><mark>a</mark>"));
    assert_eq!(html.matches("<mark>").count(), 7);

    let segments = to_segments(&bergen.item.title, "harbour");
    let rebuilt: String = segments.iter().map(|s| s.text()).collect();
    assert_eq!(rebuilt, bergen.item.title);
}

#[tokio::test]
async fn test_subsequence_strategy_finds_abbreviations() {
    let substring = ready_index().await;
    assert!(substring.search("ots").is_empty());

    let index = SearchIndex::with_config(
        Arc::new(FixtureSource::serving(gallery())),
        SearchConfig {
            strategy: MatchStrategy::Subsequence,
            ..SearchConfig::default()
        },
    );
    index.build_index(7).await;

    let results = index.search("ots");
    assert_eq!(ids(&results), vec![130, 110]);
    assert!(results[0].matched_in_title);
    assert!(results[1].matched_in_description);
    assert!(!results[1].matched_in_title);
}

#[tokio::test]
async fn test_blank_queries_return_nothing() {
    let index = ready_index().await;
    for query in ["", " ", "\t\n"] {
        assert!(index.search(query).is_empty(), "query {query:?}");
    }
}

#[tokio::test]
async fn test_result_cap_holds_for_large_galleries() {
    use vitrine_core::{IndexDocument, IndexedItem};

    let items = (1..=500)
        .map(|id| IndexedItem::photo(id, format!("Harbour {id}")).with_parent(7))
        .collect();
    let source = FixtureSource::serving(Arc::new(IndexDocument::new(1, items)));
    let index = SearchIndex::new(Arc::new(source));
    index.build_index(7).await;

    let results = index.search("harbour");
    assert_eq!(results.len(), 100);
    assert!(results.iter().all(|r| r.score == 13.0));
}
