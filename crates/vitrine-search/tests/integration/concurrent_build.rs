//! Integration tests for the shared, one-time index build.

use std::sync::Arc;
use std::time::Duration;

use vitrine_search::{IndexState, SearchIndex};

use crate::common::{FixtureSource, gallery};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_builds_load_once() {
    let source = Arc::new(FixtureSource::serving(gallery()).delayed(Duration::from_millis(50)));
    let index = SearchIndex::new(source.clone());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let index = index.clone();
            tokio::spawn(async move { index.build_index(7).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(source.loads(), 1);
    assert_eq!(index.item_count(), 12);

    index.build_index(7).await;
    assert_eq!(source.loads(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_failures_share_one_attempt() {
    let source = Arc::new(FixtureSource::failing().delayed(Duration::from_millis(50)));
    let index = SearchIndex::new(source.clone());

    let first = index.clone();
    let second = index.clone();
    tokio::join!(first.build_index(7), second.build_index(7));
    assert_eq!(source.loads(), 1);
    assert_eq!(index.state(), IndexState::Unavailable);
    assert!(index.search("harbour").is_empty());

    // The failed attempt is not remembered; a later build tries again.
    index.build_index(7).await;
    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn test_absent_index_degrades_quietly() {
    let source = Arc::new(FixtureSource::absent());
    let index = SearchIndex::new(source.clone());
    index.build_index(7).await;

    assert!(index.is_empty());
    assert_eq!(index.state(), IndexState::Unavailable);
    assert_eq!(index.root_id(), Some(7));
    assert!(index.search("harbour").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_clear_during_build_discards_result() {
    let source = Arc::new(FixtureSource::serving(gallery()).delayed(Duration::from_secs(5)));
    let index = SearchIndex::new(source.clone());

    let build = index.build_index(7);
    tokio::pin!(build);
    assert!(futures::poll!(&mut build).is_pending());
    assert_eq!(index.state(), IndexState::Building);

    index.clear();
    build.await;

    assert!(index.is_empty());
    assert_eq!(index.state(), IndexState::Empty);

    index.build_index(7).await;
    assert_eq!(index.item_count(), 12);
    assert_eq!(source.loads(), 2);
}

#[tokio::test]
async fn test_cancelled_caller_does_not_strand_build() {
    let source = Arc::new(FixtureSource::serving(gallery()).delayed(Duration::from_millis(20)));
    let index = SearchIndex::new(source.clone());

    {
        let build = index.build_index(7);
        tokio::pin!(build);
        assert!(futures::poll!(&mut build).is_pending());
    }

    index.build_index(7).await;
    assert_eq!(index.item_count(), 12);
    assert_eq!(source.loads(), 1);
}
