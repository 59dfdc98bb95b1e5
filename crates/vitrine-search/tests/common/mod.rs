//! Common fixtures for Vitrine search integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vitrine_core::{Error, IndexDocument, IndexSource, Result};

/// A small gallery in wire form.
///
/// ```text
/// 7  Gallery
/// ├── 10 Travel
/// │   ├── 11 Norway 2009
/// │   │   ├── 110 Bergen harbour
/// │   │   ├── 111 Fjord cruise
/// │   │   └── 12 Lofoten
/// │   │       └── 120 Harbour at night
/// │   └── 13 Prague
/// │       └── 130 Old Town Square
/// └── 20 Family
///     └── 200 Harbour picnic
/// ```
pub const GALLERY_JSON: &str = r#"{
    "version": 2,
    "generatedAt": "2024-05-01T12:00:00Z",
    "itemCount": 12,
    "items": [
        {"id": 7, "type": "album", "title": "Gallery", "pathComponent": ""},
        {"id": 10, "type": "album", "title": "Travel", "parentId": 7, "pathComponent": "travel"},
        {"id": 11, "type": "album", "title": "Norway 2009", "parentId": 10,
         "pathComponent": "norway_2009", "ancestors": "Travel"},
        {"id": 110, "type": "photo", "title": "Bergen harbour", "parentId": 11,
         "description": "Fishing boats in the morning", "pathComponent": "bergen_harbour",
         "ancestors": "Travel / Norway 2009"},
        {"id": 111, "type": "photo", "title": "Fjord cruise", "parentId": 11,
         "description": "Leaving the harbour", "pathComponent": "fjord_cruise"},
        {"id": 12, "type": "album", "title": "Lofoten", "parentId": 11, "pathComponent": "lofoten"},
        {"id": 120, "type": "Photo", "title": "Harbour at night", "parentId": 12,
         "pathComponent": "harbour_at_night"},
        {"id": 13, "type": "album", "title": "Prague", "parentId": 10, "pathComponent": "prague"},
        {"id": 130, "type": "photo", "title": "Old Town Square", "parentId": 13,
         "description": null, "pathComponent": "old_town_square"},
        {"id": 20, "type": "Album", "title": "Family", "parentId": 7, "pathComponent": "family"},
        {"id": 200, "type": "photo", "title": "Harbour picnic", "parentId": 20,
         "pathComponent": "harbour_picnic"},
        {"id": 201, "type": "photo", "title": "Harbour", "parentId": 20,
         "pathComponent": "harbour"}
    ]
}"#;

/// Parse [`GALLERY_JSON`] the way a loader would.
pub fn gallery() -> Arc<IndexDocument> {
    Arc::new(IndexDocument::from_json("fixture://gallery", GALLERY_JSON).unwrap())
}

/// In-memory [`IndexSource`] that counts loads and can be slowed down.
pub struct FixtureSource {
    outcome: Outcome,
    delay: Duration,
    loads: AtomicUsize,
}

enum Outcome {
    Found(Arc<IndexDocument>),
    Absent,
    Fails,
}

impl FixtureSource {
    /// A source serving `document`.
    pub fn serving(document: Arc<IndexDocument>) -> Self {
        Self::with_outcome(Outcome::Found(document))
    }

    /// A source that finds nothing.
    pub fn absent() -> Self {
        Self::with_outcome(Outcome::Absent)
    }

    /// A source whose every load fails with a network error.
    pub fn failing() -> Self {
        Self::with_outcome(Outcome::Fails)
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            loads: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` inside every load.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of loads started so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexSource for FixtureSource {
    async fn load(&self) -> Result<Option<Arc<IndexDocument>>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.outcome {
            Outcome::Found(document) => Ok(Some(Arc::clone(document))),
            Outcome::Absent => Ok(None),
            Outcome::Fails => Err(Error::network(
                self.location(),
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
            )),
        }
    }

    fn location(&self) -> &str {
        "fixture://gallery"
    }
}
