//! The index document: the versioned JSON payload produced by the gallery
//! build step and fetched once per process.
//!
//! Validation happens in three stages so callers can tell failures apart:
//!
//! 1. the body must be JSON at all ([`Error::Parse`]),
//! 2. it must carry an integer `version` and an `items` array
//!    ([`Error::Structure`]),
//! 3. every item must match the [`IndexedItem`] shape ([`Error::Structure`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::item::IndexedItem;

/// A parsed, validated search index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    /// Format version written by the build step.
    pub version: u32,

    /// When the build step produced this document.
    ///
    /// Timestamps without a zone are read as UTC; unreadable ones become
    /// `None` rather than rejecting the document.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<DateTime<Utc>>,

    /// Item count as declared by the build step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,

    /// Every searchable album and photo.
    pub items: Vec<IndexedItem>,
}

impl IndexDocument {
    /// Create a document from items, stamping it with the current time.
    pub fn new(version: u32, items: Vec<IndexedItem>) -> Self {
        Self {
            version,
            generated_at: Some(Utc::now()),
            item_count: Some(items.len()),
            items,
        }
    }

    /// Parse and validate a document body.
    ///
    /// `origin` is the URL or path the body came from; it is only used in
    /// error messages and log lines.
    pub fn from_json(origin: &str, body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::parse(origin, e))?;
        Self::from_value(origin, value)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(origin: &str, value: Value) -> Result<Self> {
        check_shape(origin, &value)?;

        let doc: IndexDocument = serde_json::from_value(value)
            .map_err(|e| Error::structure(origin, format!("malformed document: {e}")))?;

        if let Some(declared) = doc.item_count
            && declared != doc.items.len()
        {
            log::warn!(
                "Index document from {origin} declares itemCount={declared} but contains {} items",
                doc.items.len()
            );
        }

        Ok(doc)
    }

    /// Number of albums in the document.
    pub fn album_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.item_type.is_album())
            .count()
    }

    /// Number of photos in the document.
    pub fn photo_count(&self) -> usize {
        self.items.len() - self.album_count()
    }
}

fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => {
            let parsed = parse_timestamp(&text);
            if parsed.is_none() && !text.trim().is_empty() {
                log::warn!("Ignoring unreadable generatedAt {text:?}");
            }
            parsed
        }
        Some(other) => {
            log::warn!("Ignoring non-string generatedAt {other}");
            None
        }
    })
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn check_shape(origin: &str, value: &Value) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return Err(Error::structure(origin, "document is not a JSON object"));
    };

    match obj.get("version") {
        None | Some(Value::Null) => {
            return Err(Error::structure(origin, "missing `version`"));
        }
        Some(v) if !v.is_u64() => {
            return Err(Error::structure(
                origin,
                "`version` must be a non-negative integer",
            ));
        }
        Some(_) => {}
    }

    match obj.get("items") {
        None | Some(Value::Null) => Err(Error::structure(origin, "missing `items`")),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(Error::structure(origin, "`items` must be an array")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    const SAMPLE: &str = r#"{
        "version": 1,
        "generatedAt": "2024-05-01T12:00:00Z",
        "itemCount": 3,
        "items": [
            {"id": 7, "type": "album", "title": "Gallery", "pathComponent": ""},
            {"id": 8, "type": "album", "title": "Travel", "parentId": 7, "pathComponent": "travel"},
            {"id": 9, "type": "photo", "title": "FreeBSD sticker", "parentId": 8,
             "pathComponent": "sticker.jpg", "ancestors": "Travel"}
        ]
    }"#;

    fn structure_message(err: Error) -> String {
        match err {
            Error::Structure { message, .. } => message,
            other => unreachable!("expected Structure error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_valid() {
        let doc = IndexDocument::from_json("index.json", SAMPLE).unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.items.len(), 3);
        assert_eq!(doc.item_count, Some(3));
        assert!(doc.generated_at.is_some());
        assert_eq!(doc.items[2].item_type, ItemType::Photo);
        assert_eq!(doc.album_count(), 2);
        assert_eq!(doc.photo_count(), 1);
    }

    #[test]
    fn test_from_json_invalid_json() {
        let err = IndexDocument::from_json("index.json", "{not json").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_json_not_an_object() {
        let err = IndexDocument::from_json("index.json", "[1, 2, 3]").unwrap_err();
        assert_eq!(structure_message(err), "document is not a JSON object");
    }

    #[test]
    fn test_from_json_missing_version() {
        let err = IndexDocument::from_json("index.json", r#"{"items": []}"#).unwrap_err();
        assert_eq!(structure_message(err), "missing `version`");
    }

    #[test]
    fn test_from_json_bad_version() {
        let err =
            IndexDocument::from_json("index.json", r#"{"version": "one", "items": []}"#)
                .unwrap_err();
        assert!(structure_message(err).contains("`version`"));
    }

    #[test]
    fn test_from_json_missing_items() {
        let err = IndexDocument::from_json("index.json", r#"{"version": 1}"#).unwrap_err();
        assert_eq!(structure_message(err), "missing `items`");
    }

    #[test]
    fn test_from_json_items_not_array() {
        let err = IndexDocument::from_json("index.json", r#"{"version": 1, "items": {}}"#)
            .unwrap_err();
        assert_eq!(structure_message(err), "`items` must be an array");
    }

    #[test]
    fn test_from_json_malformed_item() {
        let body = r#"{"version": 1, "items": [{"id": "seven", "type": "album"}]}"#;
        let err = IndexDocument::from_json("index.json", body).unwrap_err();
        assert!(structure_message(err).starts_with("malformed document"));
    }

    #[test]
    fn test_from_json_optional_header_fields() {
        let doc = IndexDocument::from_json("index.json", r#"{"version": 2, "items": []}"#)
            .unwrap();
        assert!(doc.generated_at.is_none());
        assert!(doc.item_count.is_none());
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_generated_at_accepts_other_iso_forms() {
        let doc_with = |stamp: &str| {
            let body = format!(
                r#"{{"version": 1, "generatedAt": "{stamp}",
                    "items": [{{"id": 1, "type": "photo", "title": "Pier", "pathComponent": "pier"}}]}}"#
            );
            IndexDocument::from_json("index.json", &body).unwrap()
        };

        let noon = "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(doc_with("2024-05-01T12:00:00").generated_at, Some(noon));
        assert_eq!(doc_with("2024-05-01T14:00:00+02:00").generated_at, Some(noon));
        assert_eq!(doc_with("2024-05-01T12:00:00.250").items.len(), 1);

        let midnight = "2024-05-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(doc_with("2024-05-01").generated_at, Some(midnight));
    }

    #[test]
    fn test_generated_at_unreadable_is_ignored() {
        for stamp in [r#""""#, r#""last tuesday""#, "1714564800", "null"] {
            let body = format!(r#"{{"version": 1, "generatedAt": {stamp}, "items": []}}"#);
            let doc = IndexDocument::from_json("index.json", &body).unwrap();
            assert!(doc.generated_at.is_none(), "{stamp}");
        }
    }

    #[test]
    fn test_item_count_mismatch_is_not_an_error() {
        let body = r#"{"version": 1, "itemCount": 10, "items": []}"#;
        let doc = IndexDocument::from_json("index.json", body).unwrap();
        assert_eq!(doc.item_count, Some(10));
    }

    #[test]
    fn test_new_stamps_count() {
        let doc = IndexDocument::new(1, vec![IndexedItem::photo(1, "a")]);
        assert_eq!(doc.item_count, Some(1));
        assert!(doc.generated_at.is_some());

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"itemCount\":1"));
        assert!(json.contains("\"generatedAt\""));
    }
}
