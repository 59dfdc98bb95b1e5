//! Searchable gallery entities.
//!
//! An [`IndexedItem`] is one album or photo as it appears in the pre-built
//! search index. Items reference their containing album through `parent_id`;
//! the root album has none.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Numeric identifier of a gallery entity. Stable per entity.
pub type ItemId = u64;

/// Kind of gallery entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// A container of photos and other albums.
    #[serde(alias = "Album")]
    Album,
    /// A single image.
    #[serde(alias = "Photo")]
    Photo,
}

impl ItemType {
    /// Returns `true` for albums.
    pub fn is_album(self) -> bool {
        matches!(self, Self::Album)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Album => "album",
            Self::Photo => "photo",
        })
    }
}

/// One searchable album or photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedItem {
    /// Unique id within one index.
    pub id: ItemId,

    /// Album or photo.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Display title. May be empty.
    #[serde(default, deserialize_with = "empty_if_null")]
    pub title: String,

    /// Free-text description. Omitted on the wire when empty.
    #[serde(
        default,
        deserialize_with = "empty_if_null",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,

    /// Id of the containing album; `None` for the gallery root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ItemId>,

    /// Navigation slug used to build the item's URL.
    #[serde(default, deserialize_with = "empty_if_null")]
    pub path_component: String,

    /// Human-readable ancestor path, e.g. `"Travel / Norway 2009"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<String>,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl IndexedItem {
    /// Create an item with the given id, kind, and title.
    ///
    /// The path component defaults to the lowercased title with whitespace
    /// replaced by underscores.
    pub fn new(id: ItemId, item_type: ItemType, title: impl Into<String>) -> Self {
        let title = title.into();
        let path_component = title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        Self {
            id,
            item_type,
            title,
            description: String::new(),
            parent_id: None,
            path_component,
            ancestors: None,
        }
    }

    /// Create an album.
    pub fn album(id: ItemId, title: impl Into<String>) -> Self {
        Self::new(id, ItemType::Album, title)
    }

    /// Create a photo.
    pub fn photo(id: ItemId, title: impl Into<String>) -> Self {
        Self::new(id, ItemType::Photo, title)
    }

    /// Set the containing album.
    pub fn with_parent(mut self, parent_id: ItemId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the human-readable ancestor path.
    pub fn with_ancestors(mut self, ancestors: impl Into<String>) -> Self {
        self.ancestors = Some(ancestors.into());
        self
    }

    /// Returns `true` if this item is the gallery root (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
