//! Vitrine Core: shared types, traits, and errors.
//!
//! This crate provides the foundational types used across all Vitrine crates.
//! It has no internal Vitrine dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`item`]: Albums and photos as they appear in the index
//! - [`document`]: The wire-format index document and its validation
//! - [`traits`]: [`IndexSource`] and [`ConfigManager`]

pub mod document;
pub mod error;
pub mod item;
pub mod traits;

// Re-export key types at crate root for convenience
pub use document::IndexDocument;
pub use error::{Error, Result};
pub use item::{IndexedItem, ItemId, ItemType};
pub use traits::{ConfigManager, IndexSource};
