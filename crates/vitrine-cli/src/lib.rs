//! # vitrine-cli
//!
//! The `vitrine` command: search a gallery's published index from the
//! terminal.
//!
//! - `search`, `item`, `stats`: load the index once and query it
//! - `config`: locate, read, edit, and export the TOML configuration

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use config::VitrineConfig;
pub use error::{Error, Result};
