//! Configuration for the `vitrine` binary.
//!
//! ```toml
//! log_level = "info"
//!
//! [index]
//! url = "https://photos.example.org/search-index.json"
//! timeout_secs = 30
//! root_id = 7
//!
//! [search]
//! strategy = "substring"
//! max_results = 100
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_core::{ConfigManager, Error, ItemId, Result};
use vitrine_search::{DEFAULT_ROOT_ID, SearchConfig};

/// Where the index lives and how to fetch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index URL (`http://`/`https://`) or local file path.
    #[serde(default = "default_url")]
    pub url: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Root album the index is built for.
    #[serde(default = "default_root_id")]
    pub root_id: ItemId,
}

fn default_url() -> String {
    "search-index.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_root_id() -> ItemId {
    DEFAULT_ROOT_ID
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
            root_id: default_root_id(),
        }
    }
}

impl IndexConfig {
    /// The request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Complete `vitrine` configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Index location settings.
    #[serde(default)]
    pub index: IndexConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            index: IndexConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl VitrineConfig {
    /// Apply `VITRINE_*` overrides from `lookup`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = Self::env_prefix();
        let var = |name: &str| {
            let key = format!("{prefix}_{name}");
            lookup(&key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key, value))
        };

        if let Some((_, url)) = var("INDEX_URL") {
            self.index.url = url;
        }
        if let Some((key, value)) = var("INDEX_TIMEOUT_SECS") {
            self.index.timeout_secs = parse_number(&key, &value)?;
        }
        if let Some((key, value)) = var("ROOT_ID") {
            self.index.root_id = parse_number(&key, &value)?;
        }
        if let Some((key, value)) = var("MAX_RESULTS") {
            self.search.max_results = parse_number(&key, &value)?;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{key} must be a non-negative integer, got {value:?}")))
}

impl ConfigManager for VitrineConfig {
    fn project_name() -> &'static str {
        "vitrine"
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let prefix = Self::env_prefix();
        Ok(vec![
            (format!("{prefix}_INDEX_URL"), self.index.url.clone()),
            (
                format!("{prefix}_INDEX_TIMEOUT_SECS"),
                self.index.timeout_secs.to_string(),
            ),
            (format!("{prefix}_ROOT_ID"), self.index.root_id.to_string()),
            (
                format!("{prefix}_MAX_RESULTS"),
                self.search.max_results.to_string(),
            ),
        ])
    }
}

// ============================================================================
// Tests
// ============================================================================
