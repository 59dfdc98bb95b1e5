//! Traits shared across Vitrine crates.
//!
//! - [`IndexSource`]: where a search index document comes from (HTTP, file,
//!   memory). The search crate depends only on this trait.
//! - [`ConfigManager`]: load/locate/serialize a TOML configuration type.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::document::IndexDocument;
use crate::error::{Error, Result};

// ============================================================================
// IndexSource
// ============================================================================

/// A provider of the pre-built index document.
///
/// `Ok(None)` means the document is confirmed absent (e.g. HTTP 404): search
/// is simply unavailable. `Err` means the attempt failed.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Load the index document.
    async fn load(&self) -> Result<Option<Arc<IndexDocument>>>;

    /// URL or path of the document, for diagnostics.
    fn location(&self) -> &str;
}

// ============================================================================
// ConfigManager
// ============================================================================

/// Locate, load, and serialize a project configuration.
///
/// Resolution order for the config file: explicit path, then the
/// `<PROJECT>_CONFIG` environment variable, then
/// `<config_dir>/<project>/config.toml`. A missing file yields the defaults.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Environment variable prefix derived from the project name.
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace(['-', ' '], "_")
    }

    /// Platform default config file location.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file to use.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        let env_key = format!("{}_CONFIG", Self::env_prefix());
        if let Ok(path) = std::env::var(&env_key)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load the configuration, applying environment overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            Some(path) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `<PREFIX>_*` environment overrides. Default: none.
    fn apply_env_overrides(&mut self) -> Result<()> {
        Ok(())
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Render the configuration as `KEY=value` environment variable pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;
}

// ============================================================================
// Tests
// ============================================================================
