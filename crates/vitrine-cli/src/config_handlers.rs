//! Handlers for the `config` subcommands.
//!
//! The handlers are generic over any [`ConfigManager`] and return the text to
//! print, so the dispatch in [`handle_config_command`] is the only place that
//! writes to stdout.

use std::path::PathBuf;

use vitrine_core::{ConfigManager, Error, Result};

use crate::cli::ConfigAction;
use crate::config::VitrineConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a `config` subcommand against [`VitrineConfig`] and print its output.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let output = match action {
        ConfigAction::Path => {
            let (path, exists) = cmd_config_path::<VitrineConfig>(config_path)?;
            if !exists {
                eprintln!(
                    "(file does not exist; run `{} config init` to create it)",
                    VitrineConfig::project_name()
                );
            }
            path.display().to_string()
        }
        ConfigAction::Get { key } => cmd_config_get::<VitrineConfig>(config_path, &key)?,
        ConfigAction::Set { key, value } => {
            cmd_config_set::<VitrineConfig>(config_path, &key, &value)?
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init::<VitrineConfig>(file.as_deref().or(config_path), force)?
        }
        ConfigAction::Export { docker_env } => {
            let config = VitrineConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)?
        }
    };
    println!("{output}");
    Ok(())
}

// ============================================================================
// Generic command handlers
// ============================================================================

/// Resolve the config file path and whether it exists.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<(PathBuf, bool)> {
    let path = C::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    let exists = path.exists();
    Ok((path, exists))
}

/// Read one value by dotted key from the effective configuration.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set one value by dotted key in the config file.
///
/// The edited file must still deserialize as `C`; otherwise nothing is
/// written.
pub fn cmd_config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<String> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;
    let _: C = doc
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    log::debug!("Updated {key} in {}", path.display());
    Ok(format!("Set {key} = {value} in {}", path.display()))
}

/// Write a default configuration file.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<String> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = C::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Config file created at {}", path.display()))
}

/// Render the configuration as environment variables, one per line.
pub fn cmd_config_export<C: ConfigManager>(config: &C, docker_env: bool) -> Result<String> {
    let lines: Vec<String> = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
