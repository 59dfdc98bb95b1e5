//! Command-line arguments.

use clap::{Parser, Subcommand};
use vitrine_core::ItemId;

const VITRINE_TARGETS: [&str; 4] = ["vitrine_core", "vitrine_search", "vitrine_client", "vitrine_cli"];

/// Vitrine - search a static photo gallery's index from the terminal
#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
#[command(about = "Search a static photo gallery's index", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Index URL or file path (overrides the configured one)
    #[arg(short, long, global = true)]
    pub index: Option<String>,

    /// Enable debug logging for Vitrine crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Search titles and descriptions
    Search {
        /// Free-text query
        query: String,

        /// Album being viewed; its contents rank first
        #[arg(long)]
        context: Option<ItemId>,

        /// Maximum number of results to print
        #[arg(long)]
        limit: Option<usize>,

        /// Print HTML with <mark> highlights
        #[arg(long, conflicts_with = "json")]
        html: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one item as JSON
    Item {
        /// Item id
        id: ItemId,
    },

    /// Show index statistics
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key (e.g. `index.url`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config location)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=value` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}

impl Cli {
    /// Tracing filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self, configured_level: &str) -> String {
        let level = if configured_level.trim().is_empty() {
            "info"
        } else {
            configured_level.trim()
        };
        if !self.verbose {
            return level.to_string();
        }
        let mut filter = level.to_string();
        for target in VITRINE_TARGETS {
            filter.push_str(&format!(",{target}=debug"));
        }
        filter
    }
}

// ============================================================================
// Tests
// ============================================================================
