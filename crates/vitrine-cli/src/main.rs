//! `vitrine` entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vitrine_cli::cli::{Cli, Command};
use vitrine_cli::commands::{OutputFormat, SearchOptions, open_index, run_item, run_search, run_stats};
use vitrine_cli::config_handlers::handle_config_command;
use vitrine_cli::VitrineConfig;
use vitrine_core::ConfigManager;
use vitrine_search::SearchIndex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = VitrineConfig::load(cli.config.as_deref());

    // Initialize logging
    let configured_level = loaded
        .as_ref()
        .map(|config| config.log_level.as_str())
        .unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter(configured_level).into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Config { action } => {
            handle_config_command(cli.config.as_deref(), action)?;
        }
        Command::Search {
            query,
            context,
            limit,
            html,
            json,
        } => {
            let (index, _) = open(loaded, cli.index).await?;
            let options = SearchOptions {
                context,
                limit,
                format: OutputFormat::from_flags(html, json),
            };
            println!("{}", run_search(&index, &query, &options)?);
        }
        Command::Item { id } => {
            let (index, _) = open(loaded, cli.index).await?;
            println!("{}", run_item(&index, id)?);
        }
        Command::Stats => {
            let (index, location) = open(loaded, cli.index).await?;
            println!("{}", run_stats(&index, &location));
        }
    }
    Ok(())
}

async fn open(
    loaded: vitrine_core::Result<VitrineConfig>,
    index_override: Option<String>,
) -> anyhow::Result<(SearchIndex, String)> {
    let config = loaded.context("Failed to load configuration")?;
    let location = index_override.unwrap_or_else(|| config.index.url.clone());
    tracing::debug!(location = %location, root_id = config.index.root_id, "Opening search index");
    let index = open_index(&config, &location).await?;
    Ok((index, location))
}
