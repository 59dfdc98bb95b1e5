//! Index-backed subcommands: `search`, `item`, and `stats`.
//!
//! Each command renders to a `String`; printing is left to `main`.

use std::sync::Arc;

use serde::Serialize;
use vitrine_client::{IndexCache, source_for};
use vitrine_core::ItemId;
use vitrine_search::{SearchIndex, SearchResult, Segment, escape_html, to_ansi, to_html, to_segments};

use crate::config::VitrineConfig;
use crate::error::{Error, Result};

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line per result with ANSI highlighting.
    #[default]
    Terminal,
    /// An HTML list with `<mark>` highlighting.
    Html,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Pick the format from the `--html` / `--json` flags.
    pub fn from_flags(html: bool, json: bool) -> Self {
        match (html, json) {
            (_, true) => Self::Json,
            (true, false) => Self::Html,
            (false, false) => Self::Terminal,
        }
    }
}

/// Options for [`run_search`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Album being viewed; results inside it rank first.
    pub context: Option<ItemId>,
    /// Print at most this many results.
    pub limit: Option<usize>,
    /// Output format.
    pub format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonHit<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    title_segments: Vec<Segment>,
}

/// Build a search index for `location` using `config`.
///
/// Fails with [`Error::Unavailable`] when the index could not be loaded or
/// holds no items.
pub async fn open_index(config: &VitrineConfig, location: &str) -> Result<SearchIndex> {
    let source = source_for(location, config.index.timeout(), Arc::new(IndexCache::new()))?;
    let index = SearchIndex::with_config(source, config.search.clone());
    index.build_index(config.index.root_id).await;

    if !index.state().is_ready() {
        return Err(Error::Unavailable {
            location: location.to_string(),
        });
    }
    Ok(index)
}

/// Search and render the results.
pub fn run_search(index: &SearchIndex, query: &str, options: &SearchOptions) -> Result<String> {
    let mut results = match options.context {
        Some(context_id) => index.search_in_context(query, context_id),
        None => index.search(query),
    };
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }

    match options.format {
        OutputFormat::Terminal => Ok(render_terminal(&results, query)),
        OutputFormat::Html => Ok(render_html(&results, query)),
        OutputFormat::Json => {
            let hits: Vec<JsonHit<'_>> = results
                .iter()
                .map(|result| JsonHit {
                    result,
                    title_segments: to_segments(&result.item.title, query),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&hits)?)
        }
    }
}

fn render_terminal(results: &[SearchResult], query: &str) -> String {
    if results.is_empty() {
        return format!("No results for {:?}", query.trim());
    }
    results
        .iter()
        .map(|result| {
            let item = &result.item;
            let mut line = format!(
                "{:>6.1}  {:<5}  {:>6}  {}",
                result.score,
                item.item_type,
                item.id,
                to_ansi(&item.title, query)
            );
            if let Some(ancestors) = item.ancestors.as_deref().filter(|a| !a.is_empty()) {
                line.push_str(&format!("  ({ancestors})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_html(results: &[SearchResult], query: &str) -> String {
    let mut html = String::from("<ul class=\"search-results\">\n");
    for result in results {
        let item = &result.item;
        html.push_str(&format!(
            "  <li data-id=\"{}\" data-type=\"{}\"><a href=\"{}\">{}</a></li>\n",
            item.id,
            item.item_type,
            escape_html(&item.path_component),
            to_html(&item.title, query)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Render one item as JSON, or a not-found message.
pub fn run_item(index: &SearchIndex, id: ItemId) -> Result<String> {
    match index.get_item(id) {
        Some(item) => Ok(serde_json::to_string_pretty(&*item)?),
        None => Ok(format!("Item {id} not found")),
    }
}

/// Summarize the loaded index.
pub fn run_stats(index: &SearchIndex, location: &str) -> String {
    let mut lines = vec![
        format!("Index:      {location}"),
        format!("State:      {}", index.state()),
    ];
    if let Some(root_id) = index.root_id() {
        lines.push(format!("Root album: {root_id}"));
    }
    match index.document() {
        Some(document) => {
            lines.push(format!(
                "Items:      {} ({} albums, {} photos)",
                index.item_count(),
                document.album_count(),
                document.photo_count()
            ));
            lines.push(format!("Version:    {}", document.version));
            let generated = document
                .generated_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            lines.push(format!("Generated:  {generated}"));
        }
        None => lines.push(format!("Items:      {}", index.item_count())),
    }
    lines.join("\n")
}

// ============================================================================
// Tests
// ============================================================================
