//! Character-level highlighting of subsequence matches.
//!
//! Matches may be non-adjacent, so every matched character becomes its own
//! highlighted segment rather than one contiguous span.
//!
//! Three renderings share one segmentation:
//!
//! - [`to_segments`]: structured segments for UI components
//! - [`to_html`]: escaped HTML with one `<mark>` per matched character
//! - [`to_ansi`]: terminal output with escape codes around matched characters

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::matcher::subsequence_match;

const ANSI_MARK: &str = "\x1b[1;33m";
const ANSI_RESET: &str = "\x1b[0m";

/// A run of literal text or a single highlighted character.
///
/// Serializes as a bare JSON string for literal runs and as
/// `{"text": "x", "highlight": true}` for highlighted characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Unmatched text, possibly several characters long.
    Text(String),
    /// One matched character.
    Highlight(String),
}

impl Segment {
    /// The segment's text, regardless of highlighting.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Highlight(text) => text,
        }
    }

    /// Returns `true` for highlighted segments.
    pub fn is_highlight(&self) -> bool {
        matches!(self, Self::Highlight(_))
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Highlight(text) => {
                let mut state = serializer.serialize_struct("Segment", 2)?;
                state.serialize_field("text", text)?;
                state.serialize_field("highlight", &true)?;
                state.end()
            }
        }
    }
}

/// Split `text` into literal and highlighted segments for `query`.
///
/// - Empty text yields no segments.
/// - A blank query, or a query that does not match, yields the whole text as
///   a single literal segment.
///
/// Concatenating the segments' text always reproduces `text`.
pub fn to_segments(text: &str, query: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.trim().is_empty() {
        return vec![Segment::Text(text.to_string())];
    }
    let found = subsequence_match(text, query);
    if !found.matched {
        return vec![Segment::Text(text.to_string())];
    }
    segments_from_indices(text, &found.match_indices)
}

/// Segment `text` using precomputed character positions.
///
/// Positions must be strictly increasing; positions past the end of the text
/// are ignored.
pub fn segments_from_indices(text: &str, match_indices: &[usize]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(match_indices.len() * 2 + 1);
    let mut literal = String::new();
    let mut pending = match_indices.iter().copied().peekable();

    for (position, c) in text.chars().enumerate() {
        if pending.peek() == Some(&position) {
            pending.next();
            if !literal.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Highlight(c.to_string()));
        } else {
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }
    segments
}

/// Render `text` as HTML with every matched character wrapped in `<mark>`.
///
/// All text, matched or not, is escaped.
///
/// # Examples
///
/// ```
/// use vitrine_search::to_html;
///
/// assert_eq!(to_html("A&B", "ab"), "<mark>A</mark>&amp;<mark>B</mark>");
/// assert_eq!(to_html("<b>", ""), "&lt;b&gt;");
/// ```
pub fn to_html(text: &str, query: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if query.trim().is_empty() {
        return escape_html(text);
    }
    let mut html = String::with_capacity(text.len() * 2);
    for segment in to_segments(text, query) {
        match segment {
            Segment::Text(literal) => html.push_str(&escape_html(&literal)),
            Segment::Highlight(c) => {
                html.push_str("<mark>");
                html.push_str(&escape_html(&c));
                html.push_str("</mark>");
            }
        }
    }
    html
}

/// Render `text` for a terminal, emphasizing matched characters.
pub fn to_ansi(text: &str, query: &str) -> String {
    to_segments(text, query)
        .iter()
        .map(|segment| match segment {
            Segment::Text(literal) => literal.clone(),
            Segment::Highlight(c) => format!("{ANSI_MARK}{c}{ANSI_RESET}"),
        })
        .collect()
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================
