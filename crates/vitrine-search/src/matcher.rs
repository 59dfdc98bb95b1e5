//! Case-insensitive subsequence matching.
//!
//! A query matches a text when every query character appears in the text in
//! the same order, not necessarily adjacent: `"fbsd"` matches `"FreeBSD"` at
//! positions `[0, 4, 5, 6]`.
//!
//! The match is located with a lazy pattern (`f.*?b.*?s.*?d`), which yields
//! the leftmost occurrence with the shortest span from that start. That span
//! is then re-walked to assign one position per query character. Positions are
//! character (not byte) offsets into the original text.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Outcome of matching one text against one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsequenceMatch {
    /// Whether every query character was found in order.
    pub matched: bool,
    /// Character positions of the matched characters; strictly increasing.
    pub match_indices: Vec<usize>,
}

impl SubsequenceMatch {
    fn none() -> Self {
        Self::default()
    }
}

/// A compiled query, reusable across many texts.
///
/// Compiling once per query matters when the same query runs against every
/// title and description in the index.
#[derive(Debug, Clone)]
pub struct SubsequenceMatcher {
    query: Vec<char>,
    pattern: Option<Regex>,
}

impl SubsequenceMatcher {
    /// Compile a matcher for `query`. Surrounding whitespace is ignored.
    pub fn new(query: &str) -> Self {
        let query: Vec<char> = query.trim().chars().collect();
        let pattern = build_pattern(&query);
        Self { query, pattern }
    }

    /// Number of characters in the trimmed query.
    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Returns `true` if the trimmed query is empty; such a matcher never matches.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Match the compiled query against `text`.
    pub fn find(&self, text: &str) -> SubsequenceMatch {
        if text.is_empty() || self.query.is_empty() {
            return SubsequenceMatch::none();
        }
        if self.query.len() > text.chars().count() {
            return SubsequenceMatch::none();
        }
        let Some(pattern) = &self.pattern else {
            return SubsequenceMatch::none();
        };
        let Some(found) = pattern.find(text) else {
            return SubsequenceMatch::none();
        };

        let span_start = text[..found.start()].chars().count();
        let mut wanted = self.query.iter().copied().peekable();
        let mut match_indices = Vec::with_capacity(self.query.len());

        for (offset, c) in found.as_str().chars().enumerate() {
            let Some(&next) = wanted.peek() else {
                break;
            };
            if chars_eq_ignore_case(c, next) {
                match_indices.push(span_start + offset);
                wanted.next();
            }
        }

        // The pattern and the walk fold case independently; never hand a
        // partial assignment to scoring or highlighting.
        if match_indices.len() != self.query.len() {
            log::debug!(
                "Discarding inconsistent subsequence match for {:?} in {text:?}",
                self.query.iter().collect::<String>()
            );
            return SubsequenceMatch::none();
        }

        SubsequenceMatch {
            matched: true,
            match_indices,
        }
    }
}

/// Match `query` against `text` in one call.
///
/// Empty text, a blank query, or a query longer than the text never match.
///
/// # Examples
///
/// ```
/// use vitrine_search::subsequence_match;
///
/// let m = subsequence_match("FreeBSD", "fbsd");
/// assert!(m.matched);
/// assert_eq!(m.match_indices, vec![0, 4, 5, 6]);
///
/// assert!(!subsequence_match("FreeBSD", "dsbf").matched);
/// ```
pub fn subsequence_match(text: &str, query: &str) -> SubsequenceMatch {
    SubsequenceMatcher::new(query).find(text)
}

/// Build `q0.*?q1.*?...` with every query character escaped.
fn build_pattern(query: &[char]) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(query.len() * 6);
    let mut buf = [0u8; 4];
    for (i, c) in query.iter().enumerate() {
        if i > 0 {
            pattern.push_str(".*?");
        }
        pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }
    match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("Could not compile subsequence pattern: {e}");
            None
        }
    }
}

/// Case-insensitive comparison of two characters.
pub(crate) fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

// ============================================================================
// Tests
// ============================================================================
