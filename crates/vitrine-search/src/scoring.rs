//! Relevance scoring for subsequence matches.
//!
//! Tight, early matches score highest: a contiguous match at the start of a
//! title beats the same letters scattered across it. Abbreviation-style
//! queries (initials) still score above zero so they surface at all.

/// Score every valid match starts from.
pub const BASE_SCORE: f64 = 5.0;

/// Bonus when all matched characters are adjacent.
pub const CONTIGUOUS_BONUS: f64 = 10.0;

/// Bonus for an average gap of at most one character.
pub const NEAR_CONTIGUOUS_BONUS: f64 = 7.0;

/// Bonus for an average gap of at most two characters.
pub const CLOSE_BONUS: f64 = 4.0;

/// Bonus for an average gap of at most five characters.
pub const LOOSE_BONUS: f64 = 2.0;

/// Penalty once the average gap exceeds [`SCATTERED_GAP`].
pub const SCATTERED_PENALTY: f64 = 2.0;

/// Average gap beyond which a match counts as scattered.
pub const SCATTERED_GAP: f64 = 10.0;

/// Bonus when the match starts at the first character.
pub const START_BONUS: f64 = 3.0;

/// Bonus when the match starts within the first three characters.
pub const NEAR_START_BONUS: f64 = 1.0;

/// Bonus for queries of at least [`SPECIFIC_QUERY_LEN`] characters.
pub const SPECIFICITY_BONUS: f64 = 1.0;

/// Minimum trimmed query length that earns [`SPECIFICITY_BONUS`].
pub const SPECIFIC_QUERY_LEN: usize = 4;

/// Score a subsequence match.
///
/// Returns `0.0` when `match_indices` is empty, does not have one entry per
/// trimmed query character, or points outside `text`. Never negative.
///
/// # Examples
///
/// ```
/// use vitrine_search::{relevance_score, subsequence_match};
///
/// let tight = subsequence_match("FreeBSD", "free");
/// let loose = subsequence_match("FreeBSD", "fbsd");
/// assert!(
///     relevance_score("FreeBSD", "free", &tight.match_indices)
///         > relevance_score("FreeBSD", "fbsd", &loose.match_indices)
/// );
/// ```
pub fn relevance_score(text: &str, query: &str, match_indices: &[usize]) -> f64 {
    let query_len = query.trim().chars().count();
    if match_indices.is_empty() || match_indices.len() != query_len {
        return 0.0;
    }
    let text_len = text.chars().count();
    if match_indices.iter().any(|&i| i >= text_len) {
        return 0.0;
    }

    let avg_gap = average_gap(match_indices);
    let mut score = BASE_SCORE + tightness_bonus(avg_gap);

    if avg_gap > SCATTERED_GAP {
        score -= SCATTERED_PENALTY;
    }

    score += match match_indices[0] {
        0 => START_BONUS,
        1..=2 => NEAR_START_BONUS,
        _ => 0.0,
    };

    if query_len >= SPECIFIC_QUERY_LEN {
        score += SPECIFICITY_BONUS;
    }

    score.max(0.0)
}

/// Average number of unmatched characters between consecutive positions.
///
/// A single position has no gaps and averages `0.0`.
pub fn average_gap(match_indices: &[usize]) -> f64 {
    if match_indices.len() < 2 {
        return 0.0;
    }
    let total: usize = match_indices
        .windows(2)
        .map(|pair| pair[1].saturating_sub(pair[0]).saturating_sub(1))
        .sum();
    total as f64 / (match_indices.len() - 1) as f64
}

fn tightness_bonus(avg_gap: f64) -> f64 {
    if avg_gap == 0.0 {
        CONTIGUOUS_BONUS
    } else if avg_gap <= 1.0 {
        NEAR_CONTIGUOUS_BONUS
    } else if avg_gap <= 2.0 {
        CLOSE_BONUS
    } else if avg_gap <= 5.0 {
        LOOSE_BONUS
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
