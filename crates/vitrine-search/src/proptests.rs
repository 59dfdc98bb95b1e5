//! Property-based tests for matching, scoring, highlighting, and tier sorting.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use proptest::prelude::*;
    use vitrine_core::{IndexedItem, ItemId};

    use crate::highlight::to_segments;
    use crate::matcher::{chars_eq_ignore_case, subsequence_match};
    use crate::scoring::relevance_score;
    use crate::tiers::{context_tier, sort_by_context_tier};
    use crate::types::SearchResult;

    fn spread(count: usize, gap: usize) -> Vec<usize> {
        (0..count).map(|i| i * (gap + 1)).collect()
    }

    fn results_for(parents: &[Option<ItemId>]) -> Vec<SearchResult> {
        parents
            .iter()
            .enumerate()
            .map(|(id, parent)| {
                let mut item = IndexedItem::album(id as ItemId, format!("Album {id}"));
                item.parent_id = *parent;
                SearchResult {
                    item: Arc::new(item),
                    score: 1.0,
                    matched_in_title: true,
                    matched_in_description: false,
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn test_match_indices_are_consistent(
            text in "[a-zA-Z ]{0,30}",
            query in "[a-zA-Z]{0,6}",
        ) {
            let found = subsequence_match(&text, &query);
            if found.matched {
                let chars: Vec<char> = text.chars().collect();
                let wanted: Vec<char> = query.trim().chars().collect();
                prop_assert_eq!(found.match_indices.len(), wanted.len());
                prop_assert!(found.match_indices.windows(2).all(|w| w[0] < w[1]));
                for (&i, &q) in found.match_indices.iter().zip(&wanted) {
                    prop_assert!(chars_eq_ignore_case(chars[i], q));
                }
            } else {
                prop_assert!(found.match_indices.is_empty());
            }
        }

        #[test]
        fn test_any_subsequence_matches(
            text in "[a-z]{1,30}",
            mask in proptest::collection::vec(any::<bool>(), 30),
        ) {
            let query: String = text
                .chars()
                .zip(&mask)
                .filter_map(|(c, &keep)| keep.then_some(c.to_ascii_uppercase()))
                .collect();
            prop_assume!(!query.is_empty());
            prop_assert!(subsequence_match(&text, &query).matched);
        }

        #[test]
        fn test_segments_reconstruct_text(text in "\\PC{0,40}", query in "\\PC{0,5}") {
            let rebuilt: String = to_segments(&text, &query)
                .iter()
                .map(|segment| segment.text())
                .collect();
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn test_score_non_increasing_with_gap(
            count in 2usize..8,
            gap in 0usize..15,
            extra in 0usize..15,
        ) {
            let query = "q".repeat(count);
            let text = "x".repeat(count * (gap + extra + 1) + 1);
            let tight = relevance_score(&text, &query, &spread(count, gap));
            let loose = relevance_score(&text, &query, &spread(count, gap + extra));
            prop_assert!(tight >= loose);
        }

        #[test]
        fn test_score_bounds(text in "[a-z ]{1,40}", query in "[a-z]{1,6}") {
            let found = subsequence_match(&text, &query);
            let score = relevance_score(&text, &query, &found.match_indices);
            prop_assert!((0.0..=19.0).contains(&score));
            if found.matched {
                prop_assert!(score > 0.0);
            }
        }

        #[test]
        fn test_tier_sort_is_stable_and_idempotent(
            parents in proptest::collection::vec(
                proptest::option::of(0u64..12),
                0..12,
            ),
            context_id in 0u64..12,
        ) {
            let results = results_for(&parents);
            let lookup: HashMap<ItemId, Arc<IndexedItem>> = results
                .iter()
                .map(|r| (r.item.id, Arc::clone(&r.item)))
                .collect();
            let get_item = |id: ItemId| lookup.get(&id).cloned();

            let once = sort_by_context_tier(&results, context_id, get_item);
            let twice = sort_by_context_tier(&once, context_id, get_item);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.len(), results.len());

            // Ids equal original positions, so stability means ids ascend
            // within each tier.
            for pair in once.windows(2) {
                let a = context_tier(&pair[0].item, context_id, get_item);
                let b = context_tier(&pair[1].item, context_id, get_item);
                prop_assert!(a <= b);
                if a == b {
                    prop_assert!(pair[0].item.id < pair[1].item.id);
                }
            }
        }
    }
}
