//! Matching invariants over random indexes and queries.

use pagesift::{fold_case, matching_positions, search, search_gated, ContentIndex, SearchRecord};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,.-]{0,24}").unwrap()
}

fn index_strategy() -> impl Strategy<Value = ContentIndex> {
    prop::collection::vec((text_strategy(), text_strategy()), 0..8).prop_map(|pairs| {
        ContentIndex::new(
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (title, body))| SearchRecord::new(title, body, format!("s{}", i % 3)))
                .collect(),
        )
    })
}

/// Random ASCII-letter casing of `s`.
fn recase(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, &upper)| {
            if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    /// A record is returned iff its folded title or body contains the folded query.
    #[test]
    fn prop_results_are_exactly_the_matches(index in index_strategy(), query in "[a-zA-Z ]{0,4}") {
        let needle = fold_case(&query);
        let expected: Vec<usize> = index
            .iter()
            .enumerate()
            .filter(|(_, r)| fold_case(&r.title).contains(&needle) || fold_case(&r.body).contains(&needle))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(matching_positions(&index, &query), expected);
    }

    /// Output is strictly increasing: index order, no duplicates.
    #[test]
    fn prop_results_in_index_order(index in index_strategy(), query in "[a-z]{0,3}") {
        let positions = matching_positions(&index, &query);
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Changing the query's letter case never changes the result.
    #[test]
    fn prop_case_invariant(
        index in index_strategy(),
        query in "[a-zA-Z]{1,4}",
        mask in prop::collection::vec(any::<bool>(), 1..4),
    ) {
        let recased = recase(&query, &mask);
        prop_assert_eq!(search(&index, &query), search(&index, &recased));
    }

    /// Any substring of a title finds that record.
    #[test]
    fn prop_title_substring_finds_record(
        index in index_strategy(),
        pick in any::<prop::sample::Index>(),
        start in 0usize..24,
        len in 1usize..6,
    ) {
        prop_assume!(!index.is_empty());
        let position = pick.index(index.len());
        let title: Vec<char> = index.get(position).unwrap().title.chars().collect();
        prop_assume!(start + len <= title.len());
        let query: String = title[start..start + len].iter().collect();
        prop_assert!(matching_positions(&index, &query).contains(&position));
    }

    /// Below the threshold nothing runs; at or above it the gate agrees with search.
    #[test]
    fn prop_gate_consistent_with_search(index in index_strategy(), query in "[a-z]{0,4}", min in 1usize..4) {
        let outcome = search_gated(&index, &query, min);
        if query.chars().count() < min {
            prop_assert!(!outcome.was_searched());
        } else {
            let expected = matching_positions(&index, &query);
            prop_assert_eq!(outcome.positions(), expected.as_slice());
        }
    }

    /// Same index, same query, same answer.
    #[test]
    fn prop_deterministic(index in index_strategy(), query in "[a-z]{0,4}") {
        prop_assert_eq!(search(&index, &query), search(&index, &query));
    }
}
