// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query matching over a [`ContentIndex`].
//!
//! A record matches when the case-folded
//! query is a substring of its case-folded title or its case-folded body.
//! Results keep index order. There is no scoring, so there is nothing to
//! tie-break and nothing to deduplicate (records are unique per index).
//!
//! # Two kinds of "nothing"
//!
//! [`SearchOutcome::NotSearched`] and an empty [`SearchOutcome::Searched`]
//! look alike but render differently. The first hides the results panel, the
//! second shows "No results found". Only the minimum-length gate produces
//! `NotSearched`; [`search`] itself always searches.

use crate::index::ContentIndex;
use crate::types::SearchRecord;
use crate::utils::{fold_case, query_len};

/// What happened when a query was put to the index.
///
/// Results are carried as positions into the index so the outcome can outlive
/// a borrow of it (the controller keeps the last outcome between events).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// The query was below the minimum length; no search ran.
    #[default]
    NotSearched,
    /// The query ran. Positions are in index order and may be empty.
    Searched(Vec<usize>),
}

impl SearchOutcome {
    pub fn was_searched(&self) -> bool {
        matches!(self, SearchOutcome::Searched(_))
    }

    /// Matching positions, empty when nothing was searched.
    pub fn positions(&self) -> &[usize] {
        match self {
            SearchOutcome::NotSearched => &[],
            SearchOutcome::Searched(positions) => positions,
        }
    }

    /// Resolve positions back to records.
    pub fn records<'a>(&'a self, index: &'a ContentIndex) -> impl Iterator<Item = &'a SearchRecord> + 'a {
        self.positions()
            .iter()
            .filter_map(move |&position| index.get(position))
    }
}

/// Positions of every record matching `query`, in index order.
///
/// Total over all strings. The empty query is a substring of everything, so
/// it matches every record; callers that do not want that must gate first.
pub fn matching_positions(index: &ContentIndex, query: &str) -> Vec<usize> {
    let needle = fold_case(query);
    (0..index.len())
        .filter(|&position| {
            index
                .folded(position)
                .is_some_and(|(title, body)| title.contains(&needle) || body.contains(&needle))
        })
        .collect()
}

/// Records matching `query`, in index order.
pub fn search<'a>(index: &'a ContentIndex, query: &str) -> Vec<&'a SearchRecord> {
    matching_positions(index, query)
        .into_iter()
        .filter_map(|position| index.get(position))
        .collect()
}

/// Apply the minimum-length gate, then search.
///
/// Queries shorter than `min_len` characters are not searched at all.
pub fn search_gated(index: &ContentIndex, query: &str, min_len: usize) -> SearchOutcome {
    if query_len(query) < min_len {
        return SearchOutcome::NotSearched;
    }
    let positions = matching_positions(index, query);
    tracing::debug!(query, matches = positions.len(), "query matched");
    SearchOutcome::Searched(positions)
}
