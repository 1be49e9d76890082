// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query matching.
//!
//! Arbitrary records and queries, including text whose lowercase form has a
//! different byte length than the original (Turkish İ, German ẞ, ligatures).
//! Matching must never panic and must agree with a naive re-implementation.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagesift::{fold_case, matching_positions, search_gated, ContentIndex, SearchRecord};

#[derive(Debug, Arbitrary)]
struct Input {
    records: Vec<(String, String)>,
    query: String,
    min_len: u8,
}

fuzz_target!(|input: Input| {
    let index = ContentIndex::new(
        input
            .records
            .iter()
            .take(64)
            .enumerate()
            .map(|(i, (title, body))| SearchRecord::new(title.as_str(), body.as_str(), format!("s{}", i)))
            .collect(),
    );
    let query: String = input.query.chars().take(200).collect();

    let positions = matching_positions(&index, &query);

    // INVARIANT 1: positions are in bounds and strictly increasing
    assert!(positions.iter().all(|&p| p < index.len()));
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    // INVARIANT 2: agreement with the obvious implementation
    let needle = fold_case(&query);
    let naive: Vec<usize> = index
        .iter()
        .enumerate()
        .filter(|(_, r)| fold_case(&r.title).contains(&needle) || fold_case(&r.body).contains(&needle))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions, naive);

    // INVARIANT 3: the gate only ever hides, never changes, the answer
    let min_len = usize::from(input.min_len.max(1));
    let outcome = search_gated(&index, &query, min_len);
    if outcome.was_searched() {
        assert_eq!(outcome.positions(), naive.as_slice());
    } else {
        assert!(query.chars().count() < min_len);
    }
});
