// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The content index: a fixed, ordered list of records.
//!
//! Built once when the page initializes and never touched again. Order is
//! significant because search results come back in index order; there is no
//! ranking to reshuffle them.
//!
//! Case folding happens here, once per record, rather than once per record
//! per keystroke. The folded copies are private so callers cannot get them out
//! of sync with the records they shadow.

use crate::error::{IndexError, PagesiftError, Result};
use crate::types::{SearchRecord, SectionId};
use crate::utils::fold_case;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
struct FoldedRecord {
    title: String,
    body: String,
}

/// Read-only ordered sequence of [`SearchRecord`].
#[derive(Debug, Clone)]
pub struct ContentIndex {
    records: Vec<SearchRecord>,
    folded: Vec<FoldedRecord>,
}

impl ContentIndex {
    /// Build an index from trusted records without validating them.
    ///
    /// Use [`ContentIndex::from_records`] for anything that did not come out
    /// of this crate.
    pub fn new(records: Vec<SearchRecord>) -> Self {
        let folded = records
            .iter()
            .map(|record| FoldedRecord {
                title: fold_case(&record.title),
                body: fold_case(&record.body),
            })
            .collect();
        Self { records, folded }
    }

    /// Build an index, rejecting records that break the index invariants.
    pub fn from_records(records: Vec<SearchRecord>) -> Result<Self> {
        validate_records(&records)?;
        Ok(Self::new(records))
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<SearchRecord> =
            serde_json::from_str(json).map_err(|source| PagesiftError::IndexParse { source })?;
        Self::from_records(records)
    }

    /// Read, parse and validate a JSON index file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| PagesiftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&SearchRecord> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchRecord> {
        self.records.iter()
    }

    /// All records pointing at `section`, in index order.
    pub fn in_section<'a>(
        &'a self,
        section: &'a SectionId,
    ) -> impl Iterator<Item = &'a SearchRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| &record.section_id == section)
    }

    /// Distinct section ids referenced by the index, in first-seen order.
    pub fn sections(&self) -> Vec<&SectionId> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&&record.section_id) {
                seen.push(&record.section_id);
            }
        }
        seen
    }

    /// Case-folded `(title, body)` of the record at `position`.
    pub(crate) fn folded(&self, position: usize) -> Option<(&str, &str)> {
        self.folded
            .get(position)
            .map(|f| (f.title.as_str(), f.body.as_str()))
    }

    /// Check the invariants again (useful after hand-building with [`ContentIndex::new`]).
    pub fn validate(&self) -> std::result::Result<(), IndexError> {
        validate_records(&self.records)
    }
}

impl<'a> IntoIterator for &'a ContentIndex {
    type Item = &'a SearchRecord;
    type IntoIter = std::slice::Iter<'a, SearchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn validate_records(records: &[SearchRecord]) -> std::result::Result<(), IndexError> {
    let mut first_seen: HashMap<(&str, &str), usize> = HashMap::new();

    for (position, record) in records.iter().enumerate() {
        if record.title.trim().is_empty() {
            return Err(IndexError::EmptyTitle { position });
        }
        if record.section_id.is_empty() {
            return Err(IndexError::EmptySection {
                position,
                title: record.title.clone(),
            });
        }

        let key = (record.title.as_str(), record.section_id.as_str());
        if let Some(&first) = first_seen.get(&key) {
            return Err(IndexError::DuplicateRecord {
                position,
                first,
                title: record.title.clone(),
                section: record.section_id.to_string(),
            });
        }
        first_seen.insert(key, position);
    }

    Ok(())
}
