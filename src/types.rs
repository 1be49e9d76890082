// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the page search.
//!
//! A page ships a handful of [`SearchRecord`]s, each pointing at a section of
//! the page by its element id. Records are plain data: immutable once built,
//! cheap to clone, and serializable so an index can live in a JSON file next
//! to the page instead of being compiled in.
//!
//! # Invariants
//!
//! - **SearchRecord**: `title` and `section_id` are non-empty for any record
//!   that came through [`ContentIndex::from_json`](crate::ContentIndex::from_json).
//!   The compiled-in records satisfy this by construction.
//! - **SectionId**: no leading `#`. It is an element id, not a URL fragment.
//!
//! Nothing here checks that a section actually exists in the page. That is
//! the navigator's problem, and it answers by doing nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a navigable page section (the element's `id` attribute).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Build a section id, dropping a leading `#` if the caller passed a fragment.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.strip_prefix('#') {
            Some(stripped) => SectionId(stripped.to_string()),
            None => SectionId(id),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        SectionId::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        SectionId::new(id)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One searchable entry: what the user sees in the results panel, and where
/// clicking it takes them.
///
/// The JSON shape is `{"title", "body", "section"}`. `content` is accepted in
/// place of `body` since that is what hand-written page indexes tend to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(rename = "section")]
    pub section_id: SectionId,
}

impl SearchRecord {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        section_id: impl Into<SectionId>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            section_id: section_id.into(),
        }
    }
}
