// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Almost nothing in the search path can fail: matching is total, a missing
//! section is a no-op, a missing analytics sink is skipped. Errors only come
//! from inputs that cross a boundary: JSON config, JSON content indexes, files
//! read by the CLI, and mounting into a page that lacks the expected host.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PagesiftError>;

#[derive(Debug, Error)]
pub enum PagesiftError {
    #[error("failed to parse search config: {source}")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse content index: {source}")]
    IndexParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("content index is malformed: {0}")]
    InvalidIndex(#[from] IndexError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot mount search UI: {0}")]
    Mount(String),
}

/// A record that breaks a content index invariant.
///
/// Positions are zero-based offsets into the record list as it was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("record {position} has an empty title")]
    EmptyTitle { position: usize },

    #[error("record {position} ('{title}') has an empty section id")]
    EmptySection { position: usize, title: String },

    #[error("record {position} duplicates record {first} ('{title}' in #{section})")]
    DuplicateRecord {
        position: usize,
        first: usize,
        title: String,
        section: String,
    },
}
