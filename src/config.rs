// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Every field has a default matching the shipped page, so an empty JSON
//! object (or no config at all) reproduces it exactly. Keys are camelCase
//! because the config usually arrives from JavaScript.

use crate::error::{PagesiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum query length (in characters) before a search runs.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Literal shown when a query ran and matched nothing.
pub const DEFAULT_NO_RESULTS_TEXT: &str = "No results found";

pub const DEFAULT_PLACEHOLDER: &str = "Search concepts, tools, or practices...";

pub const DEFAULT_BUTTON_LABEL: &str = "🔍";

/// Element after which the search UI is inserted.
pub const DEFAULT_HERO_SELECTOR: &str = ".hero";

/// Page id reported with the `page_loaded` beacon.
pub const DEFAULT_PAGE_ID: &str = "error_tracking_analysis";

/// Id of the cost chart container.
pub const DEFAULT_CHART_ID: &str = "costChart";

pub const DEFAULT_CHART_TYPE: &str = "cost_analysis";

/// Loads slower than this many milliseconds report `slow_page_load`.
pub const DEFAULT_SLOW_LOAD_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Queries shorter than this hide the panel instead of searching (default: 2)
    pub min_query_len: usize,
    /// Empty-result message (default: "No results found")
    pub no_results_text: String,
    /// Input placeholder text
    pub placeholder: String,
    /// Search button label
    pub button_label: String,
    /// CSS selector of the element the search UI follows (default: ".hero")
    pub hero_selector: String,
    /// Page id for the `page_loaded` analytics event
    pub page_id: String,
    /// Element id of the chart whose startup and render are reported
    pub chart_id: String,
    /// `chart_type` attribute on chart events
    pub chart_type: String,
    /// Slow-load threshold in milliseconds (default: 3000)
    pub slow_load_ms: u32,
    /// Fade sections in as they scroll into view (default: true)
    pub reveal_sections: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            no_results_text: DEFAULT_NO_RESULTS_TEXT.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            hero_selector: DEFAULT_HERO_SELECTOR.to_string(),
            page_id: DEFAULT_PAGE_ID.to_string(),
            chart_id: DEFAULT_CHART_ID.to_string(),
            chart_type: DEFAULT_CHART_TYPE.to_string(),
            slow_load_ms: DEFAULT_SLOW_LOAD_MS,
            reveal_sections: true,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig =
            serde_json::from_str(json).map_err(|source| PagesiftError::ConfigParse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| PagesiftError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// A zero threshold would make the empty input match every record.
    pub fn validate(&self) -> Result<()> {
        if self.min_query_len == 0 {
            return Err(PagesiftError::InvalidConfig(
                "minQueryLen must be at least 1".to_string(),
            ));
        }
        if self.hero_selector.trim().is_empty() {
            return Err(PagesiftError::InvalidConfig(
                "heroSelector must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
