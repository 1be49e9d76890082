// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Results panel rendering.
//!
//! The presenter turns a [`SearchOutcome`] into a [`Panel`] (a small view
//! model) and pushes it into a [`ResultsView`]. Keeping the view model
//! separate from the view means the same rendering decisions drive the DOM
//! panel in the browser, the CLI's box drawing, and the in-memory view the
//! tests inspect.
//!
//! | Outcome             | Panel                                 |
//! |---------------------|---------------------------------------|
//! | `NotSearched`       | hidden                                |
//! | `Searched([])`      | visible, one "No results found" entry |
//! | `Searched([i, ..])` | visible, one entry per record         |

use crate::index::ContentIndex;
use crate::search::SearchOutcome;
use crate::types::SectionId;
use crate::utils::escape_html;

/// CSS class of every entry in the results panel.
pub const RESULT_CLASS: &str = "search-result";

/// One line in the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEntry {
    /// A matching record. `position` is its index position.
    Result {
        position: usize,
        title: String,
        body: String,
        section_id: SectionId,
    },
    /// A non-clickable message ("No results found").
    Message(String),
}

impl PanelEntry {
    /// Section this entry navigates to, if it is clickable.
    pub fn section_id(&self) -> Option<&SectionId> {
        match self {
            PanelEntry::Result { section_id, .. } => Some(section_id),
            PanelEntry::Message(_) => None,
        }
    }

    /// HTML for this entry. Record text is escaped.
    pub fn to_html(&self) -> String {
        match self {
            PanelEntry::Result {
                title,
                body,
                section_id,
                ..
            } => format!(
                r#"<div class="{}" data-section="{}"><strong>{}</strong><br><small>{}</small></div>"#,
                RESULT_CLASS,
                escape_html(section_id.as_str()),
                escape_html(title),
                escape_html(body)
            ),
            PanelEntry::Message(text) => {
                format!(r#"<div class="{}">{}</div>"#, RESULT_CLASS, escape_html(text))
            }
        }
    }
}

/// What the results panel should look like.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Hidden,
    Visible(Vec<PanelEntry>),
}

impl Panel {
    pub fn from_outcome(outcome: &SearchOutcome, index: &ContentIndex, no_results_text: &str) -> Self {
        match outcome {
            SearchOutcome::NotSearched => Panel::Hidden,
            SearchOutcome::Searched(positions) if positions.is_empty() => {
                Panel::Visible(vec![PanelEntry::Message(no_results_text.to_string())])
            }
            SearchOutcome::Searched(positions) => Panel::Visible(
                positions
                    .iter()
                    .filter_map(|&position| {
                        index.get(position).map(|record| PanelEntry::Result {
                            position,
                            title: record.title.clone(),
                            body: record.body.clone(),
                            section_id: record.section_id.clone(),
                        })
                    })
                    .collect(),
            ),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Panel::Visible(_))
    }

    pub fn entries(&self) -> &[PanelEntry] {
        match self {
            Panel::Hidden => &[],
            Panel::Visible(entries) => entries,
        }
    }

    /// Inner HTML of the results container (empty when hidden).
    pub fn to_html(&self) -> String {
        self.entries().iter().map(PanelEntry::to_html).collect()
    }
}

/// Where panels get drawn.
pub trait ResultsView {
    fn show(&mut self, entries: &[PanelEntry]);
    fn hide(&mut self);
}

/// View that just remembers the last panel it was given.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    panel: Panel,
    renders: usize,
}

impl MemoryView {
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Number of `show` calls so far.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl ResultsView for MemoryView {
    fn show(&mut self, entries: &[PanelEntry]) {
        self.panel = Panel::Visible(entries.to_vec());
        self.renders += 1;
    }

    fn hide(&mut self) {
        self.panel = Panel::Hidden;
    }
}

/// Renders outcomes into a view and resolves clicks on the rendered entries.
#[derive(Debug)]
pub struct SearchResultsPresenter<V> {
    view: V,
    no_results_text: String,
    current: Panel,
}

impl<V: ResultsView> SearchResultsPresenter<V> {
    pub fn new(view: V, no_results_text: impl Into<String>) -> Self {
        Self {
            view,
            no_results_text: no_results_text.into(),
            current: Panel::Hidden,
        }
    }

    /// Redraw the panel for `outcome`.
    pub fn render(&mut self, outcome: &SearchOutcome, index: &ContentIndex) {
        self.current = Panel::from_outcome(outcome, index, &self.no_results_text);
        match &self.current {
            Panel::Hidden => self.view.hide(),
            Panel::Visible(entries) => self.view.show(entries),
        }
    }

    pub fn hide(&mut self) {
        self.current = Panel::Hidden;
        self.view.hide();
    }

    /// Activate the entry at `entry` (its row in the panel) and hand its section
    /// to `on_select`. Messages and out-of-range rows do nothing.
    pub fn activate<R>(&self, entry: usize, on_select: impl FnOnce(&SectionId) -> R) -> Option<R> {
        self.current
            .entries()
            .get(entry)
            .and_then(PanelEntry::section_id)
            .map(on_select)
    }

    pub fn panel(&self) -> &Panel {
        &self.current
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
