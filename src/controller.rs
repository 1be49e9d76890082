// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search input state machine.
//!
//! Every browser event the search box cares about becomes one [`UiEvent`].
//! [`transition`] maps `(state, event)` to the next state plus a list of
//! [`Effect`]s, and does nothing else: no DOM, no analytics, no scrolling.
//! [`SearchController`] owns the state and the collaborators and performs the
//! effects. The CLI's `replay` command drives the same machine.
//!
//! # States
//!
//! ```text
//!                 keystroke(len < min)          keystroke(len >= min)
//!   ┌──────┐ ───────────────────────▶ ┌────────┐ ──────────────────▶ ┌────────────────┐
//!   │ Idle │                          │ Typing │                     │ ShowingResults │
//!   └──────┘ ◀─────────────────────── └────────┘ ◀────────────────── └────────────────┘
//!       ▲        escape / empty input              keystroke(len < min)      │
//!       └────────────────────────────────────────────────────────────────────┘
//!                       escape / outside click / select result
//! ```
//!
//! Ctrl+K (Cmd+K on macOS) focuses the input from any state and leaves the
//! search state alone.

use crate::analytics::{emit, Analytics, AnalyticsEvent};
use crate::config::SearchConfig;
use crate::index::ContentIndex;
use crate::navigation::Navigator;
use crate::presenter::{Panel, ResultsView, SearchResultsPresenter};
use crate::search::{search_gated, SearchOutcome};
use crate::types::SectionId;
use crate::utils::query_len;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Panel hidden, no query.
    #[default]
    Idle,
    /// Query present but shorter than the minimum length. Panel hidden.
    Typing,
    /// Query at or above the minimum length. Panel visible.
    ShowingResults,
}

/// A key-down with the modifiers the shortcuts care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }

    /// Ctrl+K or Cmd+K.
    pub fn is_focus_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && self.key == "k"
    }
}

/// Browser events, one variant per listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The input's value changed. Carries the whole current value.
    Input(String),
    /// The search button was clicked. Carries the input's current value.
    ButtonClick(String),
    /// Key pressed anywhere in the document.
    KeyDown(KeyPress),
    /// Click anywhere in the document.
    DocumentClick { inside_search: bool },
    /// A row of the results panel was clicked.
    SelectResult(usize),
}

/// Something the controller must do as a consequence of a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(SearchOutcome),
    HidePanel,
    /// Scroll to a section. A click is reported only if the section exists,
    /// which only the navigator knows.
    Navigate(SectionId),
    FocusInput,
    PreventDefault,
    Record(AnalyticsEvent),
}

/// The controller's entire mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    state: SearchState,
    query: String,
    outcome: SearchOutcome,
}

impl QueryState {
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The last query that was acted on ("" when idle).
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Result set on display (`NotSearched` unless showing results).
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    fn idle() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: QueryState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(current: &QueryState) -> Self {
        Self {
            next: current.clone(),
            effects: Vec::new(),
        }
    }

    fn to_idle() -> Self {
        Self {
            next: QueryState::idle(),
            effects: vec![Effect::HidePanel],
        }
    }
}

/// Compute the next state for `event`. Pure: same inputs, same transition.
pub fn transition(
    current: &QueryState,
    event: &UiEvent,
    index: &ContentIndex,
    config: &SearchConfig,
) -> Transition {
    match event {
        UiEvent::Input(value) | UiEvent::ButtonClick(value) => query_changed(value, index, config),

        UiEvent::KeyDown(key) if key.is_escape() => Transition::to_idle(),

        UiEvent::KeyDown(key) if key.is_focus_shortcut() => Transition {
            next: current.clone(),
            effects: vec![Effect::PreventDefault, Effect::FocusInput],
        },

        UiEvent::KeyDown(_) => Transition::stay(current),

        UiEvent::DocumentClick { inside_search } => {
            if !inside_search && current.state == SearchState::ShowingResults {
                Transition::to_idle()
            } else {
                Transition::stay(current)
            }
        }

        UiEvent::SelectResult(row) => {
            let section = current
                .outcome
                .positions()
                .get(*row)
                .and_then(|&position| index.get(position))
                .map(|record| record.section_id.clone());

            match section {
                Some(section) if current.state == SearchState::ShowingResults => Transition {
                    next: QueryState::idle(),
                    effects: vec![Effect::Navigate(section), Effect::HidePanel],
                },
                _ => Transition::stay(current),
            }
        }
    }
}

fn query_changed(value: &str, index: &ContentIndex, config: &SearchConfig) -> Transition {
    let length = query_len(value);

    if length == 0 {
        return Transition::to_idle();
    }

    if length < config.min_query_len {
        return Transition {
            next: QueryState {
                state: SearchState::Typing,
                query: value.to_string(),
                outcome: SearchOutcome::NotSearched,
            },
            effects: vec![Effect::HidePanel],
        };
    }

    let outcome = search_gated(index, value, config.min_query_len);
    let results_count = outcome.positions().len();

    Transition {
        next: QueryState {
            state: SearchState::ShowingResults,
            query: value.to_string(),
            outcome: outcome.clone(),
        },
        effects: vec![
            Effect::Record(AnalyticsEvent::SearchPerformed {
                query: value.to_string(),
                query_length: length,
            }),
            Effect::Record(AnalyticsEvent::SearchResults {
                query: value.to_string(),
                results_count,
            }),
            Effect::Render(outcome),
        ],
    }
}

/// What the host page must do after an event (things only it can do).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostRequest {
    pub prevent_default: bool,
    pub focus_input: bool,
}

/// Owns the query state and drives the presenter, navigator and analytics.
pub struct SearchController<N, V> {
    index: ContentIndex,
    config: SearchConfig,
    state: QueryState,
    presenter: SearchResultsPresenter<V>,
    navigator: N,
    analytics: Option<Rc<dyn Analytics>>,
}

impl<N: Navigator, V: ResultsView> SearchController<N, V> {
    /// Start in `Idle` with the panel hidden.
    pub fn new(index: ContentIndex, config: SearchConfig, navigator: N, view: V) -> Self {
        let mut presenter = SearchResultsPresenter::new(view, config.no_results_text.clone());
        presenter.hide();
        Self {
            index,
            config,
            state: QueryState::idle(),
            presenter,
            navigator,
            analytics: None,
        }
    }

    pub fn with_analytics(mut self, analytics: Rc<dyn Analytics>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Feed one event through the state machine and perform its effects.
    pub fn dispatch(&mut self, event: UiEvent) -> HostRequest {
        let Transition { next, effects } =
            transition(&self.state, &event, &self.index, &self.config);

        if next.state != self.state.state {
            tracing::debug!(from = ?self.state.state, to = ?next.state, ?event, "search state transition");
        }
        self.state = next;

        let mut host = HostRequest::default();
        for effect in effects {
            self.apply(effect, &mut host);
        }
        host
    }

    fn apply(&mut self, effect: Effect, host: &mut HostRequest) {
        match effect {
            Effect::Render(outcome) => self.presenter.render(&outcome, &self.index),
            Effect::HidePanel => self.presenter.hide(),
            Effect::Navigate(section) => {
                if self.navigator.scroll_to_section(&section) {
                    emit(
                        self.analytics.as_deref(),
                        &AnalyticsEvent::SearchResultClick {
                            section: section.to_string(),
                        },
                    );
                }
            }
            Effect::FocusInput => host.focus_input = true,
            Effect::PreventDefault => host.prevent_default = true,
            Effect::Record(event) => emit(self.analytics.as_deref(), &event),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state.state
    }

    pub fn query_state(&self) -> &QueryState {
        &self.state
    }

    pub fn panel(&self) -> &Panel {
        self.presenter.panel()
    }

    pub fn index(&self) -> &ContentIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn analytics(&self) -> Option<&dyn Analytics> {
        self.analytics.as_deref()
    }

    pub fn view(&self) -> &V {
        self.presenter.view()
    }

    pub fn view_mut(&mut self) -> &mut V {
        self.presenter.view_mut()
    }
}
