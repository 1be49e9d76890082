//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

use pagesift::{
    ContentIndex, MemoryView, PageSections, PanelEntry, SearchConfig, SearchController,
    SearchRecord, UiEvent,
};
use std::rc::Rc;

// Re-export canonical test utilities from pagesift::testing
pub use pagesift::testing::{make_controller, make_record, RecordingAnalytics};

pub type TestController = SearchController<PageSections, MemoryView>;

// ============================================================================
// FIXTURES
// ============================================================================

/// The three-record index used throughout the behavioral examples.
pub fn example_index() -> ContentIndex {
    ContentIndex::from_records(vec![
        SearchRecord::new("Mobile Errors", "App crashes, ANR", "taxonomy"),
        SearchRecord::new("Sentry", "Developer-first error tracking", "tools"),
        SearchRecord::new("Cost Analysis", "Production fixes cost 15-100x", "cost-analysis"),
    ])
    .expect("example index is valid")
}

/// Controller over `index` with a recording analytics sink attached.
pub fn observed_controller(index: ContentIndex) -> (TestController, Rc<RecordingAnalytics>) {
    let analytics = RecordingAnalytics::shared();
    let controller = make_controller(index).with_analytics(analytics.clone());
    (controller, analytics)
}

/// Controller whose page is missing every section the index points at.
pub fn controller_on_empty_page(index: ContentIndex) -> (TestController, Rc<RecordingAnalytics>) {
    let analytics = RecordingAnalytics::shared();
    let controller = SearchController::new(
        index,
        SearchConfig::default(),
        PageSections::default(),
        MemoryView::default(),
    )
    .with_analytics(analytics.clone());
    (controller, analytics)
}

// ============================================================================
// HELPERS
// ============================================================================

/// Feed every event in order.
pub fn drive(controller: &mut TestController, events: impl IntoIterator<Item = UiEvent>) {
    for event in events {
        controller.dispatch(event);
    }
}

/// Simulate typing `text` one keystroke at a time.
pub fn type_text(controller: &mut TestController, text: &str) {
    let mut value = String::new();
    for c in text.chars() {
        value.push(c);
        controller.dispatch(UiEvent::Input(value.clone()));
    }
}

/// Titles of the result rows currently on display.
pub fn shown_titles(controller: &TestController) -> Vec<String> {
    controller
        .panel()
        .entries()
        .iter()
        .filter_map(|entry| match entry {
            PanelEntry::Result { title, .. } => Some(title.clone()),
            PanelEntry::Message(_) => None,
        })
        .collect()
}

/// The "no results" message, if that is what the panel shows.
pub fn shown_message(controller: &TestController) -> Option<String> {
    match controller.panel().entries() {
        [PanelEntry::Message(text)] => Some(text.clone()),
        _ => None,
    }
}
