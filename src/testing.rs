//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::analytics::Analytics;
use crate::config::SearchConfig;
use crate::controller::SearchController;
use crate::index::ContentIndex;
use crate::navigation::PageSections;
use crate::presenter::MemoryView;
use crate::types::SearchRecord;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Create a record whose body is derived from its title.
pub fn make_record(title: &str, section: &str) -> SearchRecord {
    SearchRecord::new(title, format!("Notes on {}", title), section)
}

/// Controller over `index` on a page that has exactly the indexed sections.
pub fn make_controller(index: ContentIndex) -> SearchController<PageSections, MemoryView> {
    let page = PageSections::from_index(&index);
    SearchController::new(index, SearchConfig::default(), page, MemoryView::default())
}

/// One captured analytics call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// One captured error report.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedError {
    pub message: String,
    pub attributes: Map<String, Value>,
}

/// Analytics sink that keeps everything it is given.
///
/// Share it as `Rc<RecordingAnalytics>`: hand a clone to the component under
/// test and read the events back through the original.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: RefCell<Vec<RecordedEvent>>,
    errors: RefCell<Vec<RecordedError>>,
}

impl RecordingAnalytics {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.name.clone()).collect()
    }

    pub fn errors(&self) -> Vec<RecordedError> {
        self.errors.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.errors.borrow_mut().clear();
    }
}

impl Analytics for RecordingAnalytics {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        self.events.borrow_mut().push(RecordedEvent {
            name: name.to_string(),
            attributes: attributes.clone(),
        });
    }

    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        self.errors.borrow_mut().push(RecordedError {
            message: message.to_string(),
            attributes: attributes.clone(),
        });
    }
}
