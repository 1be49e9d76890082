// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Analytics beacons.
//!
//! Analytics is optional and fire-and-forget. Components hold an
//! `Option<Rc<dyn Analytics>>` handed to them at construction; `None` means
//! no sink is installed and every [`emit`] is skipped. A sink that fails
//! internally must swallow the failure: nothing in the page waits on it or
//! reacts to it.
//!
//! Event names and attribute keys are part of the page's reporting contract
//! (dashboards query them by name), so they are spelled out in one place here.

use serde_json::{json, Map, Value};
use std::rc::Rc;

/// Sink for named events with a flat attribute map.
pub trait Analytics {
    fn record(&self, name: &str, attributes: &Map<String, Value>);

    /// Report a page error. Sinks without an error channel drop it.
    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        let _ = (message, attributes);
    }
}

impl<A: Analytics + ?Sized> Analytics for Rc<A> {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        (**self).record(name, attributes);
    }

    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        (**self).record_error(message, attributes);
    }
}

impl<A: Analytics + ?Sized> Analytics for Box<A> {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        (**self).record(name, attributes);
    }

    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        (**self).record_error(message, attributes);
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn record(&self, _name: &str, _attributes: &Map<String, Value>) {}
}

/// Sink that forwards every event to `tracing` at debug level.
///
/// Handy for the CLI, where there is no RUM agent but seeing the beacons is
/// useful.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        let attributes = Value::Object(attributes.clone());
        tracing::debug!(event = name, attributes = %attributes, "analytics");
    }

    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        let attributes = Value::Object(attributes.clone());
        tracing::warn!(error_message = message, attributes = %attributes, "page error");
    }
}

/// Value reported as `source` for clicks that came from the results panel.
pub const SEARCH_RESULTS_SOURCE: &str = "search_results";

/// Every event the page reports.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    /// Page finished initializing. `timestamp` is ISO-8601 UTC.
    PageLoaded { page: String, timestamp: String },
    /// A top-level navigation link was followed.
    NavigationClick { section: String, link_text: String },
    /// A platform tab was selected.
    TabSwitch { platform: String, tab_text: String },
    /// A query passed the length gate and is about to run.
    SearchPerformed { query: String, query_length: usize },
    /// A query finished.
    SearchResults { query: String, results_count: usize },
    /// A search result was clicked and its section exists.
    SearchResultClick { section: String },
    /// The page took longer than the slow-load threshold to finish loading.
    SlowPageLoad { load_time_ms: f64 },
    /// The chart container was found at startup.
    ChartInitialized { chart_type: String, chart_id: String },
    /// A canvas appeared in the chart container.
    ChartRenderComplete { chart_type: String, render_time_ms: f64 },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::PageLoaded { .. } => "page_loaded",
            AnalyticsEvent::NavigationClick { .. } => "navigation_click",
            AnalyticsEvent::TabSwitch { .. } => "tab_switch",
            AnalyticsEvent::SearchPerformed { .. } => "search_performed",
            AnalyticsEvent::SearchResults { .. } => "search_results",
            AnalyticsEvent::SearchResultClick { .. } => "search_result_click",
            AnalyticsEvent::SlowPageLoad { .. } => "slow_page_load",
            AnalyticsEvent::ChartInitialized { .. } => "chart_initialized",
            AnalyticsEvent::ChartRenderComplete { .. } => "chart_render_complete",
        }
    }

    pub fn attributes(&self) -> Map<String, Value> {
        let value = match self {
            AnalyticsEvent::PageLoaded { page, timestamp } => {
                json!({ "page": page, "timestamp": timestamp })
            }
            AnalyticsEvent::NavigationClick { section, link_text } => {
                json!({ "section": section, "link_text": link_text })
            }
            AnalyticsEvent::TabSwitch { platform, tab_text } => {
                json!({ "platform": platform, "tab_text": tab_text })
            }
            AnalyticsEvent::SearchPerformed {
                query,
                query_length,
            } => json!({ "query": query, "query_length": query_length }),
            AnalyticsEvent::SearchResults {
                query,
                results_count,
            } => json!({
                "query": query,
                "results_count": results_count,
                "found_results": *results_count > 0,
            }),
            AnalyticsEvent::SearchResultClick { section } => {
                json!({ "section": section, "source": SEARCH_RESULTS_SOURCE })
            }
            AnalyticsEvent::SlowPageLoad { load_time_ms } => {
                json!({ "load_time": load_time_ms, "performance_issue": true })
            }
            AnalyticsEvent::ChartInitialized {
                chart_type,
                chart_id,
            } => json!({ "chart_type": chart_type, "chart_id": chart_id }),
            AnalyticsEvent::ChartRenderComplete {
                chart_type,
                render_time_ms,
            } => json!({ "render_time": render_time_ms, "chart_type": chart_type }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// `page_loaded` stamped with the current UTC time.
    pub fn page_loaded_now(page: &str) -> Self {
        AnalyticsEvent::PageLoaded {
            page: page.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

/// Send `event` to `analytics` if a sink is installed.
pub fn emit(analytics: Option<&dyn Analytics>, event: &AnalyticsEvent) {
    if let Some(sink) = analytics {
        tracing::trace!(event = event.name(), "emitting analytics event");
        sink.record(event.name(), &event.attributes());
    }
}
