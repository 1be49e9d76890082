// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page health reporting: uncaught errors, slow loads and the cost chart.
//!
//! The browser binding turns `error`, `unhandledrejection` and `load` events
//! and chart container mutations into the values here. Deciding what gets
//! reported, and with which attributes, happens in this module.

use crate::analytics::{emit, Analytics, AnalyticsEvent};
use crate::config::SearchConfig;
use serde_json::{json, Map, Value};

/// Message used when a rejection carries no readable reason.
pub const UNKNOWN_REJECTION: &str = "Unhandled promise rejection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An uncaught exception from a script.
    Script,
    /// A promise rejected with no handler attached.
    UnhandledRejection,
}

impl ErrorKind {
    /// `error_type` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Script => "javascript_error",
            ErrorKind::UnhandledRejection => "unhandled_promise_rejection",
        }
    }
}

/// Where a script error was thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub filename: String,
    pub lineno: u32,
    pub colno: u32,
}

/// One uncaught page error, ready for the analytics error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl ErrorReport {
    pub fn script(
        message: impl Into<String>,
        filename: impl Into<String>,
        lineno: u32,
        colno: u32,
    ) -> Self {
        Self {
            kind: ErrorKind::Script,
            message: message.into(),
            location: Some(SourceLocation {
                filename: filename.into(),
                lineno,
                colno,
            }),
        }
    }

    pub fn unhandled_rejection(reason: Option<String>) -> Self {
        let message = reason
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| UNKNOWN_REJECTION.to_string());
        Self {
            kind: ErrorKind::UnhandledRejection,
            message,
            location: None,
        }
    }

    /// Context attributes sent alongside the error.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert("error_type".to_string(), json!(self.kind.as_str()));
        match (&self.kind, &self.location) {
            (ErrorKind::Script, Some(location)) => {
                attributes.insert("filename".to_string(), json!(location.filename));
                attributes.insert("lineno".to_string(), json!(location.lineno));
                attributes.insert("colno".to_string(), json!(location.colno));
                attributes.insert("message".to_string(), json!(self.message));
            }
            (ErrorKind::Script, None) => {
                attributes.insert("message".to_string(), json!(self.message));
            }
            (ErrorKind::UnhandledRejection, _) => {
                attributes.insert("promise_rejection".to_string(), json!(true));
            }
        }
        attributes
    }
}

/// Send `report` to the error channel of `analytics` if a sink is installed.
pub fn report_error(analytics: Option<&dyn Analytics>, report: &ErrorReport) {
    if let Some(sink) = analytics {
        tracing::debug!(error_type = report.kind.as_str(), "reporting page error");
        sink.record_error(&report.message, &report.attributes());
    }
}

// ============================================================================
// LOAD TIMING
// ============================================================================

/// Milliseconds from navigation start to the end of the load event.
///
/// Inside a `load` handler the load event has not ended yet and
/// `load_event_end` reads 0. Then `now` (milliseconds since the time origin)
/// is the closest available figure.
pub fn page_load_time(navigation_start: f64, load_event_end: f64, now: f64) -> f64 {
    if navigation_start > 0.0 && load_event_end > navigation_start {
        load_event_end - navigation_start
    } else {
        now.max(0.0)
    }
}

/// `slow_page_load` when `load_time_ms` is over `threshold_ms`.
pub fn slow_load_event(load_time_ms: f64, threshold_ms: u32) -> Option<AnalyticsEvent> {
    (load_time_ms > f64::from(threshold_ms)).then_some(AnalyticsEvent::SlowPageLoad { load_time_ms })
}

// ============================================================================
// CHART
// ============================================================================

/// Follows the cost chart from startup to its first rendered canvas.
#[derive(Debug, Clone)]
pub struct ChartWatch {
    chart_id: String,
    chart_type: String,
    started_at: f64,
    rendered: bool,
}

impl ChartWatch {
    /// Start watching at `started_at` (milliseconds, same clock as [`ChartWatch::observe`]).
    pub fn new(chart_id: impl Into<String>, chart_type: impl Into<String>, started_at: f64) -> Self {
        Self {
            chart_id: chart_id.into(),
            chart_type: chart_type.into(),
            started_at,
            rendered: false,
        }
    }

    pub fn from_config(config: &SearchConfig, started_at: f64) -> Self {
        Self::new(config.chart_id.clone(), config.chart_type.clone(), started_at)
    }

    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    /// Report that the chart container exists.
    pub fn initialized(&self, analytics: Option<&dyn Analytics>) {
        emit(
            analytics,
            &AnalyticsEvent::ChartInitialized {
                chart_type: self.chart_type.clone(),
                chart_id: self.chart_id.clone(),
            },
        );
    }

    /// Called on each change to the container. Reports `chart_render_complete`
    /// the first time a canvas is present and returns true from then on.
    pub fn observe(&mut self, has_canvas: bool, now: f64, analytics: Option<&dyn Analytics>) -> bool {
        if self.rendered || !has_canvas {
            return self.rendered;
        }
        self.rendered = true;
        emit(
            analytics,
            &AnalyticsEvent::ChartRenderComplete {
                chart_type: self.chart_type.clone(),
                render_time_ms: (now - self.started_at).max(0.0),
            },
        );
        true
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }
}
