//! The compiled-in content index for the error-tracking analysis page.
//!
//! Section ids match the `id` attributes of the page's `<section>` elements.

use crate::index::ContentIndex;
use crate::types::SearchRecord;

/// `(title, body, section)` for every searchable concept on the page, in page order.
pub const DEFAULT_RECORDS: &[(&str, &str, &str)] = &[
    (
        "Error Tracking Workflow",
        "Detection, Aggregation, Triage, Debugging, Analysis",
        "workflow",
    ),
    (
        "Frontend Errors",
        "JavaScript errors, CORS issues, DOM problems",
        "taxonomy",
    ),
    (
        "Backend Errors",
        "Database issues, API failures, service unavailability",
        "taxonomy",
    ),
    (
        "Mobile Errors",
        "App crashes, ANR, permission issues",
        "taxonomy",
    ),
    (
        "Sentry",
        "Developer-first error tracking with deep code analysis",
        "tools",
    ),
    (
        "Datadog",
        "Enterprise observability platform with unified monitoring",
        "tools",
    ),
    (
        "Cost Analysis",
        "Production fixes cost 15-100x more than design phase",
        "cost-analysis",
    ),
    (
        "AI-Powered RCA",
        "Machine learning for automated root cause analysis",
        "future",
    ),
    (
        "Predictive Analytics",
        "Prevent failures before they occur",
        "future",
    ),
    (
        "Structured Logging",
        "JSON format for machine-readable logs",
        "best-practices",
    ),
    (
        "Smart Alerting",
        "Alert on impact, not volume to prevent fatigue",
        "best-practices",
    ),
    (
        "Data Security",
        "Scrub sensitive data from error reports",
        "best-practices",
    ),
];

/// The page's own index.
pub fn default_index() -> ContentIndex {
    ContentIndex::new(
        DEFAULT_RECORDS
            .iter()
            .map(|&(title, body, section)| SearchRecord::new(title, body, section))
            .collect(),
    )
}
