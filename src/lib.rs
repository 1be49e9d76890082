//! In-page search for a single long-form document.
//!
//! A small, fixed set of records (title, body, section id) is searched by
//! case-insensitive substring match. Results are shown in a panel under the
//! search box; clicking one scrolls to its section. The interaction is a
//! three-state machine driven by browser events, and a separate analytics
//! sink hears about searches, result clicks, nav clicks and tab switches.
//! Uncaught page errors, slow loads and the cost chart are reported through
//! the same sink (`monitoring.rs`), and sections fade in as they scroll into
//! view (`reveal.rs`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  types.rs   │────▶│  index.rs    │────▶│  search.rs  │
//! │ (SearchRec, │     │ (ContentIdx, │     │ (search,    │
//! │  SectionId) │     │  validation) │     │  gating)    │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                                                 │
//!                                                 ▼
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │navigation.rs│◀────│controller.rs │────▶│presenter.rs │
//! │ (Navigator) │     │ (transition, │     │ (Panel,     │
//! │             │     │  dispatch)   │     │ ResultsView)│
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │ analytics.rs │
//!                     │  (optional)  │
//!                     └──────────────┘
//! ```
//!
//! `wasm.rs` (feature `wasm`) binds all of this to a live document; the
//! `pagesift` binary drives the same controller from the terminal.
//!
//! # Usage
//!
//! ```
//! use pagesift::{default_index, search};
//!
//! let index = default_index();
//! let hits = search(&index, "mobile");
//! assert_eq!(hits[0].section_id.as_str(), "taxonomy");
//! ```

// Module declarations
pub mod analytics;
pub mod config;
mod content;
pub mod controller;
mod error;
mod index;
pub mod monitoring;
pub mod navigation;
pub mod presenter;
pub mod reveal;
mod search;
pub mod tabs;
pub mod testing;
mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::PageSift;

// Re-exports for public API
pub use analytics::{Analytics, AnalyticsEvent, NoopAnalytics, TracingAnalytics};
pub use config::SearchConfig;
pub use content::{default_index, DEFAULT_RECORDS};
pub use controller::{
    transition, Effect, HostRequest, KeyPress, QueryState, SearchController, SearchState,
    Transition, UiEvent,
};
pub use error::{IndexError, PagesiftError, Result};
pub use index::ContentIndex;
pub use monitoring::{
    page_load_time, report_error, slow_load_event, ChartWatch, ErrorKind, ErrorReport,
};
pub use navigation::{follow_link, LinkAction, NavLink, Navigator, PageSections};
pub use presenter::{MemoryView, Panel, PanelEntry, ResultsView, SearchResultsPresenter};
pub use reveal::RevealTracker;
pub use search::{matching_positions, search, search_gated, SearchOutcome};
pub use tabs::{Tab, TabGroup};
pub use types::{SearchRecord, SectionId};
pub use utils::{escape_html, fold_case, query_len};
