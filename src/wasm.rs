// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings: mounts the search box and wires the page.
//!
//! This is the browser-facing API. Everything interesting happens in the
//! controller; this module only translates DOM events into [`UiEvent`]s and
//! effects back into DOM calls.
//!
//! # Usage
//!
//! ```js
//! import init, { PageSift } from './pagesift.js';
//!
//! document.addEventListener('DOMContentLoaded', async () => {
//!     await init();
//!     const page = PageSift.mount({ minQueryLen: 2 });
//! });
//! ```
//!
//! Analytics goes to `window.DD_RUM.addAction`, and uncaught errors and
//! unhandled rejections to `window.DD_RUM.addError`, when the RUM agent is on
//! the page. The lookup happens on every event, so an agent that loads late
//! is picked up and a missing one costs nothing.

use crate::analytics::{emit, Analytics, AnalyticsEvent};
use crate::config::SearchConfig;
use crate::content::default_index;
use crate::controller::{KeyPress, SearchController, SearchState, UiEvent};
use crate::error::PagesiftError;
use crate::index::ContentIndex;
use crate::monitoring::{page_load_time, report_error, slow_load_event, ChartWatch, ErrorReport};
use crate::navigation::{follow_link, NavLink, Navigator};
use crate::presenter::{PanelEntry, ResultsView};
use crate::reveal::{
    RevealTracker, HIDDEN_STYLES, ROOT_MARGIN, SECTION_SELECTOR, SHOWN_STYLES,
    VISIBILITY_THRESHOLD,
};
use crate::search::search;
use crate::tabs::{Tab, TabGroup, ACTIVE_CLASS};
use crate::types::{SearchRecord, SectionId};
use crate::utils::escape_html;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, ErrorEvent, Event, EventTarget, HtmlElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    MutationObserver, MutationObserverInit, Node, PromiseRejectionEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

const CONTAINER_CLASS: &str = "search-container";
const INPUT_ID: &str = "searchInput";
const BUTTON_ID: &str = "searchButton";
const RESULTS_ID: &str = "searchResults";
const ROW_ATTR: &str = "data-row";
const REVEAL_ATTR: &str = "data-reveal";

const SEARCH_STYLES: &str = r#"
.search-container { max-width: 600px; margin: 2rem auto; padding: 0 2rem; }
.search-box { display: flex; background: white; border-radius: 25px; box-shadow: 0 5px 20px rgba(0,0,0,0.1); overflow: hidden; }
#searchInput { flex: 1; padding: 1rem 1.5rem; border: none; outline: none; font-size: 1rem; }
#searchButton { padding: 1rem 1.5rem; background: linear-gradient(135deg, #A960FF 0%, #8000FF 100%); border: none; color: white; cursor: pointer; font-size: 1.2rem; }
.search-results { margin-top: 1rem; display: none; }
.search-result { background: white; padding: 1rem; margin: 0.5rem 0; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); cursor: pointer; transition: transform 0.2s ease; }
.search-result:hover { transform: translateY(-2px); }
"#;

fn js_error(err: PagesiftError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn mount_error(message: &str) -> JsValue {
    js_error(PagesiftError::Mount(message.to_string()))
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Smooth-scrolls to `#id` elements.
#[derive(Clone)]
struct DomNavigator {
    document: Document,
}

impl Navigator for DomNavigator {
    fn scroll_to_section(&mut self, section: &SectionId) -> bool {
        let Some(element) = self.document.get_element_by_id(section.as_str()) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

/// The `#searchResults` container.
struct DomResultsView {
    container: HtmlElement,
}

impl DomResultsView {
    fn set_display(&self, value: &str) {
        // Style writes only fail on read-only declarations
        let _ = self.container.style().set_property("display", value);
    }
}

impl ResultsView for DomResultsView {
    fn show(&mut self, entries: &[PanelEntry]) {
        let html: String = entries.iter().map(PanelEntry::to_html).collect();
        self.container.set_inner_html(&html);

        // Tag rows so the delegated click handler can map a click to a row
        let rows = self.container.children();
        for row in 0..rows.length() {
            if let Some(child) = rows.item(row) {
                let _ = child.set_attribute(ROW_ATTR, &row.to_string());
            }
        }
        self.set_display("block");
    }

    fn hide(&mut self) {
        self.set_display("none");
    }
}

/// Forwards to `window.DD_RUM` when it exists.
struct RumAnalytics {
    window: Window,
}

impl RumAnalytics {
    fn agent(&self) -> Option<JsValue> {
        let rum = Reflect::get(&self.window, &JsValue::from_str("DD_RUM")).ok()?;
        (!rum.is_undefined() && !rum.is_null()).then_some(rum)
    }

    /// `DD_RUM[method](first, attributes)`
    fn call(&self, method: &str, first: &JsValue, attributes: &Map<String, Value>) {
        let Some(rum) = self.agent() else {
            return;
        };
        let Ok(function) = Reflect::get(&rum, &JsValue::from_str(method)) else {
            return;
        };
        let Some(function) = function.dyn_ref::<Function>() else {
            return;
        };
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let Ok(attributes) = attributes.serialize(&serializer) else {
            return;
        };
        // Fire and forget: a throwing agent must not break the page
        let _ = function.call2(&rum, first, &attributes);
    }

    /// Report with the thrown value itself when there is one, so the agent
    /// keeps its stack.
    fn add_error(&self, thrown: &JsValue, report: &ErrorReport) {
        if thrown.is_undefined() || thrown.is_null() {
            report_error(Some(self as &dyn Analytics), report);
        } else {
            self.call("addError", thrown, &report.attributes());
        }
    }
}

impl Analytics for RumAnalytics {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        self.call("addAction", &JsValue::from_str(name), attributes);
    }

    fn record_error(&self, message: &str, attributes: &Map<String, Value>) {
        let error = js_sys::Error::new(message);
        self.call("addError", &error, attributes);
    }
}

type DomController = SearchController<DomNavigator, DomResultsView>;

// =============================================================================
// EVENT PLUMBING
// =============================================================================

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

/// Dispatch into the controller unless a handler further up the stack holds it.
fn dispatch(
    controller: &Rc<RefCell<DomController>>,
    event: UiEvent,
) -> Option<crate::controller::HostRequest> {
    match controller.try_borrow_mut() {
        Ok(mut controller) => Some(controller.dispatch(event)),
        Err(_) => None,
    }
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn wasm_init() {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    console::log_1(&format!("pagesift {} initialized", env!("CARGO_PKG_VERSION")).into());
}

/// The page's interactive layer: search box, nav links and platform tabs.
#[wasm_bindgen]
pub struct PageSift {
    search: Option<Rc<RefCell<DomController>>>,
    tabs: Rc<RefCell<TabGroup>>,
    index: Rc<ContentIndex>,
}

#[wasm_bindgen]
impl PageSift {
    /// Mount into the current document.
    ///
    /// `config` is an optional `SearchConfig` object; `records` an optional
    /// array of `{title, body, section}` replacing the built-in index. When
    /// the hero element is missing the search box is skipped and only nav
    /// links and tabs are wired.
    #[wasm_bindgen]
    pub fn mount(config: Option<JsValue>, records: Option<JsValue>) -> Result<PageSift, JsValue> {
        let config: SearchConfig = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                serde_wasm_bindgen::from_value(value)
                    .map_err(|e| mount_error(&format!("invalid config: {}", e)))?
            }
            _ => SearchConfig::default(),
        };
        config.validate().map_err(js_error)?;

        let index = match records {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                let records: Vec<SearchRecord> = serde_wasm_bindgen::from_value(value)
                    .map_err(|e| mount_error(&format!("invalid records: {}", e)))?;
                ContentIndex::from_records(records).map_err(js_error)?
            }
            _ => default_index(),
        };

        let window = web_sys::window().ok_or_else(|| mount_error("no window"))?;
        let document = window.document().ok_or_else(|| mount_error("no document"))?;
        let rum = Rc::new(RumAnalytics {
            window: window.clone(),
        });
        let analytics: Rc<dyn Analytics> = rum.clone();

        wire_error_tracking(&window, rum)?;
        let search = mount_search(&document, &config, index.clone(), analytics.clone())?;
        wire_nav_links(&document, analytics.clone())?;
        let tabs = wire_tabs(&document, analytics.clone())?;
        watch_chart(&window, &document, &config, analytics.clone())?;
        if config.reveal_sections {
            reveal_sections(&document)?;
        }
        wire_load_timing(&window, &document, config.slow_load_ms, analytics.clone())?;

        emit(
            Some(analytics.as_ref()),
            &AnalyticsEvent::page_loaded_now(&config.page_id),
        );

        Ok(PageSift {
            search,
            tabs,
            index: Rc::new(index),
        })
    }

    /// Run a query against the index without touching the page.
    #[wasm_bindgen]
    pub fn search(&self, query: &str) -> Result<JsValue, JsValue> {
        let results: Vec<&SearchRecord> = search(&self.index, query);
        serde_wasm_bindgen::to_value(&results).map_err(|e| e.to_string().into())
    }

    /// Current search state: "idle", "typing" or "showing_results".
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        let state = self
            .search
            .as_ref()
            .and_then(|c| c.try_borrow().ok().map(|c| c.state()))
            .unwrap_or_default();
        match state {
            SearchState::Idle => "idle",
            SearchState::Typing => "typing",
            SearchState::ShowingResults => "showing_results",
        }
        .to_string()
    }

    /// Platform of the active tab, if the page has tabs.
    #[wasm_bindgen(getter, js_name = activeTab)]
    pub fn active_tab(&self) -> Option<String> {
        self.tabs
            .try_borrow()
            .ok()
            .and_then(|tabs| tabs.active().map(|tab| tab.platform.clone()))
    }
}

/// Build the search box after the hero element and wire its listeners.
fn mount_search(
    document: &Document,
    config: &SearchConfig,
    index: ContentIndex,
    analytics: Rc<dyn Analytics>,
) -> Result<Option<Rc<RefCell<DomController>>>, JsValue> {
    let Some(hero) = document.query_selector(&config.hero_selector)? else {
        console::warn_1(&format!("pagesift: no {} element, search disabled", config.hero_selector).into());
        return Ok(None);
    };
    let Some(parent) = hero.parent_node() else {
        return Ok(None);
    };

    let container = document.create_element("div")?;
    container.set_class_name(CONTAINER_CLASS);
    container.set_inner_html(&format!(
        r#"<div class="search-box"><input type="text" id="{input}" placeholder="{placeholder}"><button id="{button}">{label}</button></div><div id="{results}" class="search-results"></div>"#,
        input = INPUT_ID,
        button = BUTTON_ID,
        results = RESULTS_ID,
        placeholder = escape_html(&config.placeholder),
        label = escape_html(&config.button_label),
    ));
    parent.insert_before(&container, hero.next_sibling().as_ref())?;

    if let Some(head) = document.head() {
        let style = document.create_element("style")?;
        style.set_text_content(Some(SEARCH_STYLES));
        head.append_child(&style)?;
    }

    let input: HtmlInputElement = document
        .get_element_by_id(INPUT_ID)
        .ok_or_else(|| mount_error("search input missing after insert"))?
        .dyn_into()
        .map_err(|_| mount_error("search input is not an <input>"))?;
    let button = document
        .get_element_by_id(BUTTON_ID)
        .ok_or_else(|| mount_error("search button missing after insert"))?;
    let results: HtmlElement = document
        .get_element_by_id(RESULTS_ID)
        .ok_or_else(|| mount_error("results container missing after insert"))?
        .dyn_into()
        .map_err(|_| mount_error("results container is not an HTML element"))?;

    let controller = SearchController::new(
        index,
        config.clone(),
        DomNavigator {
            document: document.clone(),
        },
        DomResultsView {
            container: results.clone(),
        },
    )
    .with_analytics(analytics);
    let controller = Rc::new(RefCell::new(controller));

    {
        let controller = controller.clone();
        let field = input.clone();
        listen(&input, "input", move |_| {
            dispatch(&controller, UiEvent::Input(field.value()));
        })?;
    }

    {
        let controller = controller.clone();
        let field = input.clone();
        listen(&button, "click", move |_| {
            dispatch(&controller, UiEvent::ButtonClick(field.value()));
        })?;
    }

    {
        let controller = controller.clone();
        listen(&results, "click", move |event| {
            let row = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(&format!("[{}]", ROW_ATTR)).ok().flatten())
                .and_then(|row| row.get_attribute(ROW_ATTR))
                .and_then(|row| row.parse::<usize>().ok());
            if let Some(row) = row {
                dispatch(&controller, UiEvent::SelectResult(row));
            }
        })?;
    }

    {
        let controller = controller.clone();
        let container: Node = container.clone().into();
        listen(document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside_search = container.contains(target.as_ref());
            dispatch(&controller, UiEvent::DocumentClick { inside_search });
        })?;
    }

    {
        let controller = controller.clone();
        let field = input.clone();
        listen(document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let press = KeyPress {
                key: key.key(),
                ctrl: key.ctrl_key(),
                meta: key.meta_key(),
            };
            let Some(host) = dispatch(&controller, UiEvent::KeyDown(press)) else {
                return;
            };
            if host.prevent_default {
                event.prevent_default();
            }
            if host.focus_input {
                let _ = field.focus();
            }
        })?;
    }

    Ok(Some(controller))
}

/// Smooth-scroll `.nav-link` anchors to their sections.
fn wire_nav_links(document: &Document, analytics: Rc<dyn Analytics>) -> Result<(), JsValue> {
    for anchor in elements(document, ".nav-link") {
        let link = NavLink::new(
            anchor.get_attribute("href").unwrap_or_default(),
            anchor.text_content().unwrap_or_default(),
        );
        let mut navigator = DomNavigator {
            document: document.clone(),
        };
        let analytics = analytics.clone();
        listen(&anchor, "click", move |event| {
            let action = follow_link(&link, &mut navigator, Some(analytics.as_ref()));
            if action.prevents_default() {
                event.prevent_default();
            }
        })?;
    }
    Ok(())
}

/// Switch `.platform-panel`s from `.tab-button[data-platform]` clicks.
fn wire_tabs(
    document: &Document,
    analytics: Rc<dyn Analytics>,
) -> Result<Rc<RefCell<TabGroup>>, JsValue> {
    let buttons = elements(document, ".tab-button");
    let mut group = TabGroup::new(
        buttons
            .iter()
            .filter_map(|button| {
                let platform = button.get_attribute("data-platform")?;
                Some(Tab::new(platform, button.text_content().unwrap_or_default()))
            })
            .collect(),
    );

    // Adopt whatever tab the markup marks active
    if let Some(platform) = buttons
        .iter()
        .find(|button| button.class_list().contains(ACTIVE_CLASS))
        .and_then(|button| button.get_attribute("data-platform"))
    {
        group.set_active(&platform);
    }

    let group = Rc::new(RefCell::new(group));
    for button in &buttons {
        let Some(platform) = button.get_attribute("data-platform") else {
            continue;
        };
        let group = group.clone();
        let analytics = analytics.clone();
        let document = document.clone();
        listen(button, "click", move |_| {
            let Ok(mut tabs) = group.try_borrow_mut() else {
                return;
            };
            if tabs.select(&platform, Some(analytics.as_ref())) {
                sync_tab_classes(&document, &tabs);
            }
        })?;
    }

    Ok(group)
}

fn sync_tab_classes(document: &Document, tabs: &TabGroup) {
    for button in elements(document, ".tab-button") {
        let active = button
            .get_attribute("data-platform")
            .is_some_and(|platform| tabs.is_active(&platform));
        let _ = button.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }
    for panel in elements(document, ".platform-panel") {
        let active = tabs.is_active(&panel.id());
        let _ = panel.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }
}

// =============================================================================
// PAGE HEALTH
// =============================================================================

/// Report uncaught errors and unhandled rejections.
fn wire_error_tracking(window: &Window, rum: Rc<RumAnalytics>) -> Result<(), JsValue> {
    {
        let rum = rum.clone();
        listen(window, "error", move |event| {
            // Failed resource loads arrive as plain `Event`s
            let Some(event) = event.dyn_ref::<ErrorEvent>() else {
                return;
            };
            let report = ErrorReport::script(
                event.message(),
                event.filename(),
                event.lineno(),
                event.colno(),
            );
            rum.add_error(&event.error(), &report);
        })?;
    }

    listen(window, "unhandledrejection", move |event| {
        let Some(event) = event.dyn_ref::<PromiseRejectionEvent>() else {
            return;
        };
        let reason = event.reason();
        let report = ErrorReport::unhandled_rejection(describe_reason(&reason));
        rum.add_error(&reason, &report);
    })
}

fn describe_reason(reason: &JsValue) -> Option<String> {
    match reason.dyn_ref::<js_sys::Error>() {
        Some(error) => Some(String::from(error.message())),
        None => reason.as_string(),
    }
}

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

/// Report `slow_page_load` once the page has loaded.
fn wire_load_timing(
    window: &Window,
    document: &Document,
    threshold_ms: u32,
    analytics: Rc<dyn Analytics>,
) -> Result<(), JsValue> {
    let measure = {
        let window = window.clone();
        move || {
            let Some(performance) = window.performance() else {
                return;
            };
            let timing = performance.timing();
            let load_time = page_load_time(
                timing.navigation_start(),
                timing.load_event_end(),
                performance.now(),
            );
            if let Some(event) = slow_load_event(load_time, threshold_ms) {
                emit(Some(analytics.as_ref()), &event);
            }
        }
    };

    // Mounted after `load` already fired
    if document.ready_state() == "complete" {
        measure();
        return Ok(());
    }
    listen(window, "load", move |_| measure())
}

/// Report `chart_initialized`, then `chart_render_complete` when a canvas
/// shows up in the chart container.
fn watch_chart(
    window: &Window,
    document: &Document,
    config: &SearchConfig,
    analytics: Rc<dyn Analytics>,
) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(&config.chart_id) else {
        return Ok(());
    };

    let mut watch = ChartWatch::from_config(config, now(window));
    watch.initialized(Some(analytics.as_ref()));

    let has_canvas = |container: &Element| container.query_selector("canvas").ok().flatten().is_some();
    if watch.observe(has_canvas(&container), now(window), Some(analytics.as_ref())) {
        return Ok(());
    }

    let window = window.clone();
    let target = container.clone();
    let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
        move |_records: Array, observer: MutationObserver| {
            if watch.observe(has_canvas(&target), now(&window), Some(analytics.as_ref())) {
                observer.disconnect();
            }
        },
    );
    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    observer.observe_with_options(&container, &options)?;
    callback.forget();
    Ok(())
}

fn apply_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

/// Fade each `<section>` in the first time it scrolls into view.
fn reveal_sections(document: &Document) -> Result<(), JsValue> {
    let sections: Vec<HtmlElement> = elements(document, SECTION_SELECTOR)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect();
    if sections.is_empty() {
        return Ok(());
    }

    let mut tracker = RevealTracker::new(sections.len());
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = target
                    .get_attribute(REVEAL_ATTR)
                    .and_then(|index| index.parse::<usize>().ok())
                else {
                    continue;
                };
                if tracker.reveal(index) {
                    if let Some(section) = target.dyn_ref::<HtmlElement>() {
                        apply_styles(section, SHOWN_STYLES);
                    }
                    observer.unobserve(&target);
                }
            }
            if tracker.is_complete() {
                observer.disconnect();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

    for (index, section) in sections.iter().enumerate() {
        section.set_attribute(REVEAL_ATTR, &index.to_string())?;
        apply_styles(section, HIDDEN_STYLES);
        observer.observe(section);
    }
    callback.forget();
    Ok(())
}
