//! The controller with its collaborators: what the user sees and what gets
//! reported, one interaction at a time.

use super::common::{
    controller_on_empty_page, drive, example_index, observed_controller, shown_message,
    shown_titles, type_text,
};
use pagesift::{
    default_index, HostRequest, KeyPress, MemoryView, PageSections, Panel, SearchConfig,
    SearchController, SearchState, SectionId, UiEvent,
};
use serde_json::json;

fn escape() -> UiEvent {
    UiEvent::KeyDown(KeyPress::new("Escape"))
}

// ============================================================================
// TYPING AND RESULTS
// ============================================================================

#[test]
fn typing_mobile_shows_one_result_for_taxonomy() {
    let (mut controller, _) = observed_controller(default_index());
    type_text(&mut controller, "mobile");

    assert_eq!(controller.state(), SearchState::ShowingResults);
    assert_eq!(shown_titles(&controller), vec!["Mobile Errors"]);
    assert_eq!(
        controller.panel().entries()[0].section_id(),
        Some(&SectionId::new("taxonomy"))
    );

    controller.dispatch(UiEvent::SelectResult(0));
    assert_eq!(controller.navigator().current(), Some(&SectionId::new("taxonomy")));
}

#[test]
fn first_keystroke_keeps_panel_hidden() {
    let (mut controller, analytics) = observed_controller(example_index());
    controller.dispatch(UiEvent::Input("m".into()));

    assert_eq!(controller.state(), SearchState::Typing);
    assert_eq!(controller.panel(), &Panel::Hidden);
    assert!(analytics.events().is_empty());
}

#[test]
fn no_match_shows_message() {
    let (mut controller, _) = observed_controller(default_index());
    controller.dispatch(UiEvent::Input("zzzzqqqq".into()));

    assert_eq!(controller.state(), SearchState::ShowingResults);
    assert_eq!(shown_message(&controller).as_deref(), Some("No results found"));
    assert!(shown_titles(&controller).is_empty());
}

#[test]
fn configured_message_replaces_default() {
    let config = SearchConfig {
        no_results_text: "Nothing matched".into(),
        ..SearchConfig::default()
    };
    let index = default_index();
    let page = PageSections::from_index(&index);
    let mut controller = SearchController::new(index, config, page, MemoryView::default());
    controller.dispatch(UiEvent::Input("zzzzqqqq".into()));
    assert_eq!(shown_message(&controller).as_deref(), Some("Nothing matched"));
}

#[test]
fn view_mirrors_controller_panel() {
    let (mut controller, _) = observed_controller(default_index());
    controller.dispatch(UiEvent::Input("error".into()));
    assert_eq!(controller.view().panel(), controller.panel());

    controller.dispatch(escape());
    assert_eq!(controller.view().panel(), &Panel::Hidden);
}

// ============================================================================
// DISMISSAL
// ============================================================================

#[test]
fn escape_hides_results() {
    let (mut controller, _) = observed_controller(example_index());
    drive(&mut controller, [UiEvent::Input("sentry".into()), escape()]);

    assert_eq!(controller.state(), SearchState::Idle);
    assert!(!controller.panel().is_visible());
}

#[test]
fn outside_click_hides_results_inside_click_does_not() {
    let (mut controller, _) = observed_controller(example_index());
    controller.dispatch(UiEvent::Input("sentry".into()));

    controller.dispatch(UiEvent::DocumentClick { inside_search: true });
    assert!(controller.panel().is_visible());

    controller.dispatch(UiEvent::DocumentClick {
        inside_search: false,
    });
    assert_eq!(controller.state(), SearchState::Idle);
    assert!(!controller.panel().is_visible());
}

#[test]
fn typing_again_after_escape_reopens() {
    let (mut controller, _) = observed_controller(example_index());
    drive(
        &mut controller,
        [
            UiEvent::Input("sentry".into()),
            escape(),
            UiEvent::Input("sentry".into()),
        ],
    );
    assert_eq!(controller.state(), SearchState::ShowingResults);
    assert_eq!(shown_titles(&controller), vec!["Sentry"]);
}

#[test]
fn escape_keeps_text_so_button_click_reruns_it() {
    let (mut controller, _) = observed_controller(example_index());
    drive(
        &mut controller,
        [
            UiEvent::Input("sentry".into()),
            escape(),
            // The input still reads "sentry"; the button submits it again
            UiEvent::ButtonClick("sentry".into()),
        ],
    );
    assert_eq!(controller.state(), SearchState::ShowingResults);
    assert_eq!(shown_titles(&controller), vec!["Sentry"]);
}

// ============================================================================
// SELECTION AND NAVIGATION
// ============================================================================

#[test]
fn selecting_result_scrolls_and_closes() {
    let (mut controller, analytics) = observed_controller(example_index());
    type_text(&mut controller, "mobile");
    analytics.clear();

    controller.dispatch(UiEvent::SelectResult(0));

    assert_eq!(controller.state(), SearchState::Idle);
    assert!(!controller.panel().is_visible());
    assert_eq!(
        controller.navigator().visits(),
        &[SectionId::new("taxonomy")]
    );

    let events = analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "search_result_click");
    assert_eq!(events[0].attributes["section"], json!("taxonomy"));
    assert_eq!(events[0].attributes["source"], json!("search_results"));
}

#[test]
fn missing_section_is_a_silent_no_op() {
    let (mut controller, analytics) = controller_on_empty_page(example_index());
    controller.dispatch(UiEvent::Input("cost".into()));
    analytics.clear();

    controller.dispatch(UiEvent::SelectResult(0));

    // Panel still closes; nothing scrolled, nothing reported
    assert_eq!(controller.state(), SearchState::Idle);
    assert!(controller.navigator().visits().is_empty());
    assert!(analytics.events().is_empty());
}

// ============================================================================
// KEYBOARD SHORTCUT
// ============================================================================

#[test]
fn ctrl_k_asks_host_to_focus_and_suppress_default() {
    let (mut controller, _) = observed_controller(example_index());
    let host = controller.dispatch(UiEvent::KeyDown(KeyPress::new("k").with_ctrl()));
    assert_eq!(
        host,
        HostRequest {
            prevent_default: true,
            focus_input: true,
        }
    );
    assert_eq!(controller.state(), SearchState::Idle);
}

#[test]
fn other_events_need_nothing_from_host() {
    let (mut controller, _) = observed_controller(example_index());
    let host = controller.dispatch(UiEvent::Input("sentry".into()));
    assert_eq!(host, HostRequest::default());
}

// ============================================================================
// ANALYTICS
// ============================================================================

#[test]
fn search_reports_performed_then_results() {
    let (mut controller, analytics) = observed_controller(default_index());
    controller.dispatch(UiEvent::Input("zzzzqqqq".into()));

    let events = analytics.events();
    assert_eq!(
        analytics.names(),
        vec!["search_performed", "search_results"]
    );
    assert_eq!(events[0].attributes["query"], json!("zzzzqqqq"));
    assert_eq!(events[0].attributes["query_length"], json!(8));
    assert_eq!(events[1].attributes["results_count"], json!(0));
    assert_eq!(events[1].attributes["found_results"], json!(false));
}

#[test]
fn query_length_counts_characters() {
    let (mut controller, analytics) = observed_controller(example_index());
    controller.dispatch(UiEvent::Input("🔍".into()));
    assert_eq!(controller.state(), SearchState::Typing);

    controller.dispatch(UiEvent::Input("🔍🔍".into()));
    let events = analytics.events();
    assert_eq!(events[0].attributes["query_length"], json!(2));
}

#[test]
fn every_keystroke_past_threshold_reports() {
    let (mut controller, analytics) = observed_controller(example_index());
    type_text(&mut controller, "mob");
    // "mo" and "mob" each report a pair; "m" reports nothing
    assert_eq!(analytics.events().len(), 4);
}

#[test]
fn controller_without_analytics_still_works() {
    let index = example_index();
    let page = PageSections::from_index(&index);
    let mut controller =
        SearchController::new(index, SearchConfig::default(), page, MemoryView::default());
    assert!(controller.analytics().is_none());

    drive(
        &mut controller,
        [UiEvent::Input("sentry".into()), UiEvent::SelectResult(0)],
    );
    assert_eq!(controller.navigator().current(), Some(&SectionId::new("tools")));
}
