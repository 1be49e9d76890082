//! State machine invariants over random event sequences.

use super::common::{observed_controller, shown_titles};
use pagesift::{
    default_index, matching_positions, query_len, KeyPress, SearchState, UiEvent,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{0,3}",
        Just("error".to_string()),
        Just("mobile".to_string()),
        Just("zzzzqqqq".to_string()),
    ]
}

fn event_strategy() -> impl Strategy<Value = UiEvent> {
    prop_oneof![
        3 => query_strategy().prop_map(UiEvent::Input),
        1 => query_strategy().prop_map(UiEvent::ButtonClick),
        1 => Just(UiEvent::KeyDown(KeyPress::new("Escape"))),
        1 => Just(UiEvent::KeyDown(KeyPress::new("k").with_ctrl())),
        1 => "[a-zA-Z]".prop_map(|k| UiEvent::KeyDown(KeyPress::new(k))),
        1 => any::<bool>().prop_map(|inside_search| UiEvent::DocumentClick { inside_search }),
        1 => (0usize..4).prop_map(UiEvent::SelectResult),
    ]
}

proptest! {
    /// After any event, the panel is visible exactly in ShowingResults.
    #[test]
    fn prop_panel_visible_iff_showing(events in prop::collection::vec(event_strategy(), 1..20)) {
        let (mut controller, _) = observed_controller(default_index());
        for event in events {
            controller.dispatch(event);
            prop_assert_eq!(
                controller.panel().is_visible(),
                controller.state() == SearchState::ShowingResults
            );
            prop_assert_eq!(controller.view().panel(), controller.panel());
        }
    }

    /// Escape always lands in Idle with the panel hidden.
    #[test]
    fn prop_escape_always_idles(events in prop::collection::vec(event_strategy(), 0..15)) {
        let (mut controller, _) = observed_controller(default_index());
        for event in events {
            controller.dispatch(event);
        }
        controller.dispatch(UiEvent::KeyDown(KeyPress::new("Escape")));
        prop_assert_eq!(controller.state(), SearchState::Idle);
        prop_assert!(!controller.panel().is_visible());
    }

    /// The state after an input depends only on that input's length.
    #[test]
    fn prop_input_state_by_length(
        prefix in prop::collection::vec(event_strategy(), 0..10),
        query in query_strategy(),
    ) {
        let (mut controller, _) = observed_controller(default_index());
        for event in prefix {
            controller.dispatch(event);
        }
        controller.dispatch(UiEvent::Input(query.clone()));

        let expected = match query_len(&query) {
            0 => SearchState::Idle,
            1 => SearchState::Typing,
            _ => SearchState::ShowingResults,
        };
        prop_assert_eq!(controller.state(), expected);
    }

    /// Rows on display are the matching records, in index order.
    #[test]
    fn prop_shown_rows_match_search(query in "[a-z]{2,4}") {
        let index = default_index();
        let expected: Vec<String> = matching_positions(&index, &query)
            .into_iter()
            .filter_map(|p| index.get(p).map(|r| r.title.clone()))
            .collect();

        let (mut controller, _) = observed_controller(index);
        controller.dispatch(UiEvent::Input(query));
        prop_assert_eq!(shown_titles(&controller), expected);
    }

    /// Analytics hears about a search exactly when the threshold is met.
    #[test]
    fn prop_reports_only_past_threshold(query in query_strategy()) {
        let (mut controller, analytics) = observed_controller(default_index());
        controller.dispatch(UiEvent::Input(query.clone()));
        let expected = if query_len(&query) >= 2 { 2 } else { 0 };
        prop_assert_eq!(analytics.events().len(), expected);
    }

    /// The shortcut never changes the search state.
    #[test]
    fn prop_shortcut_preserves_state(events in prop::collection::vec(event_strategy(), 0..10)) {
        let (mut controller, _) = observed_controller(default_index());
        for event in events {
            controller.dispatch(event);
        }
        let before = controller.query_state().clone();
        let host = controller.dispatch(UiEvent::KeyDown(KeyPress::new("k").with_meta()));
        prop_assert!(host.prevent_default && host.focus_input);
        prop_assert_eq!(controller.query_state(), &before);
    }
}
