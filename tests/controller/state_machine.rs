//! `transition` in isolation: no collaborators, just states and effects.

use super::common::example_index;
use pagesift::{
    transition, AnalyticsEvent, ContentIndex, Effect, KeyPress, QueryState, SearchConfig,
    SearchOutcome, SearchState, SectionId, UiEvent,
};

fn step(state: &QueryState, event: UiEvent) -> (QueryState, Vec<Effect>) {
    let t = transition(state, &event, &example_index(), &SearchConfig::default());
    (t.next, t.effects)
}

/// Drive from Idle through `events`, returning the final state.
fn after(events: Vec<UiEvent>) -> QueryState {
    events
        .into_iter()
        .fold(QueryState::default(), |state, event| step(&state, event).0)
}

fn showing(query: &str) -> QueryState {
    after(vec![UiEvent::Input(query.into())])
}

// ============================================================================
// INPUT
// ============================================================================

#[test]
fn one_char_is_typing_with_hidden_panel() {
    let (next, effects) = step(&QueryState::default(), UiEvent::Input("m".into()));
    assert_eq!(next.state(), SearchState::Typing);
    assert_eq!(next.outcome(), &SearchOutcome::NotSearched);
    assert_eq!(effects, vec![Effect::HidePanel]);
}

#[test]
fn reaching_threshold_searches_and_reports() {
    let (next, effects) = step(&QueryState::default(), UiEvent::Input("mo".into()));
    assert_eq!(next.state(), SearchState::ShowingResults);
    assert_eq!(next.query(), "mo");

    let positions = next.outcome().positions().to_vec();
    assert_eq!(positions, vec![0]);
    assert_eq!(
        effects,
        vec![
            Effect::Record(AnalyticsEvent::SearchPerformed {
                query: "mo".into(),
                query_length: 2,
            }),
            Effect::Record(AnalyticsEvent::SearchResults {
                query: "mo".into(),
                results_count: 1,
            }),
            Effect::Render(SearchOutcome::Searched(positions)),
        ]
    );
}

#[test]
fn shrinking_below_threshold_hides_again() {
    let (next, effects) = step(&showing("mo"), UiEvent::Input("m".into()));
    assert_eq!(next.state(), SearchState::Typing);
    assert_eq!(effects, vec![Effect::HidePanel]);
}

#[test]
fn clearing_the_input_goes_idle() {
    let (next, effects) = step(&showing("mobile"), UiEvent::Input(String::new()));
    assert_eq!(next, QueryState::default());
    assert_eq!(effects, vec![Effect::HidePanel]);
}

#[test]
fn button_click_behaves_like_input() {
    let typed = step(&QueryState::default(), UiEvent::Input("sentry".into()));
    let clicked = step(&QueryState::default(), UiEvent::ButtonClick("sentry".into()));
    assert_eq!(typed, clicked);
}

#[test]
fn no_match_still_shows_results_state() {
    let state = showing("zzzzqqqq");
    assert_eq!(state.state(), SearchState::ShowingResults);
    assert!(state.outcome().was_searched());
    assert!(state.outcome().positions().is_empty());
}

#[test]
fn custom_threshold_is_respected() {
    let config = SearchConfig {
        min_query_len: 4,
        ..SearchConfig::default()
    };
    let t = transition(
        &QueryState::default(),
        &UiEvent::Input("mob".into()),
        &example_index(),
        &config,
    );
    assert_eq!(t.next.state(), SearchState::Typing);
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn escape_goes_idle_from_every_state() {
    for state in [
        QueryState::default(),
        after(vec![UiEvent::Input("m".into())]),
        showing("mobile"),
    ] {
        let (next, effects) = step(&state, UiEvent::KeyDown(KeyPress::new("Escape")));
        assert_eq!(next.state(), SearchState::Idle);
        assert_eq!(effects, vec![Effect::HidePanel]);
    }
}

#[test]
fn shortcut_focuses_without_changing_state() {
    let state = showing("mobile");
    for key in [KeyPress::new("k").with_ctrl(), KeyPress::new("k").with_meta()] {
        let (next, effects) = step(&state, UiEvent::KeyDown(key));
        assert_eq!(next, state);
        assert_eq!(effects, vec![Effect::PreventDefault, Effect::FocusInput]);
    }
}

#[test]
fn plain_k_and_other_keys_do_nothing() {
    let state = showing("mobile");
    for key in [KeyPress::new("k"), KeyPress::new("Enter"), KeyPress::new("K").with_ctrl()] {
        let (next, effects) = step(&state, UiEvent::KeyDown(key));
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

// ============================================================================
// CLICKS
// ============================================================================

#[test]
fn outside_click_closes_results() {
    let (next, effects) = step(
        &showing("mobile"),
        UiEvent::DocumentClick {
            inside_search: false,
        },
    );
    assert_eq!(next.state(), SearchState::Idle);
    assert_eq!(effects, vec![Effect::HidePanel]);
}

#[test]
fn inside_click_keeps_results() {
    let state = showing("mobile");
    let (next, effects) = step(&state, UiEvent::DocumentClick { inside_search: true });
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn outside_click_while_typing_is_ignored() {
    let state = after(vec![UiEvent::Input("m".into())]);
    let (next, effects) = step(
        &state,
        UiEvent::DocumentClick {
            inside_search: false,
        },
    );
    assert_eq!(next.state(), SearchState::Typing);
    assert!(effects.is_empty());
}

#[test]
fn selecting_a_row_navigates_then_hides() {
    let (next, effects) = step(&showing("sentry"), UiEvent::SelectResult(0));
    assert_eq!(next.state(), SearchState::Idle);
    assert_eq!(
        effects,
        vec![Effect::Navigate(SectionId::new("tools")), Effect::HidePanel]
    );
}

#[test]
fn selecting_out_of_range_or_while_hidden_is_ignored() {
    let state = showing("sentry");
    let (next, effects) = step(&state, UiEvent::SelectResult(5));
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (next, effects) = step(&QueryState::default(), UiEvent::SelectResult(0));
    assert_eq!(next.state(), SearchState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn selecting_the_no_results_row_is_ignored() {
    let state = showing("zzzzqqqq");
    let (next, effects) = step(&state, UiEvent::SelectResult(0));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn transitions_are_deterministic() {
    let index = ContentIndex::new(example_index().records().to_vec());
    let config = SearchConfig::default();
    let event = UiEvent::Input("error".into());
    let a = transition(&QueryState::default(), &event, &index, &config);
    let b = transition(&QueryState::default(), &event, &index, &config);
    assert_eq!(a, b);
}
