// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the search box state machine.
//!
//! Random event streams against the built-in page. The controller must never
//! panic, the panel must be visible exactly while results are showing, and
//! every scroll must land on a section the page actually has.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pagesift::testing::make_controller;
use pagesift::{default_index, KeyPress, SearchState, UiEvent};

#[derive(Debug, Arbitrary)]
enum Op {
    Input(String),
    Button(String),
    Key { key: String, ctrl: bool, meta: bool },
    Escape,
    Click { inside: bool },
    Select(u8),
}

impl Op {
    fn into_event(self) -> UiEvent {
        match self {
            Op::Input(text) => UiEvent::Input(text.chars().take(64).collect()),
            Op::Button(text) => UiEvent::ButtonClick(text.chars().take(64).collect()),
            Op::Key { key, ctrl, meta } => UiEvent::KeyDown(KeyPress { key, ctrl, meta }),
            Op::Escape => UiEvent::KeyDown(KeyPress::new("Escape")),
            Op::Click { inside } => UiEvent::DocumentClick {
                inside_search: inside,
            },
            Op::Select(row) => UiEvent::SelectResult(usize::from(row)),
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let index = default_index();
    let sections: Vec<_> = index.sections().into_iter().cloned().collect();
    let mut controller = make_controller(index);

    for op in ops.into_iter().take(256) {
        controller.dispatch(op.into_event());

        assert_eq!(
            controller.panel().is_visible(),
            controller.state() == SearchState::ShowingResults
        );
        if controller.state() == SearchState::Idle {
            assert!(controller.query_state().query().is_empty());
        }
    }

    assert!(controller
        .navigator()
        .visits()
        .iter()
        .all(|visit| sections.contains(visit)));
});
