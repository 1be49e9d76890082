// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the pagesift command-line interface.
//!
//! Three subcommands: `search` runs one query through the controller and
//! prints the results panel, `inspect` lists and validates an index, and
//! `replay` feeds a script of browser events through the state machine so a
//! whole interaction can be checked without a browser.

pub mod display;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pagesift::{KeyPress, UiEvent};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pagesift",
    about = "In-page search for long-form documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a query through the search box and print the results panel
    Search {
        /// Search query, exactly as typed
        query: String,

        /// JSON array of {title, body, section} records (default: built-in page)
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// JSON search configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the panel's HTML instead of a table
        #[arg(long)]
        html: bool,
    },

    /// List the records of an index and validate it
    Inspect {
        /// JSON array of {title, body, section} records (default: built-in page)
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Replay a script of browser events through the search box
    ///
    /// Events: `type:<text>` (input value becomes <text>), `click` (search
    /// button), `escape`, `key:<name>`, `ctrl+k`, `cmd+k`, `outside` and
    /// `inside` (document clicks), `select:<row>`.
    Replay {
        /// Events, in order
        #[arg(required = true)]
        events: Vec<String>,

        /// JSON array of {title, body, section} records (default: built-in page)
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// JSON search configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Turns replay tokens into events, tracking what the input box holds so
/// `click` can carry the current value the way the browser does.
#[derive(Debug, Default)]
pub struct ScriptReader {
    input_value: String,
}

impl ScriptReader {
    pub fn read(&mut self, token: &str) -> Result<UiEvent> {
        let (verb, arg) = match token.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (token, None),
        };

        let event = match (verb.to_lowercase().as_str(), arg) {
            ("type", Some(text)) => {
                self.input_value = text.to_string();
                UiEvent::Input(self.input_value.clone())
            }
            ("click", None) => UiEvent::ButtonClick(self.input_value.clone()),
            ("escape" | "esc", None) => UiEvent::KeyDown(KeyPress::new("Escape")),
            ("key", Some(key)) if !key.is_empty() => UiEvent::KeyDown(KeyPress::new(key)),
            ("ctrl+k", None) => UiEvent::KeyDown(KeyPress::new("k").with_ctrl()),
            ("cmd+k" | "meta+k", None) => UiEvent::KeyDown(KeyPress::new("k").with_meta()),
            ("outside", None) => UiEvent::DocumentClick {
                inside_search: false,
            },
            ("inside", None) => UiEvent::DocumentClick {
                inside_search: true,
            },
            ("select", Some(row)) => {
                let row = row
                    .parse::<usize>()
                    .with_context(|| format!("bad row in {:?}", token))?;
                UiEvent::SelectResult(row)
            }
            _ => bail!("unknown event {:?}", token),
        };
        Ok(event)
    }
}
