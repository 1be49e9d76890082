// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use pagesift::{
    default_index, Analytics, ContentIndex, Effect, MemoryView, PageSections, PanelEntry,
    SearchConfig, SearchController, SearchRecord, SectionId, TracingAnalytics, Transition,
};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands, ScriptReader};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Search {
            query,
            index,
            config,
            html,
        } => run_search(&query, index.as_deref(), config.as_deref(), html),
        Commands::Inspect { index } => run_inspect(index.as_deref()),
        Commands::Replay {
            events,
            index,
            config,
        } => run_replay(&events, index.as_deref(), config.as_deref()),
    };

    if let Err(e) = outcome {
        eprintln!("{}", error_line(&format!("❌ {:#}", e)));
        std::process::exit(1);
    }
}

fn load_index(path: Option<&Path>) -> Result<ContentIndex> {
    match path {
        Some(path) => ContentIndex::from_path(path)
            .with_context(|| format!("loading index {}", path.display())),
        None => Ok(default_index()),
    }
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    match path {
        Some(path) => SearchConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SearchConfig::default()),
    }
}

fn controller_for(
    index: ContentIndex,
    config: SearchConfig,
) -> SearchController<PageSections, MemoryView> {
    let page = PageSections::from_index(&index);
    SearchController::new(index, config, page, MemoryView::default())
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn run_search(
    query: &str,
    index: Option<&Path>,
    config: Option<&Path>,
    html: bool,
) -> Result<()> {
    let index = load_index(index)?;
    let config = load_config(config)?;
    let min_len = config.min_query_len;

    let mut controller = controller_for(index, config);
    controller.dispatch(pagesift::UiEvent::Input(query.to_string()));
    let panel = controller.panel();

    if html {
        println!("{}", panel.to_html());
        return Ok(());
    }

    double_header();
    title(&format!("SEARCH \"{}\"", truncate(query, 50)));
    double_footer();

    section_top("PANEL");
    row(&format!(" state  {}", state_badge(controller.state())));
    if !panel.is_visible() {
        row(&themed(
            GRAY,
            &[DIM],
            &format!(" hidden: queries need at least {} characters", min_len),
        ));
        section_bot();
        return Ok(());
    }

    for (i, entry) in panel.entries().iter().enumerate() {
        section_mid(&format!("{}", i));
        print_entry(entry, query);
    }
    section_bot();
    Ok(())
}

fn print_entry(entry: &PanelEntry, query: &str) {
    match entry {
        PanelEntry::Result {
            title,
            body,
            section_id,
            ..
        } => {
            let width = BOX_WIDTH.saturating_sub(14);
            row(&format!(
                " {} {}",
                pad_right(&highlight(&truncate(title, width), query), width),
                section_label(section_id.as_str())
            ));
            row(&format!(
                " {}",
                highlight(&truncate(body, BOX_WIDTH - 2), query)
            ));
        }
        PanelEntry::Message(text) => row(&themed(YELLOW, &[], &format!(" {}", text))),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(index: Option<&Path>) -> Result<()> {
    let index = match index {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let records: Vec<SearchRecord> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
            // Show the records even when they fail validation
            ContentIndex::new(records)
        }
        None => default_index(),
    };

    double_header();
    title("CONTENT INDEX");
    double_footer();

    section_top("RECORDS");
    for (position, record) in index.iter().enumerate() {
        let title_col = pad_right(&truncate(&record.title, 30), 30);
        let body_col = pad_right(&truncate(&record.body, 30), 30);
        row(&format!(
            " {:>3}  {}  {}  {}",
            position,
            themed(BLUE, &[BOLD], &title_col),
            themed(GRAY, &[], &body_col),
            section_label(record.section_id.as_str())
        ));
    }

    section_mid("SECTIONS");
    for section in index.sections() {
        let count = index.in_section(section).count();
        row(&format!(
            " {}  {} record{}",
            pad_right(&section_label(section.as_str()), 24),
            count,
            if count == 1 { "" } else { "s" }
        ));
    }

    section_mid("VALIDATION");
    let valid = match index.validate() {
        Ok(()) => {
            row(&themed(GREEN, &[BOLD], &format!(" ok: {} records", index.len())));
            true
        }
        Err(e) => {
            row(&themed(RED, &[BOLD], &format!(" {}", e)));
            false
        }
    };
    section_bot();

    if !valid {
        anyhow::bail!("index failed validation");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// REPLAY
// ═══════════════════════════════════════════════════════════════════════════

/// Analytics sink for replays: logs through tracing and keeps each event so
/// it can be printed next to the step that caused it.
#[derive(Default)]
struct Transcript {
    pending: RefCell<Vec<String>>,
}

impl Transcript {
    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

impl Analytics for Transcript {
    fn record(&self, name: &str, attributes: &Map<String, Value>) {
        TracingAnalytics.record(name, attributes);
        let attributes = Value::Object(attributes.clone());
        self.pending
            .borrow_mut()
            .push(format!("{} {}", name, attributes));
    }
}

fn describe_effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::Render(outcome) => Some(format!("render {} result(s)", outcome.positions().len())),
        Effect::HidePanel => Some("hide panel".to_string()),
        Effect::Navigate(section) => Some(format!("navigate {}", section_label(section.as_str()))),
        Effect::FocusInput => Some("focus input".to_string()),
        Effect::PreventDefault => Some("prevent default".to_string()),
        // Analytics is printed from the transcript, after the navigator has spoken
        Effect::Record(_) => None,
    }
}

fn run_replay(tokens: &[String], index: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let index = load_index(index)?;
    let config = load_config(config)?;

    let transcript = Rc::new(Transcript::default());
    let mut controller =
        controller_for(index, config).with_analytics(transcript.clone() as Rc<dyn Analytics>);
    let mut reader = ScriptReader::default();

    double_header();
    title("REPLAY");
    double_footer();
    section_top("EVENTS");

    for (step, token) in tokens.iter().enumerate() {
        let event = reader.read(token)?;

        // Preview the pure transition for display; dispatch performs it
        let Transition { effects, .. } = pagesift::transition(
            controller.query_state(),
            &event,
            controller.index(),
            controller.config(),
        );
        let before = controller.state();
        controller.dispatch(event);
        let after = controller.state();

        row(&format!(
            " {:>2}  {}  {} → {}",
            step,
            pad_right(&themed(BLUE, &[BOLD], token), 20),
            state_label(before),
            state_badge(after)
        ));
        for line in effects.iter().filter_map(describe_effect) {
            row(&format!("       {}", themed(GRAY, &[], &line)));
        }
        for line in transcript.drain() {
            row(&format!("       {}", themed(MAGENTA, &[], &truncate(&line, BOX_WIDTH - 8))));
        }
    }

    section_mid("FINAL");
    row(&format!(" state  {}", state_badge(controller.state())));
    let visits: Vec<String> = controller
        .navigator()
        .visits()
        .iter()
        .map(SectionId::to_string)
        .collect();
    row(&format!(" visits {}", visits.join(", ")));
    section_bot();
    Ok(())
}
