//! Text and JSON rendering of the store state.

use pokedex_store::{PokedexState, Record, RecordSnapshot};
use serde::Serialize;
use std::fmt::Write;

/// Machine-readable view of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub search_term: String,
    pub records: Vec<RecordSnapshot>,
    pub has_next: bool,
    pub has_prev: bool,
    pub is_loading: bool,
    pub is_error_loading: bool,
}

impl View {
    pub fn from_state(state: &PokedexState) -> Self {
        Self {
            search_term: state.search_term.clone(),
            records: state.records.iter().map(Record::snapshot).collect(),
            has_next: state.has_next(),
            has_prev: state.has_prev(),
            is_loading: state.is_loading,
            is_error_loading: state.is_error_loading,
        }
    }
}

pub fn render_json(state: &PokedexState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&View::from_state(state))
}

pub fn render_text(state: &PokedexState) -> String {
    let mut out = String::new();

    if state.is_loading {
        out.push_str("Loading…\n");
    }
    if state.records.is_empty() && !state.is_loading {
        out.push_str("No records.\n");
    }
    for record in &state.records {
        render_record(&mut out, record);
    }

    let mut hints = Vec::new();
    if state.has_prev() {
        hints.push("`prev` for the previous page");
    }
    if state.has_next() {
        hints.push("`next` for the next page");
    }
    if !hints.is_empty() {
        let _ = writeln!(out, "-- {}", hints.join(", "));
    }

    if state.is_error_loading {
        out.push_str("!! Failed to load records. Type `reload` to retry.\n");
    }
    out
}

fn render_record(out: &mut String, record: &Record) {
    let id = record
        .id()
        .map_or_else(|| "?".to_string(), |id| id.to_string());

    let Some(detail) = record.detail() else {
        let _ = writeln!(out, "#{id} {} (loading…)", record.name());
        return;
    };

    let types = match (&detail.primary_type, &detail.secondary_type) {
        (Some(primary), Some(secondary)) => format!(" [{primary}/{secondary}]"),
        (Some(only), None) | (None, Some(only)) => format!(" [{only}]"),
        (None, None) => String::new(),
    };
    let _ = writeln!(out, "#{id} {}{types}", record.name());
    if !detail.sprite.is_empty() {
        let _ = writeln!(out, "    {}", detail.sprite);
    }
    if !detail.description.is_empty() {
        let _ = writeln!(out, "    {}", detail.description);
    }
}
