//! Observable store state.
//!
//! The store keeps one [`PokedexState`] inside a watch cell. Every transition
//! is a single closure applied to that cell, so readers never observe a
//! half-applied transition and subscribers are notified once per transition.

use crate::record::Record;
use pokedex_client::ClientError;
use pokedex_types::{FetchKind, PageDirection};

/// Snapshot of everything the UI renders from.
#[derive(Debug, Clone, Default)]
pub struct PokedexState {
    /// Records currently displayed. Replaced wholesale, never spliced.
    pub records: Vec<Record>,
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
    /// A listing or search fetch is in flight.
    pub is_loading: bool,
    pub is_loading_next: bool,
    pub is_loading_prev: bool,
    pub is_searching: bool,
    /// The last listing or search attempt failed.
    pub is_error_loading: bool,
    /// Text last entered by the user.
    pub search_term: String,
    /// Sequence number of the latest listing or search attempt.
    pub generation: u64,
    pub last_attempt: Option<FetchKind>,
}

impl PokedexState {
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.previous_cursor.is_some()
    }

    /// Direction to repeat on reload: the failed listing's direction, or
    /// `Initial` when nothing failed.
    pub fn reload_direction(&self) -> PageDirection {
        if !self.is_error_loading {
            return PageDirection::Initial;
        }
        self.last_attempt
            .and_then(|kind| kind.direction())
            .unwrap_or_default()
    }

    /// Marks a new attempt as in flight and returns its generation.
    pub(crate) fn begin(&mut self, kind: FetchKind) -> u64 {
        self.is_loading = true;
        self.is_error_loading = false;
        match kind {
            FetchKind::Page(PageDirection::Initial) => {}
            FetchKind::Page(PageDirection::Next) => self.is_loading_next = true,
            FetchKind::Page(PageDirection::Previous) => self.is_loading_prev = true,
            FetchKind::Search => {
                self.is_searching = true;
                self.next_cursor = None;
                self.previous_cursor = None;
            }
        }
        self.generation += 1;
        self.last_attempt = Some(kind);
        self.generation
    }

    /// Applies an attempt's result and clears the loading flags.
    ///
    /// Returns `false` without touching anything when `generation` is no
    /// longer the latest attempt.
    pub(crate) fn finish(&mut self, generation: u64, apply: impl FnOnce(&mut Self)) -> bool {
        if generation != self.generation {
            return false;
        }
        apply(self);
        self.is_loading = false;
        self.is_loading_next = false;
        self.is_loading_prev = false;
        self.is_searching = false;
        true
    }
}

/// Why a listing or search request made no network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another listing or search fetch is in flight.
    InFlight,
    /// The requested direction has no cursor.
    NoCursor,
}

/// What happened to one listing or search attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records were published.
    Completed { count: usize },
    /// The catalog has no record with the searched name.
    NotFound,
    Skipped(SkipReason),
    /// The catalog call failed; previous records are kept.
    Failed(ClientError),
    /// A newer attempt superseded this one; its result was discarded.
    Stale,
}

impl FetchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
