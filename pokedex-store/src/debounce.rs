//! Debounced search input.
//!
//! Each keystroke stores the term and restarts a fixed-delay timer; the
//! search only fires once the timer runs out without another keystroke.
//! A timer that has already fired is never interrupted, so a running search
//! always reaches its finishing transition.

use crate::state::FetchOutcome;
use crate::store::Pokedex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub struct SearchDebouncer {
    pokedex: Pokedex,
    delay: Duration,
    /// Bumped on every input or cancel; a timer only fires if its ticket is
    /// still current.
    ticket: Arc<AtomicU64>,
    pending: Option<JoinHandle<Option<FetchOutcome>>>,
}

impl SearchDebouncer {
    /// Creates a debouncer using the store's configured delay.
    pub fn new(pokedex: Pokedex) -> Self {
        let delay = pokedex.config().search_debounce();
        Self::with_delay(pokedex, delay)
    }

    pub fn with_delay(pokedex: Pokedex, delay: Duration) -> Self {
        Self {
            pokedex,
            delay,
            ticket: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a keystroke: stores the term and restarts the timer.
    pub fn input(&mut self, term: impl Into<String>) {
        self.pokedex.set_search_term(term);
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let pokedex = self.pokedex.clone();
        let current = Arc::clone(&self.ticket);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != ticket {
                return None;
            }
            debug!("Debounce elapsed, searching {:?}", pokedex.search_term());
            Some(pokedex.search().await)
        }));
    }

    /// Drops a pending search whose timer has not fired yet.
    pub fn cancel(&mut self) {
        self.ticket.fetch_add(1, Ordering::SeqCst);
        self.pending = None;
    }

    /// Cancels the timer and searches immediately.
    pub async fn flush(&mut self) -> FetchOutcome {
        self.cancel();
        self.pokedex.search().await
    }

    /// Whether a timer or its search is still running.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Waits for the latest timer. Returns the search outcome if it fired.
    pub async fn settled(&mut self) -> Option<FetchOutcome> {
        let handle = self.pending.take()?;
        handle.await.ok().flatten()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.ticket.fetch_add(1, Ordering::SeqCst);
    }
}
