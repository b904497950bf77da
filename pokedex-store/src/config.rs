//! Store configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Pokedex store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    /// Records per listing page.
    pub page_size: usize,
    /// Language code whose description entry is shown.
    pub description_language: String,
    /// Quiet period before a typed search fires (ms).
    pub search_debounce_ms: u64,
    /// Upper bound on enrichment pipelines running at once.
    pub max_concurrent_enrichments: usize,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            description_language: "en".to_string(),
            search_debounce_ms: 300,
            max_concurrent_enrichments: 20,
        }
    }
}

impl PokedexConfig {
    /// Debounce delay as a `Duration`.
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
