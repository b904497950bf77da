//! Settings file loading and command-line overrides.

use anyhow::{bail, Context, Result};
use pokedex_client::PokeApiConfig;
use pokedex_store::PokedexConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Settings file: `{ "api": {...}, "store": {...} }`. Missing fields take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: PokeApiConfig,
    pub store: PokedexConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading config from {:?}", path);
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, base_url: Option<String>, page_size: Option<usize>) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(page_size) = page_size {
            self.store.page_size = page_size;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.page_size == 0 {
            bail!("page size must be at least 1");
        }
        if self.api.base_url.trim().is_empty() {
            bail!("base URL must not be empty");
        }
        Ok(())
    }
}
