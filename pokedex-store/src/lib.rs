//! Pokedex store: the catalog data-access layer.
//!
//! # Architecture
//!
//! - **Record**: shared, observable handle to one catalog item. Starts
//!   shallow, resolved once by enrichment.
//! - **IdentityCache**: append-only set of resolved records, by id and name.
//! - **Enrichment**: per-record pipeline fetching detail, sprite and
//!   description.
//! - **Pokedex**: orchestrates listing, pagination, search and enrichment,
//!   and owns the observable loading / error state.
//!
//! ## Fetch flow
//!
//! 1. **Guard**: drop the request if a listing or search is in flight
//! 2. **Fetch**: one catalog call for the page or the searched name
//! 3. **Publish**: replace the displayed records with shallow records
//! 4. **Enrich**: resolve new records in parallel, then cache them
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pokedex_client::{PokeApiClient, PokeApiConfig};
//! use pokedex_store::{Pokedex, PokedexConfig};
//! use pokedex_types::PageDirection;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(PokeApiClient::new(PokeApiConfig::default())?);
//! let pokedex = Pokedex::new(client, PokedexConfig::default());
//!
//! pokedex.fetch_page(PageDirection::Initial).await;
//! pokedex.wait_for_enrichment().await;
//! for record in pokedex.records() {
//!     println!("{} {}", record.name(), record.sprite());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod config;
pub mod debounce;
pub mod enrichment;
pub mod record;
pub mod state;
mod store;

pub use cache::IdentityCache;
pub use config::PokedexConfig;
pub use debounce::SearchDebouncer;
pub use enrichment::{enrich, Enriched, EnrichmentError, EnrichmentSource};
pub use record::{Record, RecordDetail, RecordSnapshot};
pub use state::{FetchOutcome, PokedexState, SkipReason};
pub use store::Pokedex;
