//! Catalog client for the Pokedex store.
//!
//! The store never talks HTTP directly. It consumes the [`CatalogClient`]
//! contract, which reports every failure as a [`ClientError`] value and keeps
//! the catalog's "not found" answer distinguishable from generic failure.
//!
//! [`PokeApiClient`] implements the contract against the PokeAPI v2 REST
//! catalog using `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use pokedex_client::{CatalogClient, PokeApiClient, PokeApiConfig};
//!
//! # async fn run() -> pokedex_client::ClientResult<()> {
//! let client = PokeApiClient::new(PokeApiConfig::default())?;
//! let page = client.list_page(20, None).await?;
//! for item in &page.results {
//!     println!("{} -> {}", item.name, item.url);
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
pub mod pokeapi;
pub mod resources;

pub use catalog::CatalogClient;
pub use error::{ClientError, ClientResult};
pub use pokeapi::{PokeApiClient, PokeApiConfig, DEFAULT_BASE_URL};
pub use resources::{
    DetailResource, FlavorTextEntry, FormResource, NamedResource, PageResource, Sprites,
    SpeciesResource, TypeSlot,
};
