//! Core type definitions for the Pokedex catalog layer.
//!
//! This crate defines the small, dependency-free vocabulary shared by the
//! client and the store:
//! - Record identifiers derived from catalog locators
//! - Catalog name normalisation
//! - Pagination directions and fetch kinds

mod ids;
mod name;
mod page;

pub use ids::RecordId;
pub use name::normalize_name;
pub use page::{FetchKind, PageDirection};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("locator has no record id: {0}")]
    MissingLocatorId(String),
}
