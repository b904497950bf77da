//! Error types for the catalog boundary.

use thiserror::Error;

/// Result type for catalog operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors reported by a catalog client.
///
/// Nothing crosses the client boundary as a panic or an unwinding error;
/// callers inspect these values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status}: {url}")]
    Status { status: u16, url: String },

    /// The catalog has no resource under this key.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected resource shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Returns whether this is the catalog's dedicated "not found" signal.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
