//! Catalog name normalisation.

/// Normalises a catalog name or user search term into a catalog key.
///
/// Trims surrounding whitespace and lower-cases. Idempotent.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}
