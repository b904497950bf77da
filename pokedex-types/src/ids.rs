//! Identifier types used throughout the catalog layer.
//!
//! Catalog ids are small positive integers. They are only ever taken from
//! catalog data: either a numeric `id` field or the trailing path segment of
//! a detail-resource URL.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Stable catalog identifier of a record. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(NonZeroU32);

impl RecordId {
    /// Creates a record ID from a raw catalog number. Returns `None` for 0.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Returns the raw catalog number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// Derives the id from the trailing path segment of a detail-resource URL.
    ///
    /// `https://pokeapi.co/api/v2/pokemon/25/` yields `25`. Returns `None` when
    /// the last non-empty segment is not a positive integer.
    #[must_use]
    pub fn from_locator(locator: &str) -> Option<Self> {
        let path = locator.split(['?', '#']).next().unwrap_or_default();
        let segment = path.trim_end_matches('/').rsplit('/').next()?;
        segment.parse::<u32>().ok().and_then(Self::new)
    }

    /// Like [`RecordId::from_locator`], but reports why the locator was rejected.
    pub fn try_from_locator(locator: &str) -> crate::Result<Self> {
        Self::from_locator(locator).ok_or_else(|| Error::MissingLocatorId(locator.to_string()))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidRecordId(s.to_string()))
    }
}

impl TryFrom<u32> for RecordId {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| Error::InvalidRecordId(raw.to_string()))
    }
}
