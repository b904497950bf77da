//! Pagination vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which page a listing request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    /// First page, no cursor.
    #[default]
    Initial,
    /// Page located by the next-page cursor.
    Next,
    /// Page located by the previous-page cursor.
    Previous,
}

/// The category of a listing or search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// A paginated listing in the given direction.
    Page(PageDirection),
    /// A name lookup.
    Search,
}

impl FetchKind {
    /// Returns the listing direction, if this attempt was a listing.
    #[must_use]
    pub const fn direction(&self) -> Option<PageDirection> {
        match self {
            Self::Page(direction) => Some(*direction),
            Self::Search => None,
        }
    }
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initial => "initial",
            Self::Next => "next",
            Self::Previous => "previous",
        };
        f.write_str(label)
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(direction) => write!(f, "page:{direction}"),
            Self::Search => f.write_str("search"),
        }
    }
}
