//! Catalog resource shapes.
//!
//! Only the fields the store reads are modelled; everything else in the
//! catalog's JSON is ignored on decode.

use pokedex_types::RecordId;
use serde::{Deserialize, Serialize};

/// A `{name, url}` reference to another catalog resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Id derived from the reference URL, if it carries one.
    #[must_use]
    pub fn record_id(&self) -> Option<RecordId> {
        RecordId::from_locator(&self.url)
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResource {
    /// Total number of records in the catalog.
    #[serde(default)]
    pub count: u64,
    /// Cursor of the next page.
    #[serde(default)]
    pub next: Option<String>,
    /// Cursor of the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Sprite references of a detail or form resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// A classification slot of a detail resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Full detail resource of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailResource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub forms: Vec<NamedResource>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl DetailResource {
    /// The catalog id, unless the catalog sent a zero placeholder.
    #[must_use]
    pub fn record_id(&self) -> Option<RecordId> {
        RecordId::new(self.id)
    }

    /// Locator of the default visual form.
    #[must_use]
    pub fn default_form_locator(&self) -> Option<&str> {
        self.forms.first().map(|form| form.url.as_str())
    }

    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.type_in_slot(1)
    }

    #[must_use]
    pub fn secondary_type(&self) -> Option<&str> {
        self.type_in_slot(2)
    }

    fn type_in_slot(&self, slot: u8) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.slot == slot)
            .map(|t| t.kind.name.as_str())
    }
}

/// A visual-form resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
}

/// One localized description entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// Species resource carrying localized descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeciesResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl SpeciesResource {
    /// First description in `language`, with runs of whitespace and control
    /// characters collapsed to single spaces.
    #[must_use]
    pub fn description_in(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| collapse_whitespace(&entry.flavor_text))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
