//! Identity cache.
//!
//! Append-only, insertion-ordered set of records keyed by catalog id, with a
//! secondary index by normalised name. Entries are never removed or replaced.
//!
//! A record inserted before its id is known is provisional: it is reachable
//! by name immediately and by id once the record learns its id.

use crate::record::Record;
use pokedex_types::{normalize_name, RecordId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: Vec<Record>,
    by_id: HashMap<RecordId, usize>,
    by_name: HashMap<String, usize>,
    /// Entries inserted without an id.
    provisional: Vec<usize>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. No-op returning `false` if an entry with the same
    /// id or name already exists.
    pub fn insert(&mut self, record: Record) -> bool {
        self.index_provisional();

        if let Some(id) = record.id() {
            if self.by_id.contains_key(&id) {
                return false;
            }
        }
        if self.by_name.contains_key(record.name()) {
            return false;
        }

        let index = self.entries.len();
        match record.id() {
            Some(id) => {
                self.by_id.insert(id, index);
            }
            None => self.provisional.push(index),
        }
        self.by_name.insert(record.name().to_string(), index);
        self.entries.push(record);
        true
    }

    pub fn find_by_id(&self, id: RecordId) -> Option<Record> {
        if let Some(&index) = self.by_id.get(&id) {
            return Some(self.entries[index].clone());
        }
        self.provisional
            .iter()
            .map(|&index| &self.entries[index])
            .find(|record| record.id() == Some(id))
            .cloned()
    }

    /// Looks up by name; the argument is normalised first.
    pub fn find_by_name(&self, name: &str) -> Option<Record> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&index| self.entries[index].clone())
    }

    pub fn contains_id(&self, id: RecordId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter()
    }

    /// Moves provisional entries that have since learned their id into the
    /// id index.
    fn index_provisional(&mut self) {
        let entries = &self.entries;
        let by_id = &mut self.by_id;
        self.provisional.retain(|&index| match entries[index].id() {
            Some(id) => {
                by_id.entry(id).or_insert(index);
                false
            }
            None => true,
        });
    }
}
