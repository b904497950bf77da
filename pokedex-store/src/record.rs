//! Record entity.
//!
//! A [`Record`] is a shared handle to one catalog item. Clones refer to the
//! same entity, so the identity cache and every displayed list observe the
//! same mutations.
//!
//! A record starts shallow (name, maybe id) and is resolved at most once, in
//! a single update that sets every detail field together. Observers subscribe
//! to the record's value cell and are notified when that update lands.

use pokedex_types::{normalize_name, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

/// Detail fields of a resolved record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordDetail {
    /// Default sprite reference. Empty when the catalog has none.
    pub sprite: String,
    pub primary_type: Option<String>,
    pub secondary_type: Option<String>,
    /// Description in the configured language. Empty when none exists.
    pub description: String,
}

/// Point-in-time, serialisable view of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub id: Option<RecordId>,
    pub name: String,
    pub ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<RecordDetail>,
}

struct RecordInner {
    name: String,
    id: OnceLock<RecordId>,
    detail: watch::Sender<Option<Arc<RecordDetail>>>,
}

/// Shared handle to one catalog record.
#[derive(Clone)]
pub struct Record {
    inner: Arc<RecordInner>,
}

impl Record {
    /// Creates a shallow record known only by name.
    pub fn new(name: &str) -> Self {
        let (detail, _) = watch::channel(None);
        Self {
            inner: Arc::new(RecordInner {
                name: normalize_name(name),
                id: OnceLock::new(),
                detail,
            }),
        }
    }

    /// Creates a shallow record with a catalog id.
    pub fn with_id(name: &str, id: RecordId) -> Self {
        let record = Self::new(name);
        record.assign_id(id);
        record
    }

    /// Lower-cased catalog key. Never changes.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn id(&self) -> Option<RecordId> {
        self.inner.id.get().copied()
    }

    /// Sets the catalog id. Returns `false` if an id was already set.
    pub fn assign_id(&self, id: RecordId) -> bool {
        self.inner.id.set(id).is_ok()
    }

    /// Whether the detail fields have been set.
    pub fn is_ready(&self) -> bool {
        self.inner.detail.borrow().is_some()
    }

    pub fn detail(&self) -> Option<Arc<RecordDetail>> {
        self.inner.detail.borrow().clone()
    }

    /// Sprite reference, empty while shallow.
    pub fn sprite(&self) -> String {
        self.detail().map(|d| d.sprite.clone()).unwrap_or_default()
    }

    pub fn primary_type(&self) -> Option<String> {
        self.detail().and_then(|d| d.primary_type.clone())
    }

    pub fn secondary_type(&self) -> Option<String> {
        self.detail().and_then(|d| d.secondary_type.clone())
    }

    /// Description, empty while shallow.
    pub fn description(&self) -> String {
        self.detail()
            .map(|d| d.description.clone())
            .unwrap_or_default()
    }

    /// Sets every detail field in one update and notifies subscribers.
    ///
    /// Returns `false` and leaves the record untouched if it is already
    /// resolved.
    pub fn resolve(&self, detail: RecordDetail) -> bool {
        self.inner.detail.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(Arc::new(detail));
            true
        })
    }

    /// Subscribes to the record's detail cell.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<RecordDetail>>> {
        self.inner.detail.subscribe()
    }

    /// Waits until the record is resolved.
    pub async fn wait_ready(&self) -> Option<Arc<RecordDetail>> {
        let mut rx = self.subscribe();
        let detail = rx.wait_for(Option::is_some).await.ok()?;
        detail.clone()
    }

    /// Whether both handles refer to the same entity.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn snapshot(&self) -> RecordSnapshot {
        let detail = self.detail().map(|d| (*d).clone());
        RecordSnapshot {
            id: self.id(),
            name: self.name().to_string(),
            ready: detail.is_some(),
            detail,
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id())
            .field("name", &self.inner.name)
            .field("ready", &self.is_ready())
            .finish()
    }
}
