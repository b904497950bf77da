//! Shared test helpers for store tests.

#![allow(dead_code)]

use async_trait::async_trait;
use pokedex_client::{
    CatalogClient, ClientError, ClientResult, DetailResource, FlavorTextEntry, FormResource,
    NamedResource, PageResource, SpeciesResource, Sprites, TypeSlot,
};
use pokedex_store::{Pokedex, PokedexConfig};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

pub const TYPES: [&str; 4] = ["grass", "fire", "water", "poison"];

/// A closable gate. Calls pass while open and wait while closed.
pub struct Gate {
    open: watch::Sender<bool>,
}

impl Gate {
    fn new() -> Self {
        let (open, _) = watch::channel(true);
        Self { open }
    }

    pub fn close(&self) {
        self.open.send_replace(false);
    }

    pub fn open(&self) {
        self.open.send_replace(true);
    }

    async fn pass(&self) {
        let mut rx = self.open.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

/// In-memory catalog of `size` creatures named `mon-1` .. `mon-N`.
pub struct FakeCatalog {
    size: u32,
    pub list_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub form_calls: AtomicUsize,
    pub description_calls: AtomicUsize,
    detail_calls_by_id: Mutex<HashMap<u32, usize>>,
    found_names: Mutex<Vec<String>>,
    pub fail_list: AtomicBool,
    pub fail_find: AtomicBool,
    fail_detail_for: Mutex<HashSet<u32>>,
    fail_description_for: Mutex<HashSet<String>>,
    /// Per-id artificial latency on detail fetches.
    jitter: AtomicBool,
    pub list_gate: Gate,
    pub detail_gate: Gate,
}

impl FakeCatalog {
    pub fn new(size: u32) -> Arc<Self> {
        Arc::new(Self {
            size,
            list_calls: AtomicUsize::new(0),
            find_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            form_calls: AtomicUsize::new(0),
            description_calls: AtomicUsize::new(0),
            detail_calls_by_id: Mutex::new(HashMap::new()),
            found_names: Mutex::new(Vec::new()),
            fail_list: AtomicBool::new(false),
            fail_find: AtomicBool::new(false),
            fail_detail_for: Mutex::new(HashSet::new()),
            fail_description_for: Mutex::new(HashSet::new()),
            jitter: AtomicBool::new(false),
            list_gate: Gate::new(),
            detail_gate: Gate::new(),
        })
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn form_calls(&self) -> usize {
        self.form_calls.load(Ordering::SeqCst)
    }

    pub fn description_calls(&self) -> usize {
        self.description_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls_for(&self, id: u32) -> usize {
        self.detail_calls_by_id
            .lock()
            .unwrap()
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    pub fn found_names(&self) -> Vec<String> {
        self.found_names.lock().unwrap().clone()
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_find(&self, fail: bool) {
        self.fail_find.store(fail, Ordering::SeqCst);
    }

    pub fn fail_detail_for(&self, id: u32) {
        self.fail_detail_for.lock().unwrap().insert(id);
    }

    pub fn fail_description_for(&self, name: &str) {
        self.fail_description_for
            .lock()
            .unwrap()
            .insert(name.to_string());
    }

    /// Makes detail fetches complete in an order unrelated to request order.
    pub fn enable_jitter(&self) {
        self.jitter.store(true, Ordering::SeqCst);
    }

    fn page_cursor(offset: u32, limit: u32) -> String {
        format!("fake://pokemon?offset={offset}&limit={limit}")
    }

    fn parse_cursor(cursor: &str) -> (u32, u32) {
        let query = cursor.split_once('?').map(|(_, q)| q).unwrap_or_default();
        let mut offset = 0;
        let mut limit = 20;
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("offset", v)) => offset = v.parse().unwrap(),
                Some(("limit", v)) => limit = v.parse().unwrap(),
                _ => {}
            }
        }
        (offset, limit)
    }

    fn detail_for(&self, id: u32) -> DetailResource {
        let mut types = vec![TypeSlot {
            slot: 1,
            kind: NamedResource::new(TYPES[id as usize % 4], "fake://type"),
        }];
        if id % 2 == 0 {
            types.push(TypeSlot {
                slot: 2,
                kind: NamedResource::new("flying", "fake://type"),
            });
        }
        DetailResource {
            id,
            name: format!("mon-{id}"),
            types,
            forms: vec![NamedResource::new(
                format!("mon-{id}"),
                format!("fake://pokemon-form/{id}/"),
            )],
            sprites: Sprites::default(),
        }
    }

    fn id_for_name(&self, name: &str) -> Option<u32> {
        let id: u32 = name.strip_prefix("mon-")?.parse().ok()?;
        (1..=self.size).contains(&id).then_some(id)
    }
}

fn trailing_id(locator: &str) -> u32 {
    locator
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    fn provider_name(&self) -> &'static str {
        "Fake"
    }

    async fn list_page(
        &self,
        page_size: usize,
        cursor: Option<&str>,
    ) -> ClientResult<PageResource> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_gate.pass().await;
        tokio::task::yield_now().await;

        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 500,
                url: cursor.unwrap_or("fake://pokemon").to_string(),
            });
        }

        let (offset, limit) = match cursor {
            Some(cursor) => Self::parse_cursor(cursor),
            None => (0, page_size as u32),
        };
        let end = (offset + limit).min(self.size);
        let results = (offset + 1..=end)
            .map(|id| NamedResource::new(format!("mon-{id}"), format!("fake://pokemon/{id}/")))
            .collect();

        Ok(PageResource {
            count: u64::from(self.size),
            next: (end < self.size).then(|| Self::page_cursor(end, limit)),
            previous: (offset > 0).then(|| Self::page_cursor(offset.saturating_sub(limit), limit)),
            results,
        })
    }

    async fn find_by_name(&self, name: &str) -> ClientResult<DetailResource> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.found_names.lock().unwrap().push(name.to_string());
        tokio::task::yield_now().await;

        if self.fail_find.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection reset".into()));
        }
        match self.id_for_name(name) {
            Some(id) => Ok(self.detail_for(id)),
            None => Err(ClientError::NotFound(name.to_string())),
        }
    }

    async fn fetch_detail(&self, locator: &str) -> ClientResult<DetailResource> {
        let id = trailing_id(locator);
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        *self.detail_calls_by_id.lock().unwrap().entry(id).or_insert(0) += 1;
        self.detail_gate.pass().await;

        if self.jitter.load(Ordering::SeqCst) {
            let delay = u64::from((id * 7919) % 13);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_detail_for.lock().unwrap().contains(&id) {
            return Err(ClientError::Status {
                status: 502,
                url: locator.to_string(),
            });
        }
        if id == 0 || id > self.size {
            return Err(ClientError::NotFound(locator.to_string()));
        }
        Ok(self.detail_for(id))
    }

    async fn fetch_form(&self, locator: &str) -> ClientResult<FormResource> {
        self.form_calls.fetch_add(1, Ordering::SeqCst);
        let id = trailing_id(locator);
        tokio::task::yield_now().await;
        Ok(FormResource {
            name: format!("mon-{id}"),
            sprites: Sprites {
                front_default: Some(format!("fake://sprites/{id}.png")),
            },
        })
    }

    async fn fetch_description(&self, name: &str) -> ClientResult<SpeciesResource> {
        self.description_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_description_for.lock().unwrap().contains(name) {
            return Err(ClientError::Network("timeout".into()));
        }
        Ok(SpeciesResource {
            name: name.to_string(),
            flavor_text_entries: vec![
                FlavorTextEntry {
                    flavor_text: format!("{name} vit dans les herbes."),
                    language: NamedResource::new("fr", "fake://language/5/"),
                },
                FlavorTextEntry {
                    flavor_text: format!("{name} lives\nin tall grass."),
                    language: NamedResource::new("en", "fake://language/9/"),
                },
            ],
        })
    }
}

pub fn make_pokedex(catalog: &Arc<FakeCatalog>) -> Pokedex {
    make_pokedex_with_config(catalog, PokedexConfig::default())
}

pub fn make_pokedex_with_config(catalog: &Arc<FakeCatalog>, config: PokedexConfig) -> Pokedex {
    let client: Arc<dyn CatalogClient> = catalog.clone();
    Pokedex::new(client, config)
}

/// Waits until the store reports a fetch in flight.
pub async fn wait_until_loading(pokedex: &Pokedex) {
    let mut rx = pokedex.subscribe();
    rx.wait_for(|state| state.is_loading).await.unwrap();
}

pub fn names(pokedex: &Pokedex) -> Vec<String> {
    pokedex
        .records()
        .iter()
        .map(|r| r.name().to_string())
        .collect()
}
