//! Pokedex store: listing, search and enrichment orchestration.
//!
//! The store is the single source of truth for which records are displayed
//! and what the catalog-fetch state machine is doing. At most one listing or
//! search fetch is in flight; a second request while one is pending is
//! dropped, not queued.
//!
//! A successful fetch publishes shallow records immediately and then spawns
//! one enrichment task per record that is neither resolved nor already being
//! enriched. Enrichment results land on the shared record handles, so they
//! show up in the displayed list without another state transition.

use crate::cache::IdentityCache;
use crate::config::PokedexConfig;
use crate::enrichment::{enrich, EnrichmentSource};
use crate::record::Record;
use crate::state::{FetchOutcome, PokedexState, SkipReason};
use pokedex_client::{CatalogClient, ClientError, PageResource};
use pokedex_types::{normalize_name, FetchKind, PageDirection, RecordId};
use std::collections::HashMap;
use std::future::poll_fn;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{watch, RwLock, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// An item from a catalog response, before it is matched to a record.
struct Candidate {
    id: Option<RecordId>,
    name: String,
    source: EnrichmentSource,
}

type Pending = Vec<(Record, EnrichmentSource)>;

/// One listing or search attempt between its start and finishing transitions.
///
/// Dropping an unfinished attempt (the caller's future was cancelled) still
/// runs the finishing transition, so the loading flags never outlive it.
struct Attempt<'a> {
    state: &'a watch::Sender<PokedexState>,
    generation: u64,
    finished: bool,
}

impl Attempt<'_> {
    /// Applies the result. Returns `false` if a newer attempt superseded
    /// this one.
    fn finish(mut self, apply: impl FnOnce(&mut PokedexState)) -> bool {
        self.finished = true;
        let generation = self.generation;
        let mut applied = false;
        self.state.send_if_modified(|state| {
            applied = state.finish(generation, apply);
            applied
        });
        applied
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let generation = self.generation;
        let cleared = self
            .state
            .send_if_modified(|state| state.finish(generation, |_| {}));
        if cleared {
            debug!("Attempt {} abandoned before finishing", generation);
        }
    }
}

struct Inner {
    client: Arc<dyn CatalogClient>,
    config: PokedexConfig,
    /// Observable state cell.
    state: watch::Sender<PokedexState>,
    /// Every record resolved so far.
    cache: RwLock<IdentityCache>,
    /// Records with an enrichment task registered, by id.
    enriching: Mutex<HashMap<RecordId, Record>>,
    /// Enrichment tasks not yet reaped.
    tasks: Mutex<JoinSet<()>>,
    permits: Semaphore,
}

/// The Pokedex store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Pokedex {
    inner: Arc<Inner>,
}

impl Pokedex {
    /// Creates a store over the given catalog client.
    pub fn new(client: Arc<dyn CatalogClient>, config: PokedexConfig) -> Self {
        let (state, _) = watch::channel(PokedexState::default());
        let permits = Semaphore::new(config.max_concurrent_enrichments.max(1));

        Self {
            inner: Arc::new(Inner {
                client,
                config,
                state,
                cache: RwLock::new(IdentityCache::new()),
                enriching: Mutex::new(HashMap::new()),
                tasks: Mutex::new(JoinSet::new()),
                permits,
            }),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PokedexConfig {
        &self.inner.config
    }

    // ── Observation ──────────────────────────────────────────────

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> PokedexState {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<PokedexState> {
        self.inner.state.subscribe()
    }

    /// Records currently displayed.
    pub fn records(&self) -> Vec<Record> {
        self.inner.state.borrow().records.clone()
    }

    pub fn has_next(&self) -> bool {
        self.inner.state.borrow().has_next()
    }

    pub fn has_prev(&self) -> bool {
        self.inner.state.borrow().has_prev()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn is_error_loading(&self) -> bool {
        self.inner.state.borrow().is_error_loading
    }

    pub fn search_term(&self) -> String {
        self.inner.state.borrow().search_term.clone()
    }

    /// Stores the search term without fetching.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.inner.state.send_if_modified(|state| {
            if state.search_term == term {
                return false;
            }
            state.search_term = term;
            true
        });
    }

    /// Number of cached records.
    pub async fn cached_len(&self) -> usize {
        self.inner.cache.read().await.len()
    }

    /// Cached record with this id, if any.
    pub async fn cached(&self, id: RecordId) -> Option<Record> {
        self.inner.cache.read().await.find_by_id(id)
    }

    // ── Verbs ────────────────────────────────────────────────────

    /// Loads a listing page.
    pub async fn fetch_page(&self, direction: PageDirection) -> FetchOutcome {
        let (attempt, cursor) = match self.begin(FetchKind::Page(direction)) {
            Ok(started) => started,
            Err(reason) => {
                debug!("Skipping {} page request: {:?}", direction, reason);
                return FetchOutcome::Skipped(reason);
            }
        };

        let result = self
            .inner
            .client
            .list_page(self.inner.config.page_size, cursor.as_deref())
            .await;

        match result {
            Ok(page) => self.publish_page(attempt, direction, page).await,
            Err(err) => {
                warn!("Loading {} page failed: {}", direction, err);
                Self::fail(attempt, err)
            }
        }
    }

    /// Retries the listing that last failed, or loads the first page.
    pub async fn reload(&self) -> FetchOutcome {
        let direction = self.inner.state.borrow().reload_direction();
        self.fetch_page(direction).await
    }

    /// Looks up the current search term.
    ///
    /// An empty term lists the first page. A term already in the cache is
    /// answered without a network call.
    pub async fn search(&self) -> FetchOutcome {
        let term = normalize_name(&self.inner.state.borrow().search_term);
        if term.is_empty() {
            return self.fetch_page(PageDirection::Initial).await;
        }

        let attempt = match self.begin(FetchKind::Search) {
            Ok((attempt, _)) => attempt,
            Err(reason) => {
                debug!("Skipping search for {}: {:?}", term, reason);
                return FetchOutcome::Skipped(reason);
            }
        };

        let cached = self.inner.cache.read().await.find_by_name(&term);
        if let Some(record) = cached {
            debug!("Search for {} answered from cache", term);
            return Self::publish(attempt, vec![record], |_| {});
        }

        match self.inner.client.find_by_name(&term).await {
            Ok(detail) => {
                let candidate = Candidate {
                    id: detail.record_id(),
                    name: detail.name.clone(),
                    source: EnrichmentSource::Detail(Box::new(detail)),
                };
                let (records, pending) = self.adopt(vec![candidate]).await;
                self.spawn_enrichment(pending);
                Self::publish(attempt, records, |_| {})
            }
            Err(err) if err.is_not_found() => {
                info!("No catalog record named {}", term);
                if attempt.finish(|state| state.records.clear()) {
                    FetchOutcome::NotFound
                } else {
                    FetchOutcome::Stale
                }
            }
            Err(err) => {
                warn!("Search for {} failed: {}", term, err);
                Self::fail(attempt, err)
            }
        }
    }

    /// Waits for every enrichment spawned so far to finish.
    ///
    /// Tasks are joined in place; dropping this future leaves them running.
    pub async fn wait_for_enrichment(&self) {
        while let Some(result) = poll_fn(|cx| self.inner.tasks().poll_join_next(cx)).await {
            log_join_error(result);
        }
    }

    /// Number of enrichment tasks still running. Reaps finished ones.
    pub fn pending_enrichments(&self) -> usize {
        let mut tasks = self.inner.tasks();
        reap(&mut tasks);
        tasks.len()
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Guard and start transition. Checks the in-flight flag and resolves the
    /// cursor in the same update that marks the attempt as started.
    fn begin(&self, kind: FetchKind) -> Result<(Attempt<'_>, Option<String>), SkipReason> {
        let mut started = Err(SkipReason::InFlight);

        self.inner.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }

            let cursor = match kind {
                FetchKind::Page(PageDirection::Next) => state.next_cursor.clone(),
                FetchKind::Page(PageDirection::Previous) => state.previous_cursor.clone(),
                FetchKind::Page(PageDirection::Initial) | FetchKind::Search => None,
            };
            let needs_cursor = matches!(
                kind,
                FetchKind::Page(PageDirection::Next | PageDirection::Previous)
            );
            if needs_cursor && cursor.is_none() {
                started = Err(SkipReason::NoCursor);
                return false;
            }

            started = Ok((state.begin(kind), cursor));
            true
        });

        started.map(|(generation, cursor)| {
            let attempt = Attempt {
                state: &self.inner.state,
                generation,
                finished: false,
            };
            (attempt, cursor)
        })
    }

    fn publish(
        attempt: Attempt<'_>,
        records: Vec<Record>,
        apply: impl FnOnce(&mut PokedexState),
    ) -> FetchOutcome {
        let generation = attempt.generation;
        let count = records.len();
        let applied = attempt.finish(move |state| {
            apply(state);
            state.records = records;
        });

        if applied {
            FetchOutcome::Completed { count }
        } else {
            debug!("Discarding stale result of attempt {}", generation);
            FetchOutcome::Stale
        }
    }

    fn fail(attempt: Attempt<'_>, err: ClientError) -> FetchOutcome {
        if attempt.finish(|state| state.is_error_loading = true) {
            FetchOutcome::Failed(err)
        } else {
            FetchOutcome::Stale
        }
    }

    async fn publish_page(
        &self,
        attempt: Attempt<'_>,
        direction: PageDirection,
        page: PageResource,
    ) -> FetchOutcome {
        let PageResource {
            next,
            previous,
            results,
            ..
        } = page;

        let candidates = results
            .into_iter()
            .map(|item| Candidate {
                id: item.record_id(),
                name: item.name,
                source: EnrichmentSource::Locator(item.url),
            })
            .collect();

        let (records, pending) = self.adopt(candidates).await;
        let to_enrich = pending.len();
        self.spawn_enrichment(pending);
        let outcome = Self::publish(attempt, records, |state| {
            state.next_cursor = next;
            state.previous_cursor = previous;
        });

        if let FetchOutcome::Completed { count } = outcome {
            info!(
                "Loaded {} page: {} records, {} to enrich",
                direction, count, to_enrich
            );
        }
        outcome
    }

    // ── Records & enrichment ─────────────────────────────────────

    /// Matches catalog items to records: a cached record by id (or by name
    /// when the item has no id), then a record already being enriched, then
    /// a new shallow record. New records with an id are registered as
    /// in-flight before this returns; the caller must hand every pending
    /// record to [`Self::spawn_enrichment`] without awaiting in between.
    async fn adopt(&self, candidates: Vec<Candidate>) -> (Vec<Record>, Pending) {
        let cache = self.inner.cache.read().await;
        let mut enriching = self.inner.enriching();

        let mut records = Vec::with_capacity(candidates.len());
        let mut pending = Vec::new();

        for Candidate { id, name, source } in candidates {
            let known = match id {
                Some(id) => cache
                    .find_by_id(id)
                    .or_else(|| enriching.get(&id).cloned()),
                None => cache.find_by_name(&name),
            };
            if let Some(record) = known {
                records.push(record);
                continue;
            }

            let record = match id {
                Some(id) => {
                    let record = Record::with_id(&name, id);
                    enriching.insert(id, record.clone());
                    record
                }
                None => Record::new(&name),
            };
            pending.push((record.clone(), source));
            records.push(record);
        }

        (records, pending)
    }

    fn spawn_enrichment(&self, pending: Pending) {
        if pending.is_empty() {
            return;
        }

        let mut tasks = self.inner.tasks();
        reap(&mut tasks);
        for (record, source) in pending {
            let inner = Arc::clone(&self.inner);
            tasks.spawn(async move { inner.enrich_record(record, source).await });
        }
    }
}

/// Drops finished tasks from the set.
fn reap(tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.try_join_next() {
        log_join_error(result);
    }
}

fn log_join_error(result: Result<(), JoinError>) {
    if let Err(e) = result {
        warn!("Enrichment task did not complete: {}", e);
    }
}

/// In-flight registration of one record. Dropping it, on completion or
/// abort, removes the record from the in-flight map.
struct Registration<'a> {
    enriching: &'a Mutex<HashMap<RecordId, Record>>,
    record: &'a Record,
    id: Option<RecordId>,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let Some(id) = self.id else {
            return;
        };
        let mut enriching = self.enriching.lock().unwrap_or_else(PoisonError::into_inner);
        if enriching
            .get(&id)
            .is_some_and(|registered| Record::ptr_eq(registered, self.record))
        {
            enriching.remove(&id);
        }
    }
}

impl Inner {
    fn tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enriching(&self) -> MutexGuard<'_, HashMap<RecordId, Record>> {
        self.enriching.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn enrich_record(&self, record: Record, source: EnrichmentSource) {
        // Declared first so it drops last, after the cache insert: a
        // concurrent lookup always finds the record in one of the two places.
        let _registration = Registration {
            enriching: &self.enriching,
            record: &record,
            id: record.id(),
        };

        let Ok(_permit) = self.permits.acquire().await else {
            warn!("Enrichment of {} dropped: no permits", record.name());
            return;
        };

        let result = enrich(
            self.client.as_ref(),
            record.name(),
            source,
            &self.config.description_language,
        )
        .await;

        match result {
            Ok(enriched) => {
                if let (None, Some(id)) = (record.id(), enriched.id) {
                    record.assign_id(id);
                }
                record.resolve(enriched.detail);
                self.cache.write().await.insert(record.clone());
                debug!("Resolved {}", record.name());
            }
            Err(err) => {
                warn!("Enrichment of {} failed: {}", record.name(), err);
            }
        }
    }
}
