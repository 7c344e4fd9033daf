//! Paginated aggregate cache
//!
//! Holds the pages loaded so far for one list session. Loads are serialized:
//! at most one fetch is in flight, so pages are appended in strictly
//! increasing token order. Every fetch is tagged with the generation it
//! started in and `reset()` bumps the generation, so a response that lands
//! after a reset is dropped instead of being appended to the fresh session.

use super::page::AggregatePage;
use super::service::PatientService;
use crate::domain::{PageToken, PatientRecord};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Result of one [`PatientListCache::load_next`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and appended
    Appended {
        token: PageToken,
        records: usize,
        has_more: bool,
    },

    /// Nothing was fetched: a load is already in flight or the list is
    /// exhausted
    Skipped,

    /// The fetch failed; the message is kept as `last_error`
    Failed(String),

    /// The response belonged to a session that was reset meanwhile
    Discarded,
}

/// Observable cache state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Loading,
    Loaded { has_more: bool },
    Failed,
}

#[derive(Debug, Default)]
struct CacheState {
    pages: Vec<AggregatePage>,
    in_flight: bool,
    generation: u64,
    last_error: Option<String>,
}

impl CacheState {
    fn next_token(&self) -> Option<PageToken> {
        match self.pages.last() {
            None => Some(PageToken::FIRST),
            Some(page) => page.next_page_token,
        }
    }
}

/// Infinite-scroll cache over [`PatientService::fetch_aggregated_page`]
pub struct PatientListCache {
    service: PatientService,
    page_size: usize,
    state: Mutex<CacheState>,
}

impl PatientListCache {
    /// Create an empty cache loading `page_size` remote records per page
    pub fn new(service: PatientService, page_size: usize) -> Self {
        Self {
            service,
            page_size,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// The service this cache loads through
    pub fn service(&self) -> &PatientService {
        &self.service
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch and append the next page
    ///
    /// After a failure the same token is requested again.
    pub async fn load_next(&self) -> LoadOutcome {
        let (token, generation) = {
            let mut state = self.lock();
            if state.in_flight {
                tracing::debug!("Load already in flight");
                return LoadOutcome::Skipped;
            }
            let Some(token) = state.next_token() else {
                tracing::debug!("Patient list exhausted");
                return LoadOutcome::Skipped;
            };
            state.in_flight = true;
            (token, state.generation)
        };

        let mut guard = InFlightGuard {
            cache: self,
            generation,
            armed: true,
        };
        let result = self
            .service
            .fetch_aggregated_page(token, self.page_size)
            .await;
        guard.armed = false;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(page = %token, "Discarding response from a reset session");
            return LoadOutcome::Discarded;
        }
        state.in_flight = false;

        match result {
            Ok(page) => {
                let outcome = LoadOutcome::Appended {
                    token,
                    records: page.records.len(),
                    has_more: page.has_more(),
                };
                state.pages.push(page);
                state.last_error = None;
                outcome
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(page = %token, error = %message, "Failed to load patient page");
                state.last_error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Every cached record, in page order then in-page order
    pub fn flattened_records(&self) -> Vec<PatientRecord> {
        self.lock()
            .pages
            .iter()
            .flat_map(|page| page.records.iter().cloned())
            .collect()
    }

    /// Prepend a freshly created record to the first page
    ///
    /// Without a loaded page this does nothing; the first load reads the
    /// record from the local store.
    pub fn inject_created(&self, record: PatientRecord) {
        let mut state = self.lock();
        match state.pages.first_mut() {
            Some(first) => first.records.insert(0, record),
            None => tracing::debug!(id = %record.id, "No page loaded, skipping injection"),
        }
    }

    /// Replace every cached record sharing `record.id`; never inserts
    pub fn inject_updated(&self, record: PatientRecord) {
        let mut state = self.lock();
        for cached in state
            .pages
            .iter_mut()
            .flat_map(|page| page.records.iter_mut())
            .filter(|cached| cached.id == record.id)
        {
            *cached = record.clone();
        }
    }

    /// Drop all pages and start a new session
    pub fn reset(&self) {
        let mut state = self.lock();
        state.pages.clear();
        state.in_flight = false;
        state.last_error = None;
        state.generation += 1;
    }

    /// Whether another page can be loaded; true before the first load
    pub fn has_more(&self) -> bool {
        self.lock().next_token().is_some()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.lock().in_flight
    }

    /// Message of the most recent failed load
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn pages_loaded(&self) -> usize {
        self.lock().pages.len()
    }

    pub fn status(&self) -> CacheStatus {
        let state = self.lock();
        if state.in_flight {
            CacheStatus::Loading
        } else if state.last_error.is_some() {
            CacheStatus::Failed
        } else if state.pages.is_empty() {
            CacheStatus::Empty
        } else {
            CacheStatus::Loaded {
                has_more: state.next_token().is_some(),
            }
        }
    }
}

/// Clears the in-flight flag if a load future is dropped mid-fetch
struct InFlightGuard<'a> {
    cache: &'a PatientListCache,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.cache.lock();
            if state.generation == self.generation {
                state.in_flight = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::PatientSource;
    use crate::adapters::storage::MemoryBackend;
    use crate::domain::{PatientId, PatientPatch, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Serves `total` numbered records, failing the first `failures` calls
    struct Numbered {
        total: u32,
        failures: AtomicU32,
    }

    #[async_trait]
    impl PatientSource for Numbered {
        async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(crate::domain::FetchError::Status { status: 503 }.into());
            }
            let start = (page - 1) * limit as u32 + 1;
            let end = (start + limit as u32 - 1).min(self.total);
            Ok((start..=end).map(|n| rec(&n.to_string())).collect())
        }

        fn endpoint(&self) -> &str {
            "numbered"
        }
    }

    fn rec(id: &str) -> PatientRecord {
        PatientRecord::synthesize(
            PatientId::new(id).unwrap(),
            PatientPatch::default().name(format!("Patient {id}")),
        )
    }

    fn cache(total: u32, failures: u32, page_size: usize) -> PatientListCache {
        let source = Arc::new(Numbered {
            total,
            failures: AtomicU32::new(failures),
        });
        let service = PatientService::from_backend(Arc::new(MemoryBackend::new()), source);
        PatientListCache::new(service, page_size)
    }

    #[tokio::test]
    async fn test_loads_until_exhausted() {
        let cache = cache(5, 0, 2);
        assert_eq!(cache.status(), CacheStatus::Empty);
        assert!(cache.has_more());

        for _ in 0..3 {
            assert!(matches!(cache.load_next().await, LoadOutcome::Appended { .. }));
        }
        assert_eq!(cache.pages_loaded(), 3);
        assert!(!cache.has_more());
        assert_eq!(cache.status(), CacheStatus::Loaded { has_more: false });
        assert_eq!(cache.load_next().await, LoadOutcome::Skipped);

        let ids: Vec<_> = cache
            .flattened_records()
            .into_iter()
            .map(|r| r.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[tokio::test]
    async fn test_failure_then_retry_refetches_same_page() {
        let cache = cache(3, 1, 10);

        let outcome = cache.load_next().await;
        assert!(matches!(outcome, LoadOutcome::Failed(ref m) if m.contains("503")));
        assert_eq!(cache.status(), CacheStatus::Failed);
        assert!(cache.last_error().is_some());
        assert!(!cache.is_loading());

        let outcome = cache.load_next().await;
        assert_eq!(
            outcome,
            LoadOutcome::Appended {
                token: PageToken::FIRST,
                records: 3,
                has_more: false
            }
        );
        assert_eq!(cache.last_error(), None);
    }

    #[tokio::test]
    async fn test_inject_created_prepends_to_first_page() {
        let cache = cache(4, 0, 2);
        cache.load_next().await;
        cache.load_next().await;

        cache.inject_created(rec("new"));
        let records = cache.flattened_records();
        assert_eq!(records[0].id.as_str(), "new");
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_inject_created_without_pages_is_noop() {
        let cache = cache(4, 0, 2);
        cache.inject_created(rec("new"));
        assert!(cache.flattened_records().is_empty());
        assert_eq!(cache.status(), CacheStatus::Empty);
    }

    #[tokio::test]
    async fn test_inject_updated_replaces_only() {
        let cache = cache(4, 0, 2);
        cache.load_next().await;
        cache.load_next().await;

        let mut edited = rec("3");
        edited.name = "Edited".to_string();
        cache.inject_updated(edited);
        cache.inject_updated(rec("99"));

        let records = cache.flattened_records();
        assert_eq!(records.len(), 4);
        assert_eq!(records[2].name, "Edited");
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let cache = cache(3, 1, 10);
        cache.load_next().await;
        cache.reset();

        assert_eq!(cache.status(), CacheStatus::Empty);
        assert_eq!(cache.last_error(), None);
        assert_eq!(cache.pages_loaded(), 0);
    }
}
