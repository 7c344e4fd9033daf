//! Patient aggregation service
//!
//! Merges the local record store with the remote collection and routes
//! mutations through the local store, keeping the favorites mirror in step.

use super::page::AggregatePage;
use crate::adapters::api::PatientSource;
use crate::adapters::storage::StorageBackend;
use crate::core::store::{FavoritesStore, LocalRecordStore};
use crate::domain::{PageToken, PatientDraft, PatientId, PatientPatch, PatientRecord, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Aggregation service over local, favorite and remote patients
///
/// The two stores are injected as named handles; the service never reaches
/// storage any other way.
///
/// # Example
///
/// ```no_run
/// use caredesk::adapters::api::PatientApiClient;
/// use caredesk::adapters::storage::FileBackend;
/// use caredesk::config::ApiConfig;
/// use caredesk::core::aggregate::PatientService;
/// use caredesk::domain::PageToken;
/// use std::sync::Arc;
///
/// # async fn example() -> caredesk::domain::Result<()> {
/// let service = PatientService::from_backend(
///     Arc::new(FileBackend::new("./caredesk-data")),
///     Arc::new(PatientApiClient::new(ApiConfig::default())?),
/// );
/// let first = service.fetch_aggregated_page(PageToken::FIRST, 100).await?;
/// println!("{} patients, more: {}", first.records.len(), first.has_more());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PatientService {
    local: LocalRecordStore,
    favorites: FavoritesStore,
    source: Arc<dyn PatientSource>,
}

impl PatientService {
    /// Create a service from explicit store handles
    pub fn new(
        local: LocalRecordStore,
        favorites: FavoritesStore,
        source: Arc<dyn PatientSource>,
    ) -> Self {
        Self {
            local,
            favorites,
            source,
        }
    }

    /// Create a service whose stores share one storage backend
    pub fn from_backend(backend: Arc<dyn StorageBackend>, source: Arc<dyn PatientSource>) -> Self {
        Self::new(
            LocalRecordStore::new(Arc::clone(&backend)),
            FavoritesStore::new(backend),
            source,
        )
    }

    /// The local record store handle
    pub fn local(&self) -> &LocalRecordStore {
        &self.local
    }

    /// The favorites store handle
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Fetch and merge one page of the patient list
    ///
    /// The first page is every local record followed by remote page 1
    /// minus ids already present locally; local copies take precedence.
    /// Later pages are remote records only. `next_page_token` is set when
    /// the remote page came back full.
    ///
    /// # Errors
    ///
    /// Propagates the remote source's fetch errors.
    pub async fn fetch_aggregated_page(
        &self,
        token: PageToken,
        page_size: usize,
    ) -> Result<AggregatePage> {
        let remote = self.source.fetch_page(token.page(), page_size).await?;
        let remote_count = remote.len();
        let next_page_token = (remote_count == page_size).then(|| token.next());

        let records = if token.is_first() {
            // Read after the fetch so records created while it was in flight are included
            let mut records = self.local.list();
            let local_ids: HashSet<PatientId> = records.iter().map(|r| r.id.clone()).collect();
            records.extend(remote.into_iter().filter(|r| !local_ids.contains(&r.id)));
            records
        } else {
            remote
        };

        crate::log_page_loaded!(
            self.source.endpoint(),
            token,
            remote_count,
            records.len(),
            next_page_token.is_some()
        );

        Ok(AggregatePage {
            records,
            next_page_token,
        })
    }

    /// Create a local patient
    ///
    /// The caller injects the result into its list cache.
    pub fn create_patient(&self, draft: PatientDraft) -> PatientRecord {
        self.local.create(draft)
    }

    /// Update (or locally override) a patient, mirroring favorites
    ///
    /// When the patient is a favorite its favorites copy is replaced too.
    /// The two writes are independent: a failed favorites write is logged
    /// and the local update still stands.
    pub fn update_patient(&self, id: &PatientId, patch: PatientPatch) -> Option<PatientRecord> {
        let updated = self.local.update(id, patch)?;

        if self.favorites.is_favorite(id) && !self.favorites.update_existing(&updated) {
            tracing::warn!(id = %id, "Favorite copy was not updated");
        }

        Some(updated)
    }

    /// Create a patient, or update `existing` preserving its creation time
    pub fn save_patient(
        &self,
        draft: PatientDraft,
        existing: Option<&PatientRecord>,
    ) -> Option<PatientRecord> {
        match existing {
            Some(existing) => self.update_patient(
                &existing.id,
                PatientPatch::from(draft).created_at(existing.created_at.clone()),
            ),
            None => Some(self.create_patient(draft)),
        }
    }

    /// Flip favorite membership; returns the new state
    pub fn toggle_favorite(&self, record: PatientRecord) -> bool {
        self.favorites.toggle(record)
    }

    /// Look a patient up locally, then in the first `max_pages` remote pages
    ///
    /// # Errors
    ///
    /// Propagates remote fetch errors.
    pub async fn find_patient(
        &self,
        id: &PatientId,
        page_size: usize,
        max_pages: u32,
    ) -> Result<Option<PatientRecord>> {
        if let Some(record) = self.local.get(id) {
            return Ok(Some(record));
        }

        for page in 1..=max_pages {
            let records = self.source.fetch_page(page, page_size).await?;
            let exhausted = records.len() < page_size;
            if let Some(record) = records.into_iter().find(|r| &r.id == id) {
                return Ok(Some(record));
            }
            if exhausted {
                break;
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryBackend;
    use crate::domain::CaredeskError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Remote source serving fixed pages and recording requests
    #[derive(Default)]
    struct FixedPages {
        pages: HashMap<u32, Vec<PatientRecord>>,
        requests: Mutex<Vec<(u32, usize)>>,
    }

    #[async_trait]
    impl PatientSource for FixedPages {
        async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>> {
            self.requests.lock().unwrap().push((page, limit));
            Ok(self.pages.get(&page).cloned().unwrap_or_default())
        }

        fn endpoint(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    #[async_trait]
    impl PatientSource for Failing {
        async fn fetch_page(&self, _page: u32, _limit: usize) -> Result<Vec<PatientRecord>> {
            Err(crate::domain::FetchError::Status { status: 500 }.into())
        }

        fn endpoint(&self) -> &str {
            "failing"
        }
    }

    fn rec(id: &str, name: &str) -> PatientRecord {
        PatientRecord::synthesize(
            PatientId::new(id).unwrap(),
            PatientPatch::default()
                .name(name)
                .created_at("2024-01-01T00:00:00Z"),
        )
    }

    fn service(pages: Vec<(u32, Vec<PatientRecord>)>) -> (PatientService, Arc<FixedPages>) {
        let source = Arc::new(FixedPages {
            pages: pages.into_iter().collect(),
            ..Default::default()
        });
        let service = PatientService::from_backend(Arc::new(MemoryBackend::new()), source.clone());
        (service, source)
    }

    #[tokio::test]
    async fn test_first_page_local_wins_over_remote() {
        let (service, _) = service(vec![(1, vec![rec("5", "Remote Five"), rec("6", "Six")])]);
        service.local().replace(&[rec("5", "Local Five")]);

        let page = service
            .fetch_aggregated_page(PageToken::FIRST, 2)
            .await
            .unwrap();

        let names: Vec<_> = page.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Local Five", "Six"]);
        assert_eq!(page.next_page_token, Some(PageToken::FIRST.next()));
    }

    #[tokio::test]
    async fn test_later_pages_are_remote_only() {
        let (service, source) = service(vec![(2, vec![rec("5", "Remote Five")])]);
        service.local().replace(&[rec("5", "Local Five")]);

        let page = service
            .fetch_aggregated_page(PageToken::new(2).unwrap(), 2)
            .await
            .unwrap();

        assert_eq!(page.records, vec![rec("5", "Remote Five")]);
        assert_eq!(page.next_page_token, None);
        assert_eq!(*source.requests.lock().unwrap(), vec![(2, 2)]);
    }

    #[tokio::test]
    async fn test_short_page_exhausts() {
        let (service, _) = service(vec![(1, vec![rec("1", "One")])]);
        let page = service
            .fetch_aggregated_page(PageToken::FIRST, 100)
            .await
            .unwrap();
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_fetch_errors_propagate() {
        let service = PatientService::from_backend(Arc::new(MemoryBackend::new()), Arc::new(Failing));
        let err = service
            .fetch_aggregated_page(PageToken::FIRST, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, CaredeskError::Fetch(_)));
    }

    #[test]
    fn test_save_patient_preserves_created_at() {
        let (service, _) = service(vec![]);
        let existing = rec("1", "Old");

        let draft = PatientDraft {
            name: "New".to_string(),
            ..Default::default()
        };
        let saved = service.save_patient(draft, Some(&existing)).unwrap();

        assert_eq!(saved.id.as_str(), "1");
        assert_eq!(saved.name, "New");
        assert_eq!(saved.created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_save_patient_without_existing_creates() {
        let (service, _) = service(vec![]);
        let saved = service
            .save_patient(
                PatientDraft {
                    name: "Brand new".to_string(),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(service.local().list(), vec![saved]);
    }

    #[test]
    fn test_update_syncs_favorite_copy() {
        let (service, _) = service(vec![]);
        let id = PatientId::new("2").unwrap();
        assert!(service.toggle_favorite(rec("2", "Two")));

        service
            .update_patient(&id, PatientPatch::default().name("Changed"))
            .unwrap();

        assert_eq!(service.local().get(&id).unwrap().name, "Changed");
        assert_eq!(service.favorites().list()[0].name, "Changed");
    }

    #[test]
    fn test_update_non_favorite_leaves_favorites_alone() {
        let (service, _) = service(vec![]);
        service.favorites().add(rec("1", "One"));
        service.update_patient(&PatientId::new("2").unwrap(), PatientPatch::default().name("Two"));
        assert_eq!(service.favorites().list(), vec![rec("1", "One")]);
    }

    #[tokio::test]
    async fn test_find_patient_local_then_remote() {
        let (service, source) = service(vec![
            (1, vec![rec("1", "One"), rec("2", "Two")]),
            (2, vec![rec("3", "Three")]),
        ]);
        service.local().replace(&[rec("L", "Local")]);

        let local = service
            .find_patient(&PatientId::new("L").unwrap(), 2, 5)
            .await
            .unwrap();
        assert_eq!(local.unwrap().name, "Local");
        assert!(source.requests.lock().unwrap().is_empty());

        let remote = service
            .find_patient(&PatientId::new("3").unwrap(), 2, 5)
            .await
            .unwrap();
        assert_eq!(remote.unwrap().name, "Three");

        let missing = service
            .find_patient(&PatientId::new("404").unwrap(), 2, 5)
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
