//! Favorites store
//!
//! Persists favorited patients under the `favoritePatients` key, most
//! recently favorited first. Membership is independent of the local record
//! store: a favorite may be a remote-origin record.

use super::FAVORITES_KEY;
use crate::adapters::storage::{KvStore, StorageBackend};
use crate::domain::{PatientFilter, PatientId, PatientRecord};
use std::sync::Arc;

/// Persisted, ordered set of favorited patients
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    kv: KvStore<Vec<PatientRecord>>,
}

impl FavoritesStore {
    /// Create the store on `backend` under the fixed favorites key
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            kv: KvStore::new(FAVORITES_KEY, backend),
        }
    }

    /// All favorites, most recent first
    pub fn list(&self) -> Vec<PatientRecord> {
        self.kv.get_or_default(Vec::new())
    }

    /// Whether the patient with `id` is a favorite
    pub fn is_favorite(&self, id: &PatientId) -> bool {
        self.list().iter().any(|p| &p.id == id)
    }

    /// Prepend `record` unless a favorite with its id already exists
    ///
    /// # Returns
    ///
    /// `false` without modification for a duplicate, otherwise the write
    /// result.
    pub fn add(&self, record: PatientRecord) -> bool {
        let mut favorites = self.list();
        if favorites.iter().any(|p| p.id == record.id) {
            return false;
        }
        favorites.insert(0, record);
        self.kv.set(&favorites)
    }

    /// Drop the favorite with `id`; succeeds when it was absent
    pub fn remove(&self, id: &PatientId) -> bool {
        let mut favorites = self.list();
        favorites.retain(|p| &p.id != id);
        self.kv.set(&favorites)
    }

    /// Flip membership of `record`
    ///
    /// # Returns
    ///
    /// The stored membership state after the call. A write that did not
    /// persist leaves the previous state, which is what gets reported.
    pub fn toggle(&self, record: PatientRecord) -> bool {
        let id = record.id.clone();
        if self.is_favorite(&id) {
            if self.remove(&id) {
                tracing::info!(id = %id, "Removed from favorites");
            } else {
                tracing::warn!(id = %id, "Favorite removal was not persisted");
            }
        } else if self.add(record) {
            tracing::info!(id = %id, "Added to favorites");
        } else {
            tracing::warn!(id = %id, "Favorite addition was not persisted");
        }
        self.is_favorite(&id)
    }

    /// Replace the favorite sharing `record.id`, keeping its position
    ///
    /// A record that is not a favorite leaves the list unchanged; the call
    /// still reports the write result.
    pub fn update_existing(&self, record: &PatientRecord) -> bool {
        let favorites: Vec<PatientRecord> = self
            .list()
            .into_iter()
            .map(|p| if p.id == record.id { record.clone() } else { p })
            .collect();
        self.kv.set(&favorites)
    }

    /// Favorites passing `filter`
    pub fn search(&self, filter: &PatientFilter) -> Vec<PatientRecord> {
        self.list()
            .into_iter()
            .filter(|p| filter.matches(p, true))
            .collect()
    }

    /// Persist an empty list
    pub fn clear(&self) -> bool {
        self.kv.set(&Vec::new())
    }
}
