//! Local record store
//!
//! Persists patients created or edited on this machine under the
//! `localPatients` key. The list is ordered most-recently-added first and
//! holds each id at most once.

use super::LOCAL_PATIENTS_KEY;
use crate::adapters::storage::{KvStore, StorageBackend};
use crate::domain::{now_timestamp, PatientDraft, PatientId, PatientPatch, PatientRecord};
use std::sync::Arc;

/// Persisted collection of locally created or edited patients
#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    kv: KvStore<Vec<PatientRecord>>,
}

impl LocalRecordStore {
    /// Create the store on `backend` under the fixed local-records key
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            kv: KvStore::new(LOCAL_PATIENTS_KEY, backend),
        }
    }

    /// All local records, empty when nothing usable is stored
    pub fn list(&self) -> Vec<PatientRecord> {
        self.kv.get_or_default(Vec::new())
    }

    /// Overwrite the stored list
    pub fn replace(&self, records: &[PatientRecord]) -> bool {
        self.kv.set(&records.to_vec())
    }

    /// Create a record from `draft` with a fresh id and the current time
    ///
    /// The record is prepended to the list. It is returned even if the
    /// write fails; the failure is logged by the storage adapter.
    pub fn create(&self, draft: PatientDraft) -> PatientRecord {
        let record = PatientRecord::from_draft(PatientId::generate(), draft, now_timestamp());

        let persisted = self.kv.update(|current| {
            let mut records = current.unwrap_or_default();
            records.insert(0, record.clone());
            records
        });

        if persisted {
            tracing::info!(id = %record.id, "Created local patient");
        } else {
            tracing::warn!(id = %record.id, "Created patient was not persisted");
        }
        record
    }

    /// Merge `patch` onto the record with `id`, or create a local override
    ///
    /// An existing record keeps its position and id. When `id` is not
    /// stored locally (a remote-origin record being edited for the first
    /// time) a record is synthesized from the patch and prepended.
    ///
    /// # Returns
    ///
    /// The stored record, or `None` when the write did not persist.
    pub fn update(&self, id: &PatientId, patch: PatientPatch) -> Option<PatientRecord> {
        let mut records = self.list();

        let updated = match records.iter_mut().find(|r| &r.id == id) {
            Some(existing) => {
                existing.apply_patch(patch);
                existing.clone()
            }
            None => {
                let synthesized = PatientRecord::synthesize(id.clone(), patch);
                tracing::debug!(id = %id, "Creating local override for patient");
                records.insert(0, synthesized.clone());
                synthesized
            }
        };

        if self.replace(&records) {
            tracing::info!(id = %id, "Updated local patient");
            Some(updated)
        } else {
            tracing::warn!(id = %id, "Patient update was not persisted");
            None
        }
    }

    /// Remove the record with `id`; succeeds when it was absent
    pub fn delete(&self, id: &PatientId) -> bool {
        let mut records = self.list();
        records.retain(|r| &r.id != id);
        self.replace(&records)
    }

    /// Whether a record with `id` is stored locally
    pub fn has(&self, id: &PatientId) -> bool {
        self.list().iter().any(|r| &r.id == id)
    }

    /// The local record with `id`
    pub fn get(&self, id: &PatientId) -> Option<PatientRecord> {
        self.list().into_iter().find(|r| &r.id == id)
    }

    /// Persist an empty list
    pub fn clear(&self) -> bool {
        self.kv.set(&Vec::new())
    }
}
