//! In-memory storage backend
//!
//! A process-local substrate with an optional byte quota. The quota counts
//! key and value bytes across all entries, the way browsers account for
//! `localStorage`.

use super::traits::{StorageBackend, StorageResult};
use crate::domain::StorageError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory storage backend
///
/// # Example
///
/// ```
/// use caredesk::adapters::storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::with_quota(16);
/// assert!(backend.set_item("k", "small").is_ok());
/// assert!(backend.set_item("k", "this value is far too large").is_err());
/// assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("small"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded in-memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that rejects writes past `quota_bytes` in total
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored (keys plus values)
    pub fn used_bytes(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| Self::usage(&entries, None))
            .unwrap_or(0)
    }

    fn lock(&self, key: &str) -> StorageResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries.lock().map_err(|_| StorageError::Io {
            key: key.to_string(),
            message: "memory storage lock poisoned".to_string(),
        })
    }

    fn usage(entries: &HashMap<String, String>, skip: Option<&str>) -> usize {
        entries
            .iter()
            .filter(|(k, _)| Some(k.as_str()) != skip)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock(key)?;

        if let Some(quota) = self.quota_bytes {
            let others = Self::usage(&entries, Some(key));
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(others);
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.lock(key)?.remove(key);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
