//! Typed key-value adapter
//!
//! [`KvStore<T>`] binds one fixed key on a [`StorageBackend`] to a
//! serializable value type. It is the failure-containment boundary for
//! persistence: substrate and (de)serialization errors are logged here and
//! surface to callers only as `None` or `false`.

use super::traits::StorageBackend;
use crate::domain::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed view of a single storage key
///
/// # Example
///
/// ```
/// use caredesk::adapters::storage::{KvStore, MemoryBackend};
/// use std::sync::Arc;
///
/// let store: KvStore<Vec<u32>> = KvStore::new("numbers", Arc::new(MemoryBackend::new()));
/// assert_eq!(store.get_or_default(vec![]), Vec::<u32>::new());
///
/// assert!(store.update(|current| {
///     let mut values = current.unwrap_or_default();
///     values.push(7);
///     values
/// }));
/// assert_eq!(store.get(), Some(vec![7]));
/// ```
pub struct KvStore<T> {
    key: String,
    backend: Arc<dyn StorageBackend>,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for KvStore<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            backend: Arc::clone(&self.backend),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for KvStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvStore")
            .field("key", &self.key)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl<T> KvStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create an adapter for `key` on `backend`
    pub fn new(key: impl Into<String>, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            key: key.into(),
            backend,
            _value: PhantomData,
        }
    }

    /// The storage key this adapter is bound to
    pub fn key(&self) -> &str {
        &self.key
    }

    fn codec_error(&self, err: serde_json::Error) -> StorageError {
        StorageError::Serialization {
            key: self.key.clone(),
            message: err.to_string(),
        }
    }

    /// Read and decode the stored value
    ///
    /// Returns `None` when the key is absent, empty, unreadable, or holds
    /// text that does not decode as `T`. Failures are logged.
    pub fn get(&self) -> Option<T> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                crate::log_storage_failure!("read", &self.key, &e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let err = self.codec_error(e);
                crate::log_storage_failure!("decode", &self.key, &err);
                None
            }
        }
    }

    /// [`get`](Self::get), substituting `default` when nothing usable is stored
    pub fn get_or_default(&self, default: T) -> T {
        self.get().unwrap_or(default)
    }

    /// Encode and write `value`
    ///
    /// Returns `false` (and logs) when encoding or the write fails; the
    /// previously stored value is then left untouched.
    pub fn set(&self, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                let err = self.codec_error(e);
                crate::log_storage_failure!("encode", &self.key, &err);
                return false;
            }
        };

        match self.backend.set_item(&self.key, &raw) {
            Ok(()) => {
                tracing::trace!(key = %self.key, bytes = raw.len(), "Stored value");
                true
            }
            Err(e) => {
                crate::log_storage_failure!("write", &self.key, &e);
                false
            }
        }
    }

    /// Delete the key; succeeds when it was already absent
    pub fn remove(&self) -> bool {
        match self.backend.remove_item(&self.key) {
            Ok(()) => true,
            Err(e) => {
                crate::log_storage_failure!("remove", &self.key, &e);
                false
            }
        }
    }

    /// Whether the key holds any value, decodable or not
    pub fn exists(&self) -> bool {
        match self.backend.get_item(&self.key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                crate::log_storage_failure!("read", &self.key, &e);
                false
            }
        }
    }

    /// Read the current value (not defaulted), transform it, write the result
    ///
    /// Returns the outcome of the write.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(Option<T>) -> T,
    {
        let updated = f(self.get());
        self.set(&updated)
    }
}
