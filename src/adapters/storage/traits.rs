//! Storage substrate abstraction
//!
//! This module defines the trait that persistence backends implement to
//! serve as the string-keyed store underneath [`KvStore`](super::KvStore).

use crate::domain::StorageError;

/// Result type for substrate operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Persistent string-keyed storage
///
/// The contract mirrors browser `localStorage`: values are opaque text,
/// operations are synchronous, and a missing key is not an error.
/// Implementations report every failure through [`StorageError`] and
/// never panic.
pub trait StorageBackend: Send + Sync {
    /// Read the raw text stored under `key`
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the key holds no value.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// A failed write leaves the previous value in place.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Short backend name for log fields
    fn name(&self) -> &'static str;
}
