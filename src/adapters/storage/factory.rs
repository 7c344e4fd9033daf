//! Storage backend factory

use super::file::FileBackend;
use super::memory::MemoryBackend;
use super::traits::StorageBackend;
use crate::config::schema::{StorageConfig, StorageKind};
use std::sync::Arc;

/// Create the storage backend selected by the configuration
///
/// # Arguments
///
/// * `config` - Storage configuration (already validated)
///
/// # Returns
///
/// Returns an Arc-wrapped trait object shared by the local and favorites
/// stores.
pub fn create_storage_backend(config: &StorageConfig) -> Arc<dyn StorageBackend> {
    match config.backend {
        StorageKind::File => {
            tracing::info!(path = %config.path, "Using file storage backend");
            Arc::new(FileBackend::new(&config.path))
        }
        StorageKind::Memory => {
            tracing::info!(quota_bytes = ?config.quota_bytes, "Using in-memory storage backend");
            match config.quota_bytes {
                Some(quota) => Arc::new(MemoryBackend::with_quota(quota)),
                None => Arc::new(MemoryBackend::new()),
            }
        }
    }
}
