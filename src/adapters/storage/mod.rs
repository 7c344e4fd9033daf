//! Persistent key-value storage
//!
//! This module provides the synchronous, string-keyed substrate that the
//! local record and favorites stores persist into, and the typed adapter
//! that contains its failures.
//!
//! - [`StorageBackend`] - substrate trait
//! - [`MemoryBackend`] - in-process map with an optional byte quota
//! - [`FileBackend`] - one JSON file per key in a directory
//! - [`KvStore`] - typed get/set/update/remove over one key

pub mod factory;
pub mod file;
pub mod kv;
pub mod memory;
pub mod traits;

pub use factory::create_storage_backend;
pub use file::FileBackend;
pub use kv::KvStore;
pub use memory::MemoryBackend;
pub use traits::{StorageBackend, StorageResult};
