//! External system integrations for Caredesk.
//!
//! - [`api`] - Remote paginated patient API (HTTP)
//! - [`storage`] - Persistent key-value substrate and the typed adapter over it
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits
//! ([`api::PatientSource`], [`storage::StorageBackend`]) so the core can be
//! exercised with in-memory implementations.
//!
//! ```rust,no_run
//! use caredesk::adapters::api::PatientApiClient;
//! use caredesk::adapters::storage::{FileBackend, KvStore};
//! use caredesk::config::ApiConfig;
//! use caredesk::domain::PatientRecord;
//! use std::sync::Arc;
//!
//! # fn example() -> caredesk::domain::Result<()> {
//! let client = PatientApiClient::new(ApiConfig::default())?;
//! let local: KvStore<Vec<PatientRecord>> =
//!     KvStore::new("localPatients", Arc::new(FileBackend::new("./caredesk-data")));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod storage;
