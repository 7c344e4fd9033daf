//! Core business logic for Caredesk.
//!
//! # Modules
//!
//! - [`store`] - Persisted local records and favorites
//! - [`aggregate`] - Local/remote merge and the paginated list cache
//!
//! # Listing Workflow
//!
//! 1. **Page 1**: all local records, then remote page 1 minus local ids
//! 2. **Later pages**: remote records only, until a short page arrives
//! 3. **Mutations**: written to the local store, then injected into the
//!    cache without refetching
//!
//! # Example
//!
//! ```rust,no_run
//! use caredesk::adapters::api::PatientApiClient;
//! use caredesk::adapters::storage::MemoryBackend;
//! use caredesk::config::ApiConfig;
//! use caredesk::core::aggregate::{PatientListCache, PatientService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PatientApiClient::new(ApiConfig::default())?;
//! let service = PatientService::from_backend(Arc::new(MemoryBackend::new()), Arc::new(client));
//! let cache = PatientListCache::new(service, 100);
//!
//! while cache.has_more() && cache.pages_loaded() < 3 {
//!     cache.load_next().await;
//! }
//! println!("Loaded {} patients", cache.flattened_records().len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod store;
