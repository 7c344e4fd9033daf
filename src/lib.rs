// Caredesk - Patient Dashboard Core
// Copyright (c) 2025 Caredesk Contributors
// Licensed under the MIT License

//! # Caredesk - Patient Dashboard Core
//!
//! Caredesk merges a paginated remote patient API with patients created or
//! edited locally, keeps a favorites list, and serves the result as an
//! infinite-scroll list whose cache stays coherent across edits.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (record stores, aggregation, list cache)
//! - [`adapters`] - External integrations (key-value storage, remote API)
//! - [`domain`] - Core domain types, validation and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caredesk::cli::commands::build_service;
//! use caredesk::config::load_or_default;
//! use caredesk::core::aggregate::PatientListCache;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_or_default(None)?;
//!     let cache = PatientListCache::new(build_service(&config)?, config.api.page_size);
//!
//!     cache.load_next().await;
//!     for patient in cache.flattened_records() {
//!         println!("{} {}", patient.initials(), patient.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Mutations
//!
//! Creates and edits go to the local record store and are injected into the
//! cache, so the list reflects them without a refetch:
//!
//! ```rust,no_run
//! use caredesk::core::aggregate::PatientListCache;
//! use caredesk::domain::{PatientDraft, PatientId, PatientPatch};
//!
//! # fn example(cache: &PatientListCache) -> Result<(), Box<dyn std::error::Error>> {
//! let draft = PatientDraft {
//!     name: "Ada Lovelace".to_string(),
//!     description: "Analytical engine check-up".to_string(),
//!     website: "https://ada.example.com".to_string(),
//!     avatar: String::new(),
//! };
//! draft.validate()?;
//!
//! let created = cache.service().create_patient(draft);
//! cache.inject_created(created.clone());
//!
//! if let Some(updated) = cache
//!     .service()
//!     .update_patient(&created.id, PatientPatch::default().name("Augusta Ada King"))
//! {
//!     cache.inject_updated(updated);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible library calls return [`domain::Result`] with
//! [`domain::CaredeskError`]. Storage failures never surface as errors:
//! the key-value adapter logs them and returns a sentinel.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
