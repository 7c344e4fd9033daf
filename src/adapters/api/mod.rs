//! Remote patient API adapter
//!
//! This module provides the integration with the remote paginated patient
//! collection: the [`PatientSource`] abstraction and its HTTP
//! implementation.

pub mod client;
pub mod source;

pub use client::PatientApiClient;
pub use source::PatientSource;
