//! Domain models and types for Caredesk.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`PageToken`])
//! - **Domain models** ([`PatientRecord`], [`PatientDraft`], [`PatientPatch`])
//! - **Field rules and filters** ([`validation`], [`PatientFilter`])
//! - **Error types** ([`CaredeskError`], [`FetchError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Partial updates
//!
//! ```rust
//! use caredesk::domain::{PatientId, PatientPatch, PatientRecord};
//!
//! let id = PatientId::new("7").unwrap();
//! let record = PatientRecord::synthesize(id, PatientPatch::default().name("Ada"));
//! assert_eq!(record.name, "Ada");
//! assert_eq!(record.description, "");
//! ```

pub mod errors;
pub mod filter;
pub mod ids;
pub mod patient;
pub mod result;
pub mod validation;

// Re-export commonly used types for convenience
pub use errors::{CaredeskError, FetchError, StorageError};
pub use filter::PatientFilter;
pub use ids::{PageToken, PatientId};
pub use patient::{now_timestamp, PatientDraft, PatientPatch, PatientRecord};
pub use result::Result;
