//! Aggregated patient listing
//!
//! [`PatientService`] merges local and remote records page by page and
//! [`PatientListCache`] accumulates those pages for an infinite-scroll view.

pub mod cache;
pub mod page;
pub mod service;

pub use cache::{CacheStatus, LoadOutcome, PatientListCache};
pub use page::AggregatePage;
pub use service::PatientService;
