//! Remote patient source trait
//!
//! Abstracts the paginated, read-only remote collection so the aggregation
//! service can be driven by the HTTP client in production and by fixed
//! pages in tests.

use crate::domain::{PatientRecord, Result};
use async_trait::async_trait;

/// Paginated read-only access to the remote patient collection
///
/// # Example
///
/// ```no_run
/// use caredesk::adapters::api::{PatientApiClient, PatientSource};
/// use caredesk::config::ApiConfig;
///
/// # async fn example() -> caredesk::domain::Result<()> {
/// let client = PatientApiClient::new(ApiConfig::default())?;
/// let first = client.fetch_page(1, 100).await?;
/// if first.len() < 100 {
///     println!("remote collection exhausted after one page");
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PatientSource: Send + Sync {
    /// Fetch one page of remote records
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `limit` - page size, greater than zero
    ///
    /// # Returns
    ///
    /// The decoded records. An empty page, or one shorter than `limit`,
    /// signals the end of the collection and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CaredeskError::Fetch` for non-success statuses and
    /// transport failures, `CaredeskError::Validation` for a zero page or
    /// limit.
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>>;

    /// Endpoint description for log fields
    fn endpoint(&self) -> &str;
}
