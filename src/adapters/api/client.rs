//! HTTP client for the remote patient API
//!
//! Issues `GET <base_url>?page={page}&limit={limit}` and decodes the JSON
//! array body into [`PatientRecord`]s.

use super::source::PatientSource;
use crate::config::{ApiConfig, RetryConfig};
use crate::domain::{CaredeskError, FetchError, PatientRecord, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Remote patient API client
///
/// # Example
///
/// ```no_run
/// use caredesk::adapters::api::PatientApiClient;
/// use caredesk::config::ApiConfig;
///
/// # fn example() -> caredesk::domain::Result<()> {
/// let client = PatientApiClient::new(ApiConfig::default())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PatientApiClient {
    /// Collection endpoint, without query string
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Retry policy for transient failures
    retry: RetryConfig,
}

impl PatientApiClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns `CaredeskError::Configuration` if the HTTP client cannot be
    /// built.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                CaredeskError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url: config.base_url,
            client,
            retry: config.retry,
        })
    }

    /// Collection endpoint this client reads from
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single request without retries
    async fn fetch_once(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>> {
        tracing::debug!(url = %self.base_url, page, limit, "Requesting patient page");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.base_url, page, status = status.as_u16(), "Patient API returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let records = response
            .json::<Vec<PatientRecord>>()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    FetchError::InvalidResponse(e.to_string())
                } else {
                    FetchError::Transport(e.to_string())
                }
            })?;

        Ok(records)
    }

    /// Retry a request with exponential backoff
    ///
    /// Only retryable fetch errors are repeated; `max_retries` counts total
    /// attempts.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.retry.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    let retryable = matches!(&e, CaredeskError::Fetch(f) if f.is_retryable());
                    if !retryable || attempt >= max_retries {
                        return Err(e);
                    }

                    let delay_ms = self.retry.delay_for_attempt(attempt);
                    crate::log_retry_attempt!(attempt, max_retries, e.to_string());
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl PatientSource for PatientApiClient {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<PatientRecord>> {
        if page == 0 {
            return Err(CaredeskError::Validation(
                "Page numbers start at 1".to_string(),
            ));
        }
        if limit == 0 {
            return Err(CaredeskError::Validation(
                "Page limit must be greater than 0".to_string(),
            ));
        }

        let records = self.retry_request(|| self.fetch_once(page, limit)).await?;
        tracing::debug!(page, limit, received = records.len(), "Fetched patient page");
        Ok(records)
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
