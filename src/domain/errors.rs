//! Domain error types
//!
//! This module defines the error hierarchy for Caredesk. Errors are
//! domain-specific and don't expose third-party types: HTTP and I/O failures
//! are captured as messages at the adapter boundary.

use thiserror::Error;

/// Main Caredesk error type
///
/// This is the primary error type used throughout the library.
/// It wraps the adapter-specific error types and provides context for
/// error handling.
#[derive(Debug, Error)]
pub enum CaredeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote patient API errors
    ///
    /// Displayed transparently so the original transport message survives
    /// into the list cache's `last_error`.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Storage substrate errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record lookup errors
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Remote patient API errors
///
/// Errors that occur when reading pages from the remote patient collection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("Failed to fetch patients from the API (status {status})")]
    Status { status: u16 },

    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("{0}")]
    Transport(String),

    /// The response body was not a JSON array of patient records
    #[error("Invalid response from patient API: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Whether repeating the request may succeed
    ///
    /// Transport failures and 5xx statuses are retryable; 4xx statuses and
    /// undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status } => *status >= 500,
            FetchError::Transport(_) => true,
            FetchError::InvalidResponse(_) => false,
        }
    }
}

/// Storage substrate errors
///
/// Raised by [`StorageBackend`](crate::adapters::storage::StorageBackend)
/// implementations. The key-value adapter contains these: they are logged
/// and turned into `None`/`false` sentinels.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the substrate's byte quota
    #[error("Storage quota exceeded writing '{key}': needed {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// The key cannot be represented by the substrate
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// The substrate failed to read or write
    #[error("Storage I/O failure on '{key}': {message}")]
    Io { key: String, message: String },

    /// The value could not be encoded or decoded
    #[error("Failed to (de)serialize '{key}': {message}")]
    Serialization { key: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CaredeskError {
    fn from(err: std::io::Error) -> Self {
        CaredeskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CaredeskError {
    fn from(err: serde_json::Error) -> Self {
        CaredeskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CaredeskError {
    fn from(err: toml::de::Error) -> Self {
        CaredeskError::Configuration(format!("TOML parse error: {err}"))
    }
}
