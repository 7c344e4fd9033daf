//! Logging and observability
//!
//! Structured logging through `tracing`, plus a few macros for the events
//! every list session produces.
//!
//! # Example
//!
//! ```no_run
//! use caredesk::logging::init_logging;
//! use caredesk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a loaded aggregate page
///
/// # Example
///
/// ```no_run
/// use caredesk::log_page_loaded;
/// use caredesk::domain::PageToken;
///
/// log_page_loaded!("https://api.example.com/users", PageToken::FIRST, 100, 103, true);
/// ```
#[macro_export]
macro_rules! log_page_loaded {
    ($source:expr, $token:expr, $remote:expr, $total:expr, $has_more:expr) => {
        tracing::info!(
            source = %$source,
            page = %$token,
            remote = $remote,
            total = $total,
            has_more = $has_more,
            "Loaded patient page"
        );
    };
}

/// Log a failed storage operation
///
/// # Example
///
/// ```no_run
/// use caredesk::log_storage_failure;
/// use caredesk::domain::StorageError;
///
/// let error = StorageError::InvalidKey("".to_string());
/// log_storage_failure!("set", "localPatients", &error);
/// ```
#[macro_export]
macro_rules! log_storage_failure {
    ($op:expr, $key:expr, $error:expr) => {
        tracing::warn!(
            op = $op,
            key = %$key,
            error = %$error,
            "Storage operation failed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use caredesk::log_retry_attempt;
///
/// log_retry_attempt!(1, 2, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying request"
        );
    };
}
