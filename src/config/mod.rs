//! Configuration management for Caredesk.
//!
//! # Overview
//!
//! Caredesk uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CAREDESK_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting, so the file itself is optional
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://63bedcf7f5cfc0949b634fc8.mockapi.io/users"
//! page_size = 100
//! timeout_seconds = 10
//!
//! [api.retry]
//! max_retries = 2
//!
//! [storage]
//! backend = "file"
//! path = "${HOME}/.caredesk"
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use caredesk::config::load_config;
//!
//! # fn example() {
//! match load_config("caredesk.toml") {
//!     Ok(config) => println!("Remote endpoint: {}", config.api.base_url),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_or_default, parse_config, DEFAULT_CONFIG_PATH};
pub use schema::{
    ApiConfig, ApplicationConfig, CaredeskConfig, LoggingConfig, RetryConfig, StorageConfig,
    StorageKind,
};
