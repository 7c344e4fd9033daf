//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CaredeskConfig, StorageKind};
use crate::domain::errors::CaredeskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "caredesk.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CaredeskConfig
/// 4. Applies environment variable overrides (CAREDESK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use caredesk::config::loader::load_config;
///
/// let config = load_config("caredesk.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CaredeskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CaredeskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CaredeskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Loads `path` if given, otherwise `caredesk.toml` when present, otherwise
/// the defaults
///
/// Environment overrides and validation apply in every case. Only an
/// explicitly requested file is required to exist.
pub fn load_or_default(path: Option<&Path>) -> Result<CaredeskConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No configuration file found, using defaults");
    let mut config = CaredeskConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<CaredeskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CaredeskConfig = toml::from_str(&contents)
        .map_err(|e| CaredeskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &CaredeskConfig) -> Result<()> {
    config.validate().map_err(|e| {
        CaredeskError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CaredeskError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CaredeskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CaredeskError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using CAREDESK_* prefix
///
/// Environment variables follow the pattern: CAREDESK_<SECTION>_<KEY>
/// For example: CAREDESK_API_BASE_URL, CAREDESK_STORAGE_BACKEND
fn apply_env_overrides(config: &mut CaredeskConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CAREDESK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("CAREDESK_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("CAREDESK_API_PAGE_SIZE") {
        config.api.page_size = parse_env("CAREDESK_API_PAGE_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("CAREDESK_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_env("CAREDESK_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("CAREDESK_API_RETRY_MAX_RETRIES") {
        config.api.retry.max_retries = parse_env("CAREDESK_API_RETRY_MAX_RETRIES", &val)?;
    }

    // Storage overrides
    if let Ok(val) = std::env::var("CAREDESK_STORAGE_BACKEND") {
        config.storage.backend = val
            .parse::<StorageKind>()
            .map_err(CaredeskError::Configuration)?;
    }
    if let Ok(val) = std::env::var("CAREDESK_STORAGE_PATH") {
        config.storage.path = val;
    }
    if let Ok(val) = std::env::var("CAREDESK_STORAGE_QUOTA_BYTES") {
        config.storage.quota_bytes = Some(parse_env("CAREDESK_STORAGE_QUOTA_BYTES", &val)?);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CAREDESK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CAREDESK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CAREDESK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
