//! Validate config command implementation

use crate::config::load_or_default;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown = config_path.unwrap_or("(defaults)");
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration: {shown}");
        println!();

        // Loading also validates
        let config = match load_or_default(config_path.map(Path::new)) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API Endpoint: {}", config.api.base_url);
        println!("  Page Size: {}", config.api.page_size);
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  Max Attempts: {}", config.api.retry.max_retries);
        println!("  Storage Backend: {}", config.storage.backend);
        println!("  Storage Path: {}", config.storage.path);
        if let Some(quota) = config.storage.quota_bytes {
            println!("  Storage Quota: {quota} bytes");
        }
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
