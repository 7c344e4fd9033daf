//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Caredesk configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: caredesk validate-config");
                println!("  3. List patients: caredesk list");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Caredesk Configuration File

[application]
log_level = "info"

[api]
base_url = "https://63bedcf7f5cfc0949b634fc8.mockapi.io/users"
page_size = 100
timeout_seconds = 10

[storage]
backend = "file"
path = "./caredesk-data"

[logging]
local_enabled = false
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Caredesk Configuration File
#
# Every setting has a default; delete whatever you do not need to change.
# Values may reference environment variables as ${VAR_NAME}, and any key can
# be overridden with CAREDESK_<SECTION>_<KEY> (for example CAREDESK_API_PAGE_SIZE).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Remote Patient API
# ============================================================================
[api]
# Collection endpoint, queried as GET <base_url>?page=N&limit=M
base_url = "https://63bedcf7f5cfc0949b634fc8.mockapi.io/users"

# Records per remote page (1-1000); a shorter page ends the list
page_size = 100

# Request timeout in seconds
timeout_seconds = 10

# Retries apply to transport failures and 5xx responses only
[api.retry]
# Total attempts per request, including the first (1-10)
max_retries = 2

# Backoff delays in milliseconds
initial_delay_ms = 500
max_delay_ms = 5000
backoff_multiplier = 2.0

# ============================================================================
# Storage
# ============================================================================
[storage]
# "file" keeps local patients and favorites under `path`;
# "memory" keeps them for the lifetime of the process only
backend = "file"
path = "./caredesk-data"

# Optional byte quota for the memory backend
# quota_bytes = 5242880

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to rolling files
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
