// Caredesk - Patient Dashboard Core
// Copyright (c) 2025 Caredesk Contributors
// Licensed under the MIT License

use caredesk::cli::{Cli, Commands};
use caredesk::config::{load_or_default, CaredeskConfig, LoggingConfig};
use caredesk::domain::Result;
use caredesk::logging::init_logging;
use clap::Parser;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = load_or_default(cli.config.as_deref().map(Path::new));

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Caredesk starting");

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, loaded: Result<CaredeskConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ValidateConfig(args) => return args.execute(cli.config.as_deref()).await,
        Commands::Init(args) => return args.execute().await,
        _ => {}
    }

    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            return Ok(2); // Configuration error exit code
        }
    };

    match &cli.command {
        Commands::List(args) => args.execute(&config).await,
        Commands::Add(args) => args.execute(&config).await,
        Commands::Edit(args) => args.execute(&config).await,
        Commands::Favorite(args) => args.execute(&config).await,
        Commands::Favorites(args) => args.execute(&config).await,
        Commands::ValidateConfig(_) | Commands::Init(_) => Ok(0),
    }
}
