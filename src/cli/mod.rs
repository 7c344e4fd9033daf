//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Caredesk using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Caredesk - patient dashboard from the command line
#[derive(Parser, Debug)]
#[command(name = "caredesk")]
#[command(version, about, long_about = None)]
#[command(author = "Caredesk Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./caredesk.toml when present)
    #[arg(short, long, env = "CAREDESK_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CAREDESK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List patients, local records first
    List(commands::list::ListArgs),

    /// Create a local patient
    Add(commands::add::AddArgs),

    /// Edit a local or remote patient
    Edit(commands::edit::EditArgs),

    /// Toggle a patient's favorite status
    Favorite(commands::favorite::FavoriteArgs),

    /// List favorite patients
    Favorites(commands::favorites::FavoritesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["caredesk", "list"]);
        assert_eq!(cli.config, None);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.pages, 1);
                assert_eq!(args.search, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["caredesk", "--config", "custom.toml", "list"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["caredesk", "--log-level", "debug", "favorites"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_add() {
        let cli = Cli::parse_from([
            "caredesk",
            "add",
            "--name",
            "Ada Lovelace",
            "--description",
            "Analytical engine check-up",
            "--website",
            "https://example.com",
        ]);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.name, "Ada Lovelace");
                assert_eq!(args.avatar, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_edit() {
        let cli = Cli::parse_from(["caredesk", "edit", "42", "--name", "Renamed"]);
        match cli.command {
            Commands::Edit(args) => {
                assert_eq!(args.id, "42");
                assert_eq!(args.name.as_deref(), Some("Renamed"));
                assert_eq!(args.description, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_favorite() {
        let cli = Cli::parse_from(["caredesk", "favorite", "7", "--pages", "3"]);
        assert!(matches!(cli.command, Commands::Favorite(ref a) if a.id == "7" && a.pages == 3));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["caredesk", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["caredesk", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref a) if a.force));
    }
}
