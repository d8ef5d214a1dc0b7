//! payplan - course installment plan calculator
//!
//! Command line entry point for the plan library crates.
//!
//! # Commands
//!
//! - `payplan plan --start <date> --end <date> --cost <amount>` - Schedule for one course
//! - `payplan batch --catalog <file>` - Schedules for every course in a catalog CSV
//! - `payplan check` - Show the effective configuration
//!
//! Logs go to stderr so JSON and CSV output on stdout stay machine readable.
//! `RUST_LOG` takes precedence over `--verbose` and the configured level.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod catalog;
mod commands;
mod config;
mod error;
mod render;

pub use error::{CliError, Result};

use config::{CliConfig, ConfigSource};

/// Course installment plan calculator
#[derive(Parser)]
#[command(name = "payplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "payplan.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the payment schedule for a single course
    Plan(commands::plan::PlanArgs),

    /// Compute payment schedules for every course in a catalog CSV
    Batch(commands::batch::BatchArgs),

    /// Check configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load_with_env_and_validate(&cli.config)?;

    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };

    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    match ConfigSource::of(&cli.config) {
        ConfigSource::File => info!("Loaded configuration from {}", cli.config.display()),
        ConfigSource::Defaults => debug!(
            "No configuration at {}, using defaults",
            cli.config.display()
        ),
    }
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Plan(args) => commands::plan::run(&args, &config),
        Commands::Batch(args) => commands::batch::run(&args, &config),
        Commands::Check => commands::check::run(&config, &cli.config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "payplan",
            "plan",
            "--start",
            "2024-04-01",
            "--end",
            "2024-12-31",
            "--cost",
            "3000",
            "-n",
            "6",
            "--started",
            "--as-of",
            "2024-03-18",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.start.to_string(), "2024-04-01");
                assert_eq!(args.cost.to_string(), "3000.00");
                assert_eq!(args.installments, Some(6));
                assert_eq!(args.started, Some(true));
                assert_eq!(args.format, "table");
            }
            _ => panic!("Expected plan command"),
        }
        assert_eq!(cli.config, PathBuf::from("payplan.toml"));
    }

    #[test]
    fn test_parse_started_false_and_global_flags() {
        let cli = Cli::try_parse_from([
            "payplan",
            "plan",
            "-s",
            "2024-04-01",
            "-e",
            "2024-12-31",
            "--cost",
            "3000",
            "--started",
            "false",
            "--verbose",
            "--config",
            "other.toml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Commands::Plan(args) => assert_eq!(args.started, Some(false)),
            _ => panic!("Expected plan command"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "payplan",
            "plan",
            "--start",
            "2024-13-01",
            "--end",
            "2024-12-31",
            "--cost",
            "3000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_batch_command() {
        let cli = Cli::try_parse_from([
            "payplan",
            "batch",
            "--catalog",
            "courses.csv",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.catalog, PathBuf::from("courses.csv"));
                assert_eq!(args.format, "json");
                assert_eq!(args.installments, None);
            }
            _ => panic!("Expected batch command"),
        }
    }
}
