//! CLI error types

use plan_models::schedules::PlanError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Course catalog could not be read
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Schedule computation failed
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
