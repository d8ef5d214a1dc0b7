//! CLI configuration management.
//!
//! Loads `payplan.toml` (or the file given with `--config`), falls back to
//! defaults when the file does not exist, applies `PAYPLAN_*` environment
//! overrides and validates the result.
//!
//! ```toml
//! fee_version = "revised"
//! anchor = "course-start"
//! currency_symbol = "£"
//! default_installments = 12
//! log_level = "info"
//!
//! [fee_overrides]
//! late_fee = 99
//! ```

use plan_core::types::{CurrencyFormat, Money};
use plan_models::policy::{
    FeePolicyVersion, FeeTable, FirstPaymentAnchor, PlanPolicy, MAX_INSTALLMENTS,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from the configuration file
    File,
    /// File absent, built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Source used for `path`
    pub fn of(path: &Path) -> Self {
        if path.exists() {
            ConfigSource::File
        } else {
            ConfigSource::Defaults
        }
    }

    /// Short description for `payplan check`
    pub fn describe(&self) -> &'static str {
        match self {
            ConfigSource::File => "loaded",
            ConfigSource::Defaults => "not found, using defaults",
        }
    }
}

/// Individual fee amounts replacing the ones from `fee_version`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FeeOverrides {
    /// Downpayment before the course starts
    pub downpayment_before_start: Option<Money>,
    /// Downpayment once the course has started
    pub downpayment_after_start: Option<Money>,
    /// Finance fee
    pub finance_fee: Option<Money>,
    /// Late fee
    pub late_fee: Option<Money>,
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Named fee table revision
    pub fee_version: FeePolicyVersion,

    /// Per-fee overrides applied on top of `fee_version`
    pub fee_overrides: FeeOverrides,

    /// First payment anchoring rule
    pub anchor: FirstPaymentAnchor,

    /// Currency symbol used when printing amounts
    pub currency_symbol: String,

    /// Installments requested when the command line does not say
    pub default_installments: u32,

    /// Log level
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            fee_version: FeePolicyVersion::default(),
            fee_overrides: FeeOverrides::default(),
            anchor: FirstPaymentAnchor::default(),
            currency_symbol: CurrencyFormat::default().symbol().to_string(),
            default_installments: MAX_INSTALLMENTS,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` if it exists, otherwise use defaults
    ///
    /// Runs before logging is initialised, so it does not log. Callers report
    /// the [`ConfigSource`] once the subscriber is up.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match ConfigSource::of(path) {
            ConfigSource::File => Self::load(path),
            ConfigSource::Defaults => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values are reported as `ConfigError::Validation`.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();

        if let Some(version) = lookup("PAYPLAN_FEE_VERSION") {
            match version.parse() {
                Ok(v) => self.fee_version = v,
                Err(e) => errors.push(format!("PAYPLAN_FEE_VERSION: {}", e)),
            }
        }

        if let Some(anchor) = lookup("PAYPLAN_ANCHOR") {
            match anchor.parse() {
                Ok(a) => self.anchor = a,
                Err(e) => errors.push(format!("PAYPLAN_ANCHOR: {}", e)),
            }
        }

        if let Some(symbol) = lookup("PAYPLAN_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(count) = lookup("PAYPLAN_DEFAULT_INSTALLMENTS") {
            match count.parse() {
                Ok(n) => self.default_installments = n,
                Err(e) => errors.push(format!("PAYPLAN_DEFAULT_INSTALLMENTS: {}", e)),
            }
        }

        if let Some(log_level) = lookup("PAYPLAN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.default_installments == 0 || self.default_installments > MAX_INSTALLMENTS {
            errors.push(format!(
                "default_installments must be between 1 and {}, got {}",
                MAX_INSTALLMENTS, self.default_installments
            ));
        }

        if self.currency_symbol.trim().is_empty() {
            errors.push("currency_symbol cannot be empty".to_string());
        }

        if let Err(e) = self.fee_table().validate() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Fee table after applying overrides
    pub fn fee_table(&self) -> FeeTable {
        let base = FeeTable::for_version(self.fee_version);
        let o = &self.fee_overrides;
        FeeTable {
            downpayment_before_start: o
                .downpayment_before_start
                .unwrap_or(base.downpayment_before_start),
            downpayment_after_start: o
                .downpayment_after_start
                .unwrap_or(base.downpayment_after_start),
            finance_fee: o.finance_fee.unwrap_or(base.finance_fee),
            late_fee: o.late_fee.unwrap_or(base.late_fee),
        }
    }

    /// Plan policy handed to the calculator
    pub fn policy(&self) -> PlanPolicy {
        PlanPolicy {
            fees: self.fee_table(),
            anchor: self.anchor,
        }
    }

    /// Currency formatter for output
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}
