//! Check command implementation
//!
//! Prints the configuration the other commands would run with.

use plan_models::policy::MAX_INSTALLMENTS;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::{CliConfig, ConfigSource};
use crate::Result;

/// Run the check command, writing to stdout
pub fn run(config: &CliConfig, config_path: &Path) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, config_path, &mut out)
}

/// Render the effective configuration into `out`
pub fn execute<W: Write>(config: &CliConfig, config_path: &Path, out: &mut W) -> Result<()> {
    info!("Checking configuration...");

    config.validate()?;
    let currency = config.currency();
    let fees = config.fee_table();

    let source = ConfigSource::of(config_path).describe();

    writeln!(out, "payplan configuration")?;
    writeln!(out, "  Config file: {} ({})", config_path.display(), source)?;
    writeln!(out, "  Fee version: {}", config.fee_version)?;
    writeln!(
        out,
        "  Downpayment before start: {}",
        currency.format(fees.downpayment_before_start)
    )?;
    writeln!(
        out,
        "  Downpayment after start: {}",
        currency.format(fees.downpayment_after_start)
    )?;
    writeln!(out, "  Finance fee: {}", currency.format(fees.finance_fee))?;
    writeln!(out, "  Late fee: {}", currency.format(fees.late_fee))?;
    writeln!(out, "  First payment anchor: {}", config.anchor)?;
    writeln!(
        out,
        "  Default installments: {} (max {})",
        config.default_installments, MAX_INSTALLMENTS
    )?;
    writeln!(out, "  Log level: {}", config.log_level)?;
    writeln!(out, "Configuration OK")?;

    Ok(())
}
