//! Schedule output in table, JSON and CSV form.

use plan_core::types::CurrencyFormat;
use plan_models::schedules::{ChargeKind, PaymentEntry, PaymentSchedule, PlanStatus};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

use crate::{CliError, Result};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Table,
    /// Pretty printed JSON
    Json,
    /// One CSV row per schedule entry
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            ))),
        }
    }
}

/// A computed schedule, optionally tagged with the course it belongs to.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    /// Course name for catalog runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<&'a str>,
    /// The schedule
    #[serde(flatten)]
    pub schedule: &'a PaymentSchedule,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    course: &'a str,
    kind: &'static str,
    number: Option<u32>,
    date: Option<String>,
    label: String,
    amount: String,
}

/// Render a single plan.
pub fn render_plan<W: Write>(
    out: &mut W,
    report: &PlanReport<'_>,
    format: OutputFormat,
    currency: &CurrencyFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, report, currency),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, std::slice::from_ref(report)),
    }
}

/// Render the plans of a catalog run. JSON output is an array.
pub fn render_batch<W: Write>(
    out: &mut W,
    reports: &[PlanReport<'_>],
    format: OutputFormat,
    currency: &CurrencyFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_table(out, report, currency)?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, reports)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, reports),
    }
}

fn write_table<W: Write>(
    out: &mut W,
    report: &PlanReport<'_>,
    currency: &CurrencyFormat,
) -> Result<()> {
    let schedule = report.schedule;

    if let Some(course) = report.course {
        writeln!(out, "== {} ==", course)?;
    }
    writeln!(out, "Payment Schedule:")?;
    for entry in schedule.iter() {
        writeln!(out, "{}: {}", entry.label(), currency.format(entry.amount()))?;
    }

    if schedule.status() == PlanStatus::NoAvailableWindow {
        writeln!(
            out,
            "No installment months are available before the course end date."
        )?;
    }

    let fees = schedule.fees();
    writeln!(out, "Finance fee: {}", currency.format(fees.finance_fee))?;
    writeln!(
        out,
        "Remaining balance: {}",
        currency.format(schedule.remaining_balance())
    )?;
    writeln!(
        out,
        "Installments: {} of {}",
        schedule.installment_count(),
        schedule.effective_count()
    )?;
    if !schedule.rounding_residue().is_zero() {
        writeln!(
            out,
            "Rounding residue: {}",
            currency.format(schedule.rounding_residue())
        )?;
    }
    if schedule.unscheduled_balance() != schedule.rounding_residue() {
        writeln!(
            out,
            "Unscheduled balance: {}",
            currency.format(schedule.unscheduled_balance())
        )?;
    }
    writeln!(out, "Total payable: {}", currency.format(schedule.total_payable()))?;

    Ok(())
}

fn write_csv<W: Write>(out: &mut W, reports: &[PlanReport<'_>]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    for report in reports {
        let course = report.course.unwrap_or("");
        for entry in report.schedule.iter() {
            let (kind, number) = match entry {
                PaymentEntry::Charge {
                    kind: ChargeKind::Downpayment,
                    ..
                } => ("downpayment", None),
                PaymentEntry::Charge {
                    kind: ChargeKind::LateFee,
                    ..
                } => ("late_fee", None),
                PaymentEntry::Installment { number, .. } => ("installment", Some(*number)),
            };
            writer.serialize(CsvRow {
                course,
                kind,
                number,
                date: entry.date().map(|d| d.to_string()),
                label: entry.label(),
                amount: entry.amount().to_string(),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}
