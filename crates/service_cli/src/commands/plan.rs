//! Plan command implementation
//!
//! Computes the schedule for a single course given on the command line.

use clap::Args;
use plan_core::types::{Date, Money};
use plan_models::schedules::{PaymentPlanCalculator, ScheduleRequestBuilder};
use std::io::Write;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::render::{render_plan, OutputFormat, PlanReport};
use crate::{CliError, Result};

/// Arguments of `payplan plan`
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Course start date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Date,

    /// Course end date (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Date,

    /// Total course cost
    #[arg(long)]
    pub cost: Money,

    /// Requested number of monthly installments (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub installments: Option<u32>,

    /// Whether the course has started; derived from the as-of date when omitted
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub started: Option<bool>,

    /// Date the plan is computed on (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<Date>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Run the plan command, writing to stdout
pub fn run(args: &PlanArgs, config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(args, config, &mut out)
}

/// Compute and render the plan into `out`
pub fn execute<W: Write>(args: &PlanArgs, config: &CliConfig, out: &mut W) -> Result<()> {
    let format: OutputFormat = args.format.parse()?;

    if args.cost <= Money::ZERO {
        return Err(CliError::InvalidArgument(
            "Please enter a valid total course cost".to_string(),
        ));
    }

    let as_of = args.as_of.unwrap_or_else(Date::today);
    let installments = args.installments.unwrap_or(config.default_installments);
    let started = args.started.unwrap_or(args.start <= as_of);

    info!("Computing payment plan...");
    info!("  Course: {} to {}", args.start, args.end);
    info!("  Cost: {}", args.cost);
    info!("  Installments requested: {}", installments);
    info!("  Started: {}", started);
    info!("  As of: {}", as_of);

    let request = ScheduleRequestBuilder::new()
        .course_start(args.start)
        .course_end(args.end)
        .total_cost(args.cost)
        .installments(installments)
        .started(started)
        .build()?;

    let calculator = PaymentPlanCalculator::new(config.policy())?;
    let schedule = calculator.compute(&request, as_of)?;

    if !schedule.has_plan() {
        warn!(
            course_end = %args.end,
            "no installment month available before the course end"
        );
    }

    render_plan(
        out,
        &PlanReport {
            course: None,
            schedule: &schedule,
        },
        format,
        &config.currency(),
    )?;

    info!("Plan complete");
    Ok(())
}
