//! Batch command implementation
//!
//! Computes a schedule for every course in a catalog CSV.

use clap::Args;
use plan_core::types::{Date, Money};
use plan_models::schedules::{PaymentPlanCalculator, PaymentSchedule, ScheduleRequestBuilder};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::catalog::{load_catalog, Catalog, Course};
use crate::config::CliConfig;
use crate::render::{render_batch, OutputFormat, PlanReport};
use crate::{CliError, Result};

/// Arguments of `payplan batch`
#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Course catalog CSV (course_name,start_date,end_date,price[,started])
    #[arg(long)]
    pub catalog: PathBuf,

    /// Requested number of monthly installments (defaults to the configured value)
    #[arg(short = 'n', long)]
    pub installments: Option<u32>,

    /// Date the plans are computed on (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<Date>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Counts reported after a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Courses with a computed schedule
    pub planned: usize,
    /// Catalog rows or courses that produced no schedule
    pub skipped: usize,
}

/// Run the batch command, writing to stdout
pub fn run(args: &BatchArgs, config: &CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(args, config, &mut out).map(|_| ())
}

/// Load the catalog, compute every plan and render them into `out`
pub fn execute<W: Write>(
    args: &BatchArgs,
    config: &CliConfig,
    out: &mut W,
) -> Result<BatchSummary> {
    let format: OutputFormat = args.format.parse()?;
    let as_of = args.as_of.unwrap_or_else(Date::today);
    let installments = args.installments.unwrap_or(config.default_installments);

    info!("Running catalog batch...");
    info!("  Catalog: {}", args.catalog.display());
    info!("  Installments requested: {}", installments);
    info!("  As of: {}", as_of);

    let catalog = load_catalog(&args.catalog)?;
    let calculator = PaymentPlanCalculator::new(config.policy())?;
    let (planned, skipped) = plan_catalog(&catalog, &calculator, installments, as_of);

    let summary = BatchSummary {
        planned: planned.len(),
        skipped: skipped + catalog.rejected.len(),
    };
    info!(
        planned = summary.planned,
        skipped = summary.skipped,
        "Batch complete"
    );

    if planned.is_empty() {
        return Err(CliError::Catalog(format!(
            "no course in {} produced a plan",
            args.catalog.display()
        )));
    }

    let reports: Vec<PlanReport<'_>> = planned
        .iter()
        .map(|(course, schedule)| PlanReport {
            course: Some(course.name.as_str()),
            schedule,
        })
        .collect();
    render_batch(out, &reports, format, &config.currency())?;

    Ok(summary)
}

fn plan_catalog<'a>(
    catalog: &'a Catalog,
    calculator: &PaymentPlanCalculator,
    installments: u32,
    as_of: Date,
) -> (Vec<(&'a Course, PaymentSchedule)>, usize) {
    let mut planned = Vec::with_capacity(catalog.courses.len());
    let mut skipped = 0;

    for course in &catalog.courses {
        match plan_course(course, calculator, installments, as_of) {
            Ok(schedule) => planned.push((course, schedule)),
            Err(e) => {
                warn!(course = %course.name, error = %e, "skipping course");
                skipped += 1;
            }
        }
    }

    (planned, skipped)
}

fn plan_course(
    course: &Course,
    calculator: &PaymentPlanCalculator,
    installments: u32,
    as_of: Date,
) -> Result<PaymentSchedule> {
    if course.price <= Money::ZERO {
        return Err(CliError::InvalidArgument(format!(
            "price must be positive, got {}",
            course.price
        )));
    }

    let request = ScheduleRequestBuilder::new()
        .course_start(course.start_date)
        .course_end(course.end_date)
        .total_cost(course.price)
        .installments(installments)
        .started(course.is_started(as_of))
        .build()?;

    Ok(calculator.compute(&request, as_of)?)
}
