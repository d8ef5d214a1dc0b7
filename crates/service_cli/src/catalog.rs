//! Course catalog loading.
//!
//! A catalog is a CSV file with a header row:
//!
//! ```text
//! course_name,start_date,end_date,price[,started]
//! Data Analytics,2024-04-01,2024-12-31,3000
//! ```
//!
//! Rows that fail to parse are logged and collected in
//! [`Catalog::rejected`]; they never reach the calculator.

use plan_core::types::{Date, Money};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::{CliError, Result};

/// One course from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Display name
    pub name: String,
    /// First day of the course
    pub start_date: Date,
    /// Last day of the course
    pub end_date: Date,
    /// Total price
    pub price: Money,
    /// Explicit started flag; `None` means derive it from the as-of date
    pub started: Option<bool>,
}

impl Course {
    /// Whether the course counts as started on `as_of`.
    pub fn is_started(&self, as_of: Date) -> bool {
        self.started.unwrap_or(self.start_date <= as_of)
    }
}

/// A row that could not be turned into a [`Course`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line in the file, header included
    pub line: u64,
    /// Why it was rejected
    pub reason: String,
}

/// Parsed catalog contents.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Courses that parsed
    pub courses: Vec<Course>,
    /// Rows that were skipped
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "Course Name", alias = "course")]
    course_name: String,
    #[serde(alias = "Start Date")]
    start_date: String,
    #[serde(alias = "End Date")]
    end_date: String,
    #[serde(alias = "Price", alias = "cost")]
    price: String,
    #[serde(default, alias = "Started")]
    started: Option<String>,
}

impl RawRow {
    fn into_course(self) -> std::result::Result<Course, String> {
        let name = self.course_name.trim().to_string();
        if name.is_empty() {
            return Err("empty course_name".to_string());
        }

        let start_date = Date::parse(&self.start_date)
            .map_err(|e| format!("start_date '{}': {}", self.start_date, e))?;
        let end_date = Date::parse(&self.end_date)
            .map_err(|e| format!("end_date '{}': {}", self.end_date, e))?;
        let price = Money::parse(self.price.trim().trim_start_matches('£'))
            .map_err(|e| format!("price '{}': {}", self.price, e))?;
        let started = match self.started.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_flag(value)?),
        };

        Ok(Course {
            name,
            start_date,
            end_date,
            price,
            started,
        })
    }
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(format!("started '{}': expected true or false", other)),
    }
}

/// Load a catalog from a CSV file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    read_catalog(file)
}

/// Read a catalog from any CSV source.
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    debug!(?headers, "catalog header");

    let mut catalog = Catalog::default();
    let mut record = csv::StringRecord::new();
    loop {
        let (line, parsed) = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => (
                record.position().map_or(0, |p| p.line()),
                record
                    .deserialize::<RawRow>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(RawRow::into_course),
            ),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => (e.position().map_or(0, |p| p.line()), Err(e.to_string())),
        };

        match parsed {
            Ok(course) => catalog.courses.push(course),
            Err(reason) => {
                warn!(line, %reason, "skipping catalog row");
                catalog.rejected.push(RejectedRow { line, reason });
            }
        }
    }

    if catalog.courses.is_empty() && catalog.rejected.is_empty() {
        return Err(CliError::Catalog("catalog contains no courses".to_string()));
    }

    Ok(catalog)
}
