//! Calendar date type and whole-month arithmetic.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Month anchoring (`first_of_month`, `first_of_next_month`)
//! - Month stepping and whole calendar month distances
//!
//! Dates carry no timezone. An installment plan only ever needs the
//! (year, month, day) triple, so everything here works on `NaiveDate`.
//!
//! # Examples
//!
//! ```
//! use plan_core::types::time::Date;
//!
//! let today = Date::from_ymd(2024, 3, 18).unwrap();
//! let first = today.first_of_next_month().unwrap();
//! assert_eq!(first, Date::from_ymd(2024, 4, 1).unwrap());
//!
//! let end = Date::from_ymd(2024, 9, 30).unwrap();
//! assert_eq!(first.months_until(end), 5);
//! ```

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the month arithmetic used by
/// installment scheduling.
///
/// # Examples
///
/// ```
/// use plan_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    ///
    /// Only the command line layer should call this; schedule computation
    /// always takes its reference date as an argument.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("15/06/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the 1st day of this date's month.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(date.first_of_month(), Date::from_ymd(2024, 2, 1).unwrap());
    /// ```
    pub fn first_of_month(&self) -> Date {
        // Day 1 exists in every month, so `with_day(1)` cannot fail.
        Date(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Returns the 1st day of the month after this date's month.
    ///
    /// # Errors
    ///
    /// Returns `DateError::MonthOverflow` at the end of chrono's range.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 12, 5).unwrap();
    /// assert_eq!(
    ///     date.first_of_next_month().unwrap(),
    ///     Date::from_ymd(2025, 1, 1).unwrap()
    /// );
    /// ```
    pub fn first_of_next_month(&self) -> Result<Date, DateError> {
        self.first_of_month().checked_add_months(1)
    }

    /// Adds `months` calendar months.
    ///
    /// Follows chrono's clamping rule: Jan 31 + 1 month is the last day of
    /// February. Dates anchored on the 1st are never clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 11, 1).unwrap();
    /// assert_eq!(
    ///     date.checked_add_months(3).unwrap(),
    ///     Date::from_ymd(2025, 2, 1).unwrap()
    /// );
    /// ```
    pub fn checked_add_months(&self, months: u32) -> Result<Date, DateError> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Date)
            .ok_or(DateError::MonthOverflow {
                date: self.to_string(),
                months: months as i64,
            })
    }

    /// Subtracts `months` calendar months.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2025, 3, 1).unwrap();
    /// assert_eq!(
    ///     date.checked_sub_months(12).unwrap(),
    ///     Date::from_ymd(2024, 3, 1).unwrap()
    /// );
    /// ```
    pub fn checked_sub_months(&self, months: u32) -> Result<Date, DateError> {
        self.0
            .checked_sub_months(Months::new(months))
            .map(Date)
            .ok_or(DateError::MonthOverflow {
                date: self.to_string(),
                months: -(months as i64),
            })
    }

    /// Returns the signed number of calendar months from this date's month
    /// to `other`'s month, ignoring the day of month.
    ///
    /// `(other.year - self.year) * 12 + (other.month - self.month)`
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::time::Date;
    ///
    /// let a = Date::from_ymd(2024, 11, 30).unwrap();
    /// let b = Date::from_ymd(2025, 2, 1).unwrap();
    /// assert_eq!(a.months_until(b), 3);
    /// assert_eq!(b.months_until(a), -3);
    /// ```
    pub fn months_until(&self, other: Date) -> i32 {
        (other.year() - self.year()) * 12 + (other.month() as i32 - self.month() as i32)
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}
