//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction, parsing and month arithmetic
//! - `MoneyError`: Errors from parsing and converting monetary amounts

use thiserror::Error;

/// Date-related errors.
///
/// # Examples
/// ```
/// use plan_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Month arithmetic left the representable calendar range.
    #[error("Month arithmetic overflow: {date} shifted by {months} months")]
    MonthOverflow {
        /// The date being shifted
        date: String,
        /// Signed month offset that was applied
        months: i64,
    },
}

/// Money-related errors.
///
/// # Examples
/// ```
/// use plan_core::types::MoneyError;
///
/// let err = MoneyError::ParseError("abc".to_string());
/// assert_eq!(format!("{}", err), "Amount parse error: abc");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Failed to parse an amount string.
    #[error("Amount parse error: {0}")]
    ParseError(String),

    /// Decimal arithmetic overflowed.
    #[error("Amount overflow in {operation}")]
    Overflow {
        /// The operation that overflowed
        operation: &'static str,
    },
}
