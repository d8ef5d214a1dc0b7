//! Payment plan error types.

use plan_core::types::{DateError, MoneyError};
use thiserror::Error;

/// Errors that can occur while building a payment plan.
///
/// A course with no usable installment months is not an error; it is
/// reported through [`PlanStatus::NoAvailableWindow`](super::PlanStatus).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The request was rejected before any computation started.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Why the request was rejected.
        reason: String,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The fee table is unusable (negative fee).
    #[error("Invalid fee policy: {reason}")]
    InvalidPolicy {
        /// Why the policy was rejected.
        reason: String,
    },

    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow: {0}")]
    DateOverflow(#[from] DateError),

    /// Decimal arithmetic overflow.
    #[error("Amount arithmetic failed: {0}")]
    Arithmetic(#[from] MoneyError),
}

impl PlanError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            reason: reason.into(),
        }
    }
}
