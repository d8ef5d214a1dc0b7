//! ScheduleRequest and ScheduleRequestBuilder.

use super::error::PlanError;
use plan_core::types::{Date, Money};

/// Inputs for a single payment plan calculation.
///
/// Fields are public so callers (form handlers, catalog loaders) can build
/// requests directly; [`ScheduleRequest::validate`] is always run by the
/// calculator before any computation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRequest {
    /// First day of the course.
    pub course_start: Date,
    /// Last day of the course. No installment may fall after it.
    pub course_end: Date,
    /// Full course price.
    pub total_cost: Money,
    /// Number of monthly installments asked for.
    pub requested_installments: u32,
    /// Whether the course has already started at calculation time.
    pub course_started: bool,
}

impl ScheduleRequest {
    /// Checks the request invariants.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` if:
    /// - Total cost is negative
    /// - Requested installments is zero
    /// - Course end date is before the start date
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.total_cost.is_negative() {
            return Err(PlanError::invalid_input(format!(
                "total cost {} must not be negative",
                self.total_cost
            )));
        }
        if self.requested_installments < 1 {
            return Err(PlanError::invalid_input(
                "requested installments must be at least 1",
            ));
        }
        if self.course_end < self.course_start {
            return Err(PlanError::invalid_input(format!(
                "course end {} is before course start {}",
                self.course_end, self.course_start
            )));
        }
        Ok(())
    }
}

/// Builder for [`ScheduleRequest`].
///
/// # Examples
///
/// ```
/// use plan_models::schedules::ScheduleRequestBuilder;
/// use plan_core::types::{Date, Money};
///
/// let request = ScheduleRequestBuilder::new()
///     .course_start(Date::from_ymd(2024, 9, 1).unwrap())
///     .course_end(Date::from_ymd(2025, 6, 30).unwrap())
///     .total_cost(Money::from_major(3000))
///     .installments(6)
///     .build()
///     .unwrap();
///
/// assert!(!request.course_started);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequestBuilder {
    course_start: Option<Date>,
    course_end: Option<Date>,
    total_cost: Option<Money>,
    requested_installments: Option<u32>,
    course_started: bool,
}

impl ScheduleRequestBuilder {
    /// Creates an empty builder. The course is assumed not started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the course start date.
    pub fn course_start(mut self, date: Date) -> Self {
        self.course_start = Some(date);
        self
    }

    /// Sets the course end date.
    pub fn course_end(mut self, date: Date) -> Self {
        self.course_end = Some(date);
        self
    }

    /// Sets the total course cost.
    pub fn total_cost(mut self, cost: Money) -> Self {
        self.total_cost = Some(cost);
        self
    }

    /// Sets the requested number of installments.
    pub fn installments(mut self, count: u32) -> Self {
        self.requested_installments = Some(count);
        self
    }

    /// Marks whether the course has already started.
    pub fn started(mut self, started: bool) -> Self {
        self.course_started = started;
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::MissingField` for an unset date, cost or count,
    /// and `PlanError::InvalidInput` when [`ScheduleRequest::validate`]
    /// fails.
    pub fn build(self) -> Result<ScheduleRequest, PlanError> {
        let request = ScheduleRequest {
            course_start: self.course_start.ok_or(PlanError::MissingField {
                field: "course_start",
            })?,
            course_end: self
                .course_end
                .ok_or(PlanError::MissingField { field: "course_end" })?,
            total_cost: self
                .total_cost
                .ok_or(PlanError::MissingField { field: "total_cost" })?,
            requested_installments: self.requested_installments.ok_or(
                PlanError::MissingField {
                    field: "installments",
                },
            )?,
            course_started: self.course_started,
        };
        request.validate()?;
        Ok(request)
    }
}
