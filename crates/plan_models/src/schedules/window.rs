//! First payment date and installment count derivation.

use plan_core::types::Date;
use tracing::debug;

use super::error::PlanError;
use super::request::ScheduleRequest;
use crate::policy::{FirstPaymentAnchor, MAX_INSTALLMENTS};

/// The months a plan can place installments in.
///
/// `available_months` uses the inclusive count: the first payment month and
/// the course end month both count. It may be zero or negative when the
/// first payment date is already past the course end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstallmentWindow {
    /// Date of the first installment (always the 1st of a month).
    pub first_payment_date: Date,
    /// Whole calendar months from the first payment month to the course
    /// end month, inclusive.
    pub available_months: i32,
    /// `min(requested, available_months, 12)`, or zero when no month is
    /// available.
    pub effective_count: u32,
}

impl InstallmentWindow {
    /// Derives the window for a request.
    ///
    /// 1. Resolve the anchored first payment date.
    /// 2. If it falls more than 12 months before the course end, move it to
    ///    the 1st of the month exactly 12 months before the end.
    /// 3. Count the available months and clamp the requested count.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_models::policy::FirstPaymentAnchor;
    /// use plan_models::schedules::{InstallmentWindow, ScheduleRequestBuilder};
    /// use plan_core::types::{Date, Money};
    ///
    /// let request = ScheduleRequestBuilder::new()
    ///     .course_start(Date::from_ymd(2024, 4, 1).unwrap())
    ///     .course_end(Date::from_ymd(2024, 5, 31).unwrap())
    ///     .total_cost(Money::from_major(1000))
    ///     .installments(5)
    ///     .build()
    ///     .unwrap();
    ///
    /// let as_of = Date::from_ymd(2024, 3, 18).unwrap();
    /// let window = InstallmentWindow::derive(&request, as_of, FirstPaymentAnchor::NextMonth).unwrap();
    /// assert_eq!(window.first_payment_date, Date::from_ymd(2024, 4, 1).unwrap());
    /// assert_eq!(window.available_months, 2);
    /// assert_eq!(window.effective_count, 2);
    /// ```
    pub fn derive(
        request: &ScheduleRequest,
        as_of: Date,
        anchor: FirstPaymentAnchor,
    ) -> Result<Self, PlanError> {
        let anchored = anchor.resolve(as_of, request.course_start)?;
        let end = request.course_end;

        let first_payment_date = if anchored.months_until(end) > MAX_INSTALLMENTS as i32 {
            let capped = end.first_of_month().checked_sub_months(MAX_INSTALLMENTS)?;
            debug!(
                anchored = %anchored,
                capped = %capped,
                "first payment more than {} months before course end, advancing",
                MAX_INSTALLMENTS
            );
            capped
        } else {
            anchored
        };

        let available_months = first_payment_date.months_until(end) + 1;
        let effective_count = if available_months <= 0 {
            0
        } else {
            request
                .requested_installments
                .min(available_months as u32)
                .min(MAX_INSTALLMENTS)
        };

        debug!(
            first_payment = %first_payment_date,
            available_months,
            requested = request.requested_installments,
            effective_count,
            "derived installment window"
        );

        Ok(Self {
            first_payment_date,
            available_months,
            effective_count,
        })
    }

    /// Returns true when at least one installment can be scheduled.
    #[inline]
    pub fn has_months(&self) -> bool {
        self.effective_count > 0
    }
}
