//! PaymentSchedule and PaymentPlanCalculator implementation.

use super::entry::{ChargeKind, PaymentEntry};
use super::error::PlanError;
use super::request::ScheduleRequest;
use super::window::InstallmentWindow;
use crate::policy::{AppliedFees, PlanPolicy};
use plan_core::types::{Date, Money};
use tracing::{debug, warn};

/// Decimal places installment amounts are rounded to.
const INSTALLMENT_DECIMAL_PLACES: u32 = 2;

/// Whether a schedule contains a usable installment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanStatus {
    /// At least one installment was emitted.
    Scheduled,
    /// No month was available before the course end. The schedule only
    /// holds the one-off charges.
    NoAvailableWindow,
}

/// An immutable payment schedule plus the figures it was derived from.
///
/// Entries are ordered: downpayment, late fee (if any), then installments
/// in ascending month order.
///
/// # Known quirks
///
/// Both are kept for compatibility with plans already issued:
/// - The installment amount is rounded and the residue is never pushed onto
///   the last installment. See [`PaymentSchedule::rounding_residue`].
/// - If emission stops early because a date would pass the course end, the
///   amount was still computed by dividing over the full effective count.
///   See [`PaymentSchedule::unscheduled_balance`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentSchedule {
    entries: Vec<PaymentEntry>,
    status: PlanStatus,
    fees: AppliedFees,
    remaining_balance: Money,
    window: InstallmentWindow,
    installment_amount: Option<Money>,
    rounding_residue: Money,
    unscheduled_balance: Money,
    installments_total: Money,
    total_payable: Money,
}

impl PaymentSchedule {
    /// Returns all entries in order.
    #[inline]
    pub fn entries(&self) -> &[PaymentEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &PaymentEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries, charges included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the schedule has no entries. Never true for a
    /// computed schedule, which always holds the downpayment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the plan status.
    #[inline]
    pub fn status(&self) -> PlanStatus {
        self.status
    }

    /// Returns true when at least one installment was scheduled.
    #[inline]
    pub fn has_plan(&self) -> bool {
        self.status == PlanStatus::Scheduled
    }

    /// Returns the fees applied to this plan.
    #[inline]
    pub fn fees(&self) -> AppliedFees {
        self.fees
    }

    /// `total cost - downpayment + finance fee + late fee`.
    #[inline]
    pub fn remaining_balance(&self) -> Money {
        self.remaining_balance
    }

    /// Returns the derived installment window.
    #[inline]
    pub fn window(&self) -> InstallmentWindow {
        self.window
    }

    /// Returns the effective installment count used as the divisor.
    #[inline]
    pub fn effective_count(&self) -> u32 {
        self.window.effective_count
    }

    /// Returns the per-installment amount, `None` when no window exists.
    #[inline]
    pub fn installment_amount(&self) -> Option<Money> {
        self.installment_amount
    }

    /// `remaining balance - amount * effective count`: what rounding the
    /// installment amount left unbilled (negative if over-billed).
    #[inline]
    pub fn rounding_residue(&self) -> Money {
        self.rounding_residue
    }

    /// `remaining balance - sum of emitted installments`. Equals the
    /// rounding residue unless emission halted early.
    #[inline]
    pub fn unscheduled_balance(&self) -> Money {
        self.unscheduled_balance
    }

    /// Returns an iterator over the dated installments.
    pub fn installments(&self) -> impl Iterator<Item = &PaymentEntry> {
        self.entries.iter().filter(|e| e.is_installment())
    }

    /// Returns the number of installments actually emitted.
    pub fn installment_count(&self) -> usize {
        self.installments().count()
    }

    /// Returns the installment due dates.
    pub fn payment_dates(&self) -> Vec<Date> {
        self.entries.iter().filter_map(|e| e.date()).collect()
    }

    /// Returns the first installment date, if any.
    pub fn first_payment_date(&self) -> Option<Date> {
        self.installments().next().and_then(|e| e.date())
    }

    /// Returns the last installment date, if any.
    pub fn last_payment_date(&self) -> Option<Date> {
        self.installments().last().and_then(|e| e.date())
    }

    /// Sum of the emitted installments.
    pub fn installments_total(&self) -> Money {
        self.installments_total
    }

    /// Sum of every entry: what the customer pays in total.
    pub fn total_payable(&self) -> Money {
        self.total_payable
    }
}

/// Computes payment schedules under a fixed [`PlanPolicy`].
///
/// The calculator holds no state besides the policy; `compute` is a pure
/// function of its arguments and may be called from any number of threads.
///
/// # Examples
///
/// ```
/// use plan_models::schedules::{PaymentPlanCalculator, ScheduleRequestBuilder};
/// use plan_models::policy::PlanPolicy;
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
/// let calculator = PaymentPlanCalculator::new(PlanPolicy::default()).unwrap();
/// let schedule = calculator
///     .compute(&request, Date::from_ymd(2024, 3, 18).unwrap())
///     .unwrap();
///
/// assert_eq!(schedule.remaining_balance(), Money::from_major(2950));
/// assert_eq!(schedule.installment_amount(), Some(Money::from_minor(49167)));
/// assert_eq!(schedule.installment_count(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaymentPlanCalculator {
    policy: PlanPolicy,
}

impl PaymentPlanCalculator {
    /// Creates a calculator after validating the policy.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidPolicy` if any fee is negative.
    pub fn new(policy: PlanPolicy) -> Result<Self, PlanError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Returns the policy in use.
    #[inline]
    pub fn policy(&self) -> &PlanPolicy {
        &self.policy
    }

    /// Computes the schedule for `request` as seen on `as_of`.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidInput` when the request is invalid; no
    /// partial schedule is produced. A request with no available months is
    /// not an error: the schedule reports [`PlanStatus::NoAvailableWindow`].
    pub fn compute(
        &self,
        request: &ScheduleRequest,
        as_of: Date,
    ) -> Result<PaymentSchedule, PlanError> {
        request.validate()?;

        let fees = self.policy.fees.applied(request.course_started);
        let window = InstallmentWindow::derive(request, as_of, self.policy.anchor)?;
        let remaining_balance = request
            .total_cost
            .checked_sub(fees.downpayment)?
            .checked_add(fees.surcharges()?)?;

        if remaining_balance.is_negative() {
            warn!(
                total_cost = %request.total_cost,
                downpayment = %fees.downpayment,
                remaining = %remaining_balance,
                "course cost is below the downpayment; installments will be negative"
            );
        }

        let mut entries = vec![PaymentEntry::charge(ChargeKind::Downpayment, fees.downpayment)];
        if request.course_started {
            entries.push(PaymentEntry::charge(ChargeKind::LateFee, fees.late_fee));
        }

        if !window.has_months() {
            debug!(
                available_months = window.available_months,
                course_end = %request.course_end,
                "no installment window before course end"
            );
            let total_payable = Money::checked_sum(entries.iter().map(|e| e.amount()))?;
            return Ok(PaymentSchedule {
                entries,
                status: PlanStatus::NoAvailableWindow,
                fees,
                remaining_balance,
                window,
                installment_amount: None,
                rounding_residue: Money::ZERO,
                unscheduled_balance: remaining_balance,
                installments_total: Money::ZERO,
                total_payable,
            });
        }

        let amount = installment_amount(remaining_balance, window.effective_count)?;
        let installments = emit_installments(
            window.first_payment_date,
            window.effective_count,
            amount,
            request.course_end,
        )?;
        if installments.len() < window.effective_count as usize {
            warn!(
                emitted = installments.len(),
                effective_count = window.effective_count,
                "installment emission halted at course end"
            );
        }

        let emitted_total = Money::checked_sum(installments.iter().map(|e| e.amount()))?;
        let rounding_residue =
            remaining_balance.checked_sub(amount.checked_times(window.effective_count)?)?;
        let unscheduled_balance = remaining_balance.checked_sub(emitted_total)?;
        let status = if installments.is_empty() {
            PlanStatus::NoAvailableWindow
        } else {
            PlanStatus::Scheduled
        };
        entries.extend(installments);
        let total_payable = Money::checked_sum(entries.iter().map(|e| e.amount()))?;

        debug!(
            remaining = %remaining_balance,
            amount = %amount,
            residue = %rounding_residue,
            entries = entries.len(),
            "computed payment schedule"
        );

        Ok(PaymentSchedule {
            entries,
            status,
            fees,
            remaining_balance,
            window,
            installment_amount: Some(amount),
            rounding_residue,
            unscheduled_balance,
            installments_total: emitted_total,
            total_payable,
        })
    }
}

/// Computes a schedule with a one-off calculator.
///
/// Shorthand for `PaymentPlanCalculator::new(policy.clone())?.compute(request, as_of)`.
pub fn compute_schedule(
    request: &ScheduleRequest,
    as_of: Date,
    policy: &PlanPolicy,
) -> Result<PaymentSchedule, PlanError> {
    PaymentPlanCalculator::new(policy.clone())?.compute(request, as_of)
}

/// A single installment carries the whole balance unrounded; otherwise the
/// balance is split and rounded half-up to two places.
fn installment_amount(remaining: Money, count: u32) -> Result<Money, PlanError> {
    if count == 1 {
        return Ok(remaining);
    }
    Ok(remaining
        .checked_div(count)?
        .round_half_up(INSTALLMENT_DECIMAL_PLACES))
}

/// Emits up to `count` monthly installments starting at `first`, stopping at
/// the first date past `course_end`.
fn emit_installments(
    first: Date,
    count: u32,
    amount: Money,
    course_end: Date,
) -> Result<Vec<PaymentEntry>, PlanError> {
    let mut installments = Vec::with_capacity(count as usize);
    for i in 0..count {
        let date = first.checked_add_months(i)?;
        if date > course_end {
            break;
        }
        installments.push(PaymentEntry::installment(i + 1, date, amount));
    }
    Ok(installments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FeePolicyVersion, FeeTable, FirstPaymentAnchor};
    use crate::schedules::ScheduleRequestBuilder;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn m(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn as_of() -> Date {
        d(2024, 3, 18)
    }

    fn request(cost: i64, installments: u32, started: bool, end: Date) -> ScheduleRequest {
        ScheduleRequestBuilder::new()
            .course_start(d(2024, 1, 8))
            .course_end(end)
            .total_cost(Money::from_major(cost))
            .installments(installments)
            .started(started)
            .build()
            .unwrap()
    }

    fn calculator() -> PaymentPlanCalculator {
        PaymentPlanCalculator::new(PlanPolicy::default()).unwrap()
    }

    #[test]
    fn test_not_started_six_installments() {
        let schedule = calculator()
            .compute(&request(3000, 6, false, d(2024, 12, 31)), as_of())
            .unwrap();

        assert_eq!(schedule.status(), PlanStatus::Scheduled);
        assert_eq!(schedule.fees().downpayment, Money::from_major(199));
        assert_eq!(schedule.fees().finance_fee, Money::from_major(149));
        assert_eq!(schedule.fees().late_fee, Money::ZERO);
        assert_eq!(schedule.remaining_balance(), Money::from_major(2950));
        assert_eq!(schedule.installment_amount(), Some(m("491.67")));

        assert_eq!(schedule.len(), 7);
        assert_eq!(
            schedule.entries()[0],
            PaymentEntry::charge(ChargeKind::Downpayment, Money::from_major(199))
        );
        assert_eq!(
            schedule.payment_dates(),
            vec![
                d(2024, 4, 1),
                d(2024, 5, 1),
                d(2024, 6, 1),
                d(2024, 7, 1),
                d(2024, 8, 1),
                d(2024, 9, 1)
            ]
        );
        assert_eq!(schedule.rounding_residue(), m("-0.02"));
        assert_eq!(schedule.unscheduled_balance(), m("-0.02"));
    }

    #[test]
    fn test_started_applies_late_fee_standard() {
        let schedule = calculator()
            .compute(&request(1000, 3, true, d(2024, 12, 31)), as_of())
            .unwrap();

        assert_eq!(schedule.fees().downpayment, Money::from_major(499));
        assert_eq!(schedule.fees().late_fee, Money::from_major(49));
        // 1000 - 499 + 149 + 49
        assert_eq!(schedule.remaining_balance(), Money::from_major(699));
        assert_eq!(schedule.installment_amount(), Some(Money::from_major(233)));
        assert_eq!(
            schedule.entries()[1],
            PaymentEntry::charge(ChargeKind::LateFee, Money::from_major(49))
        );
        assert_eq!(schedule.installment_count(), 3);
        assert_eq!(schedule.rounding_residue(), Money::ZERO);
    }

    #[test]
    fn test_started_applies_late_fee_revised() {
        let policy = PlanPolicy::new(FeePolicyVersion::Revised, FirstPaymentAnchor::NextMonth);
        let schedule = compute_schedule(&request(1000, 3, true, d(2024, 12, 31)), as_of(), &policy)
            .unwrap();

        assert_eq!(schedule.fees().late_fee, Money::from_major(149));
        assert_eq!(schedule.remaining_balance(), Money::from_major(799));
        assert_eq!(schedule.installment_amount(), Some(m("266.33")));
        assert_eq!(schedule.rounding_residue(), m("0.01"));
    }

    #[test]
    fn test_clamped_to_available_months() {
        // April and May remain.
        let schedule = calculator()
            .compute(&request(3000, 5, false, d(2024, 5, 20)), as_of())
            .unwrap();

        assert_eq!(schedule.effective_count(), 2);
        assert_eq!(schedule.installment_count(), 2);
        assert_eq!(schedule.installment_amount(), Some(Money::from_major(1475)));
        assert_eq!(schedule.last_payment_date(), Some(d(2024, 5, 1)));
    }

    #[test]
    fn test_single_installment_is_not_rounded() {
        let req = ScheduleRequestBuilder::new()
            .course_start(d(2024, 1, 8))
            .course_end(d(2024, 12, 31))
            .total_cost(m("1000.555"))
            .installments(1)
            .build()
            .unwrap();
        let schedule = calculator().compute(&req, as_of()).unwrap();

        assert_eq!(schedule.installment_amount(), Some(m("950.555")));
        assert_eq!(schedule.installments_total(), m("950.555"));
        assert_eq!(schedule.rounding_residue(), Money::ZERO);
    }

    #[test]
    fn test_no_available_window() {
        let schedule = calculator()
            .compute(&request(3000, 4, true, d(2024, 3, 28)), as_of())
            .unwrap();

        assert_eq!(schedule.status(), PlanStatus::NoAvailableWindow);
        assert!(!schedule.has_plan());
        assert_eq!(schedule.installment_count(), 0);
        assert_eq!(schedule.installment_amount(), None);
        // Downpayment and late fee are still listed.
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.unscheduled_balance(), schedule.remaining_balance());
        assert_eq!(schedule.first_payment_date(), None);
    }

    #[test]
    fn test_never_more_than_twelve() {
        let schedule = calculator()
            .compute(&request(12000, 36, false, d(2027, 1, 31)), as_of())
            .unwrap();

        assert_eq!(schedule.effective_count(), 12);
        assert_eq!(schedule.installment_count(), 12);
        assert_eq!(schedule.first_payment_date(), Some(d(2026, 1, 1)));
        assert_eq!(schedule.last_payment_date(), Some(d(2026, 12, 1)));
    }

    #[test]
    fn test_invalid_input_is_rejected_before_computation() {
        let req = ScheduleRequest {
            course_start: d(2024, 6, 1),
            course_end: d(2024, 5, 1),
            total_cost: Money::from_major(100),
            requested_installments: 2,
            course_started: false,
        };
        assert!(matches!(
            calculator().compute(&req, as_of()),
            Err(PlanError::InvalidInput { .. })
        ));

        let req = ScheduleRequest {
            requested_installments: 0,
            course_end: d(2024, 8, 1),
            ..req
        };
        assert!(matches!(
            calculator().compute(&req, as_of()),
            Err(PlanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_fee_policy_rejected() {
        let policy = PlanPolicy {
            fees: FeeTable {
                late_fee: Money::from_major(-49),
                ..FeeTable::default()
            },
            anchor: FirstPaymentAnchor::NextMonth,
        };
        assert!(matches!(
            PaymentPlanCalculator::new(policy),
            Err(PlanError::InvalidPolicy { .. })
        ));
    }

    fn huge_request(cost: &str, started: bool) -> ScheduleRequest {
        ScheduleRequestBuilder::new()
            .course_start(d(2024, 4, 1))
            .course_end(d(2024, 12, 31))
            .total_cost(m(cost))
            .installments(6)
            .started(started)
            .build()
            .unwrap()
    }

    #[test]
    fn test_balance_overflow_is_arithmetic_error() {
        let policy = PlanPolicy {
            fees: FeeTable {
                downpayment_before_start: Money::ZERO,
                ..FeeTable::default()
            },
            anchor: FirstPaymentAnchor::NextMonth,
        };
        let calculator = PaymentPlanCalculator::new(policy).unwrap();

        let result = calculator.compute(
            &huge_request("79228162514264337593543950335", false),
            as_of(),
        );
        assert!(matches!(result, Err(PlanError::Arithmetic(_))));
    }

    #[test]
    fn test_total_payable_overflow_is_arithmetic_error() {
        // The balance fits, but downpayment plus installments does not.
        let result = calculator().compute(
            &huge_request("79228162514264337593543950235", true),
            as_of(),
        );
        assert!(matches!(result, Err(PlanError::Arithmetic(_))));
    }

    #[test]
    fn test_cost_below_downpayment_gives_negative_installments() {
        let schedule = calculator()
            .compute(&request(0, 2, false, d(2024, 12, 31)), as_of())
            .unwrap();
        assert_eq!(schedule.remaining_balance(), Money::from_major(-50));
        assert_eq!(schedule.installment_amount(), Some(Money::from_major(-25)));
    }

    #[test]
    fn test_total_payable() {
        let schedule = calculator()
            .compute(&request(1000, 3, true, d(2024, 12, 31)), as_of())
            .unwrap();
        // 499 + 49 + 3 * 233
        assert_eq!(schedule.total_payable(), Money::from_major(1247));
    }

    #[test]
    fn test_emit_installments_halts_at_course_end() {
        let installments =
            emit_installments(d(2024, 4, 1), 5, Money::from_major(100), d(2024, 6, 15)).unwrap();
        assert_eq!(installments.len(), 3);
        assert_eq!(installments[2].date(), Some(d(2024, 6, 1)));
    }

    #[test]
    fn test_emit_installments_includes_end_date() {
        let installments =
            emit_installments(d(2024, 4, 1), 3, Money::from_major(100), d(2024, 6, 1)).unwrap();
        assert_eq!(installments.len(), 3);
    }

    #[test]
    fn test_installment_numbers_are_one_based() {
        let installments =
            emit_installments(d(2024, 4, 1), 2, Money::from_major(1), d(2025, 1, 1)).unwrap();
        assert!(matches!(installments[0], PaymentEntry::Installment { number: 1, .. }));
        assert!(matches!(installments[1], PaymentEntry::Installment { number: 2, .. }));
    }

    #[test]
    fn test_installment_amount_rounding() {
        assert_eq!(
            installment_amount(Money::from_major(2950), 6).unwrap(),
            m("491.67")
        );
        assert_eq!(installment_amount(m("0.05"), 2).unwrap(), m("0.03"));
        assert_eq!(installment_amount(m("10.005"), 1).unwrap(), m("10.005"));
    }

    #[test]
    fn test_schedule_clone_eq() {
        let schedule = calculator()
            .compute(&request(3000, 6, false, d(2025, 6, 30)), as_of())
            .unwrap();
        assert_eq!(schedule.clone(), schedule);
    }
}
