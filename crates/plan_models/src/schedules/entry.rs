//! Payment entries emitted into a schedule.

use plan_core::types::{Date, Money};
use std::fmt;

/// Kind of an undated one-off charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChargeKind {
    /// Upfront payment due immediately.
    Downpayment,
    /// Surcharge for signing up after the course started.
    LateFee,
}

impl ChargeKind {
    /// Returns the label shown to the customer.
    ///
    /// ```
    /// use plan_models::schedules::ChargeKind;
    ///
    /// assert_eq!(ChargeKind::Downpayment.label(), "Immediate Downpayment");
    /// ```
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            ChargeKind::Downpayment => "Immediate Downpayment",
            ChargeKind::LateFee => "Late Fee",
        }
    }
}

impl fmt::Display for ChargeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single line of a payment schedule.
///
/// # Examples
///
/// ```
/// use plan_models::schedules::{ChargeKind, PaymentEntry};
/// use plan_core::types::{Date, Money};
///
/// let down = PaymentEntry::charge(ChargeKind::Downpayment, Money::from_major(199));
/// assert_eq!(down.date(), None);
/// assert_eq!(down.label(), "Immediate Downpayment");
///
/// let first = PaymentEntry::installment(1, Date::from_ymd(2024, 4, 1).unwrap(), Money::from_minor(49167));
/// assert_eq!(first.label(), "2024-04-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum PaymentEntry {
    /// Undated one-off charge.
    Charge {
        /// What the charge is for.
        kind: ChargeKind,
        /// Amount due.
        amount: Money,
    },
    /// Dated monthly installment.
    Installment {
        /// 1-based position among the installments.
        number: u32,
        /// Due date.
        date: Date,
        /// Amount due.
        amount: Money,
    },
}

impl PaymentEntry {
    /// Creates an undated charge.
    #[inline]
    pub fn charge(kind: ChargeKind, amount: Money) -> Self {
        PaymentEntry::Charge { kind, amount }
    }

    /// Creates a dated installment.
    #[inline]
    pub fn installment(number: u32, date: Date, amount: Money) -> Self {
        PaymentEntry::Installment {
            number,
            date,
            amount,
        }
    }

    /// Returns the amount due.
    #[inline]
    pub fn amount(&self) -> Money {
        match self {
            PaymentEntry::Charge { amount, .. } | PaymentEntry::Installment { amount, .. } => {
                *amount
            }
        }
    }

    /// Returns the due date, `None` for one-off charges.
    #[inline]
    pub fn date(&self) -> Option<Date> {
        match self {
            PaymentEntry::Charge { .. } => None,
            PaymentEntry::Installment { date, .. } => Some(*date),
        }
    }

    /// Returns true for dated installments.
    #[inline]
    pub fn is_installment(&self) -> bool {
        matches!(self, PaymentEntry::Installment { .. })
    }

    /// Returns the row label: the charge name or the ISO due date.
    pub fn label(&self) -> String {
        match self {
            PaymentEntry::Charge { kind, .. } => kind.label().to_string(),
            PaymentEntry::Installment { date, .. } => date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_accessors() {
        let entry = PaymentEntry::charge(ChargeKind::LateFee, Money::from_major(49));
        assert_eq!(entry.amount(), Money::from_major(49));
        assert_eq!(entry.date(), None);
        assert!(!entry.is_installment());
        assert_eq!(entry.label(), "Late Fee");
    }

    #[test]
    fn test_installment_accessors() {
        let date = Date::from_ymd(2025, 2, 1).unwrap();
        let entry = PaymentEntry::installment(3, date, Money::from_minor(12345));
        assert_eq!(entry.amount(), Money::from_minor(12345));
        assert_eq!(entry.date(), Some(date));
        assert!(entry.is_installment());
        assert_eq!(entry.label(), "2025-02-01");
    }

    #[test]
    fn test_charge_kind_display() {
        assert_eq!(ChargeKind::Downpayment.to_string(), "Immediate Downpayment");
        assert_eq!(format!("{}", ChargeKind::LateFee), "Late Fee");
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_entry_json_shape() {
            let date = Date::from_ymd(2025, 2, 1).unwrap();
            let json = serde_json::to_value(PaymentEntry::installment(1, date, Money::from_major(10)))
                .unwrap();
            assert_eq!(json["type"], "installment");
            assert_eq!(json["date"], "2025-02-01");
            assert_eq!(json["number"], 1);

            let json = serde_json::to_value(PaymentEntry::charge(
                ChargeKind::Downpayment,
                Money::from_major(199),
            ))
            .unwrap();
            assert_eq!(json["type"], "charge");
            assert_eq!(json["kind"], "downpayment");
        }
    }
}
