//! Fee table and its named versions.

use plan_core::types::{Money, MoneyError};
use std::fmt;
use std::str::FromStr;

use crate::schedules::PlanError;

/// Named revisions of the fee table.
///
/// The two revisions differ only in the late fee charged when the course
/// has already started.
///
/// # Examples
///
/// ```
/// use plan_models::policy::{FeePolicyVersion, FeeTable};
/// use plan_core::types::Money;
///
/// let table = FeeTable::for_version(FeePolicyVersion::Revised);
/// assert_eq!(table.late_fee, Money::from_major(149));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FeePolicyVersion {
    /// Late fee of 49.
    #[default]
    Standard,
    /// Late fee of 149.
    Revised,
}

impl FeePolicyVersion {
    /// Returns the configuration name of this version.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            FeePolicyVersion::Standard => "standard",
            FeePolicyVersion::Revised => "revised",
        }
    }
}

impl fmt::Display for FeePolicyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeePolicyVersion {
    type Err = String;

    /// Parses a version name (case-insensitive).
    ///
    /// Accepts "standard" / "v1" and "revised" / "v2".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "v1" => Ok(FeePolicyVersion::Standard),
            "revised" | "v2" => Ok(FeePolicyVersion::Revised),
            _ => Err(format!("Unknown fee policy version: {}", s)),
        }
    }
}

/// Fee amounts applied to every plan.
///
/// The table is evaluated once per plan through [`FeeTable::applied`]. There
/// is no proration: a course that started yesterday pays the same late fee
/// as one that started months ago.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTable {
    /// Downpayment when the course has not started yet.
    pub downpayment_before_start: Money,
    /// Downpayment when the course has already started.
    pub downpayment_after_start: Money,
    /// Flat surcharge added to the financed balance.
    pub finance_fee: Money,
    /// Surcharge added when the course has already started.
    pub late_fee: Money,
}

/// Fees resolved for a single plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedFees {
    /// Downpayment due immediately.
    pub downpayment: Money,
    /// Finance fee added to the financed balance.
    pub finance_fee: Money,
    /// Late fee, zero when the course has not started.
    pub late_fee: Money,
}

impl FeeTable {
    /// Returns the table for a named version.
    pub fn for_version(version: FeePolicyVersion) -> Self {
        let late_fee = match version {
            FeePolicyVersion::Standard => Money::from_major(49),
            FeePolicyVersion::Revised => Money::from_major(149),
        };
        Self {
            downpayment_before_start: Money::from_major(199),
            downpayment_after_start: Money::from_major(499),
            finance_fee: Money::from_major(149),
            late_fee,
        }
    }

    /// Resolves the fees for a plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_models::policy::FeeTable;
    /// use plan_core::types::Money;
    ///
    /// let fees = FeeTable::default().applied(false);
    /// assert_eq!(fees.downpayment, Money::from_major(199));
    /// assert_eq!(fees.late_fee, Money::ZERO);
    /// ```
    pub fn applied(&self, course_started: bool) -> AppliedFees {
        if course_started {
            AppliedFees {
                downpayment: self.downpayment_after_start,
                finance_fee: self.finance_fee,
                late_fee: self.late_fee,
            }
        } else {
            AppliedFees {
                downpayment: self.downpayment_before_start,
                finance_fee: self.finance_fee,
                late_fee: Money::ZERO,
            }
        }
    }

    /// Checks that no fee is negative.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidPolicy` naming every negative entry.
    pub fn validate(&self) -> Result<(), PlanError> {
        let negative: Vec<&str> = [
            ("downpayment_before_start", self.downpayment_before_start),
            ("downpayment_after_start", self.downpayment_after_start),
            ("finance_fee", self.finance_fee),
            ("late_fee", self.late_fee),
        ]
        .into_iter()
        .filter(|(_, amount)| amount.is_negative())
        .map(|(name, _)| name)
        .collect();

        if negative.is_empty() {
            Ok(())
        } else {
            Err(PlanError::InvalidPolicy {
                reason: format!("negative fee(s): {}", negative.join(", ")),
            })
        }
    }
}

impl Default for FeeTable {
    fn default() -> Self {
        Self::for_version(FeePolicyVersion::default())
    }
}

impl AppliedFees {
    /// Amount added to the financed balance on top of the course price.
    pub fn surcharges(&self) -> Result<Money, MoneyError> {
        self.finance_fee.checked_add(self.late_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = FeeTable::for_version(FeePolicyVersion::Standard);
        assert_eq!(table.downpayment_before_start, Money::from_major(199));
        assert_eq!(table.downpayment_after_start, Money::from_major(499));
        assert_eq!(table.finance_fee, Money::from_major(149));
        assert_eq!(table.late_fee, Money::from_major(49));
    }

    #[test]
    fn test_versions_differ_only_in_late_fee() {
        let standard = FeeTable::for_version(FeePolicyVersion::Standard);
        let revised = FeeTable::for_version(FeePolicyVersion::Revised);
        assert_eq!(revised.late_fee, Money::from_major(149));
        assert_eq!(
            FeeTable {
                late_fee: revised.late_fee,
                ..standard
            },
            revised
        );
    }

    #[test]
    fn test_applied_not_started() {
        let fees = FeeTable::for_version(FeePolicyVersion::Revised).applied(false);
        assert_eq!(fees.downpayment, Money::from_major(199));
        assert_eq!(fees.finance_fee, Money::from_major(149));
        assert_eq!(fees.late_fee, Money::ZERO);
        assert_eq!(fees.surcharges().unwrap(), Money::from_major(149));
    }

    #[test]
    fn test_applied_started() {
        let fees = FeeTable::default().applied(true);
        assert_eq!(fees.downpayment, Money::from_major(499));
        assert_eq!(fees.late_fee, Money::from_major(49));
        assert_eq!(fees.surcharges().unwrap(), Money::from_major(198));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let table = FeeTable {
            finance_fee: Money::from_major(-1),
            late_fee: Money::from_major(-2),
            ..FeeTable::default()
        };
        match table.validate() {
            Err(PlanError::InvalidPolicy { reason }) => {
                assert!(reason.contains("finance_fee"));
                assert!(reason.contains("late_fee"));
                assert!(!reason.contains("downpayment"));
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_zero_fees() {
        let table = FeeTable {
            downpayment_before_start: Money::ZERO,
            downpayment_after_start: Money::ZERO,
            finance_fee: Money::ZERO,
            late_fee: Money::ZERO,
        };
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!(
            "Standard".parse::<FeePolicyVersion>().unwrap(),
            FeePolicyVersion::Standard
        );
        assert_eq!(
            "v2".parse::<FeePolicyVersion>().unwrap(),
            FeePolicyVersion::Revised
        );
        assert!("legacy".parse::<FeePolicyVersion>().is_err());
    }

    #[test]
    fn test_version_display() {
        assert_eq!(FeePolicyVersion::Revised.to_string(), "revised");
    }
}
