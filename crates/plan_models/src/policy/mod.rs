//! Plan policy: fees and first-payment anchoring.
//!
//! This module provides:
//! - [`FeeTable`]: Downpayment, finance fee and late fee amounts
//! - [`FeePolicyVersion`]: Named fee table revisions
//! - [`FirstPaymentAnchor`]: Where the first installment falls
//! - [`PlanPolicy`]: The combination handed to the calculator

mod anchor;
mod fee_table;

pub use anchor::FirstPaymentAnchor;
pub use fee_table::{AppliedFees, FeePolicyVersion, FeeTable};

use crate::schedules::PlanError;

/// Hard ceiling on the number of monthly installments in any plan.
pub const MAX_INSTALLMENTS: u32 = 12;

/// Everything about a plan that is not part of the individual request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanPolicy {
    /// Fee amounts.
    pub fees: FeeTable,
    /// First payment anchoring rule.
    pub anchor: FirstPaymentAnchor,
}

impl PlanPolicy {
    /// Builds a policy from a named fee version and an anchor.
    pub fn new(version: FeePolicyVersion, anchor: FirstPaymentAnchor) -> Self {
        Self {
            fees: FeeTable::for_version(version),
            anchor,
        }
    }

    /// Validates the fee table.
    pub fn validate(&self) -> Result<(), PlanError> {
        self.fees.validate()
    }
}
