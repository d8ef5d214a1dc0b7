//! # plan_models: Course installment plan calculation
//!
//! ## Layer 2 (Models) Role
//!
//! plan_models builds on `plan_core` and provides:
//! - Fee policy tables and first-payment anchoring (`policy`)
//! - Request validation, window derivation and schedule emission (`schedules`)
//!
//! Computation is synchronous and side-effect free apart from `tracing`
//! events. "Today" is always an argument, never read from the clock.
//!
//! ## Usage Examples
//!
//! ```rust
//! use plan_models::policy::{FeePolicyVersion, FirstPaymentAnchor, PlanPolicy};
//! use plan_models::schedules::{PaymentPlanCalculator, ScheduleRequestBuilder};
//! use plan_core::types::{Date, Money};
//!
//! let policy = PlanPolicy::new(FeePolicyVersion::Revised, FirstPaymentAnchor::NextMonth);
//! let calculator = PaymentPlanCalculator::new(policy).unwrap();
//!
//! let request = ScheduleRequestBuilder::new()
//!     .course_start(Date::from_ymd(2024, 4, 1).unwrap())
//!     .course_end(Date::from_ymd(2024, 9, 30).unwrap())
//!     .total_cost(Money::from_major(3000))
//!     .installments(6)
//!     .build()
//!     .unwrap();
//!
//! let schedule = calculator.compute(&request, Date::from_ymd(2024, 3, 18).unwrap()).unwrap();
//! assert_eq!(schedule.installment_count(), 6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for requests, policies and schedules

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod policy;
pub mod schedules;
