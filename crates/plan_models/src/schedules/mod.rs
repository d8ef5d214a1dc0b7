//! Installment schedule generation for course purchases.
//!
//! This module provides:
//! - [`ScheduleRequest`]: Course dates, cost, requested installments
//! - [`InstallmentWindow`]: First payment date and clamped installment count
//! - [`PaymentEntry`]: A one-off charge or a dated monthly installment
//! - [`PaymentSchedule`]: The ordered entries plus reconciliation figures
//! - [`PaymentPlanCalculator`]: Turns requests into schedules under a policy
//!
//! # Examples
//!
//! ```
//! use plan_models::schedules::{compute_schedule, PlanStatus, ScheduleRequestBuilder};
//! use plan_models::policy::PlanPolicy;
//! use plan_core::types::{Date, Money};
//!
//! let request = ScheduleRequestBuilder::new()
//!     .course_start(Date::from_ymd(2024, 1, 8).unwrap())
//!     .course_end(Date::from_ymd(2024, 12, 31).unwrap())
//!     .total_cost(Money::from_major(1000))
//!     .installments(3)
//!     .started(true)
//!     .build()
//!     .unwrap();
//!
//! let schedule = compute_schedule(
//!     &request,
//!     Date::from_ymd(2024, 3, 18).unwrap(),
//!     &PlanPolicy::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(schedule.status(), PlanStatus::Scheduled);
//! // Downpayment, late fee, three installments
//! assert_eq!(schedule.len(), 5);
//! ```

mod entry;
mod error;
mod request;
mod schedule;
mod window;

pub use entry::{ChargeKind, PaymentEntry};
pub use error::PlanError;
pub use request::{ScheduleRequest, ScheduleRequestBuilder};
pub use schedule::{compute_schedule, PaymentPlanCalculator, PaymentSchedule, PlanStatus};
pub use window::InstallmentWindow;
