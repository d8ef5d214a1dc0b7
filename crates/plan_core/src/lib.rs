//! # plan_core: Foundation types for installment planning
//!
//! ## Layer 1 (Foundation) Role
//!
//! plan_core is the bottom layer of the workspace, providing:
//! - Calendar dates with month arithmetic: `Date` (`types::time`)
//! - Exact monetary amounts: `Money`, `CurrencyFormat` (`types::money`)
//! - Error types: `DateError`, `MoneyError` (`types::error`)
//!
//! It has no dependencies on other workspace crates and only three runtime
//! dependencies:
//! - chrono: Calendar arithmetic
//! - rust_decimal: Exact decimal amounts
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use plan_core::types::{CurrencyFormat, Date, Money};
//!
//! let as_of = Date::from_ymd(2024, 3, 18).unwrap();
//! let first_payment = as_of.first_of_next_month().unwrap();
//! assert_eq!(first_payment.to_string(), "2024-04-01");
//!
//! let fee = Money::from_major(149);
//! assert_eq!(CurrencyFormat::default().format(fee), "£149.00");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`, `Money` and `CurrencyFormat`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
