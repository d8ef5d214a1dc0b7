//! Calendar, money and error types.
//!
//! This module provides:
//! - `time`: `Date` with month anchoring and whole-month arithmetic
//! - `money`: exact `Money` amounts and fixed-symbol `CurrencyFormat`
//! - `error`: `DateError` and `MoneyError`
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`Money`], [`CurrencyFormat`] from `money`
//! - [`DateError`], [`MoneyError`] from `error`

pub mod error;
pub mod money;
pub mod time;

pub use error::{DateError, MoneyError};
pub use money::{CurrencyFormat, Money};
pub use time::Date;
