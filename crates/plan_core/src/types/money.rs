//! Monetary amounts and fixed-symbol currency formatting.
//!
//! `Money` wraps `rust_decimal::Decimal` so that fee arithmetic is exact and
//! the only rounding that ever happens is the explicit
//! [`Money::round_half_up`] call made by the installment calculator.
//!
//! Plans are single-currency. The currency only appears at the presentation
//! boundary, through [`CurrencyFormat`].
//!
//! # Examples
//!
//! ```
//! use plan_core::types::money::{CurrencyFormat, Money};
//!
//! let balance = Money::from_major(2950);
//! let monthly = balance.checked_div(6).unwrap().round_half_up(2);
//! assert_eq!(monthly, Money::parse("491.67").unwrap());
//!
//! let gbp = CurrencyFormat::default();
//! assert_eq!(gbp.format(monthly), "£491.67");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

use super::error::MoneyError;

/// Number of decimal places used when presenting amounts.
pub const PRESENTATION_DECIMAL_PLACES: u32 = 2;

/// An exact monetary amount in the plan's single currency.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates an amount from whole currency units.
    ///
    /// ```
    /// use plan_core::types::money::Money;
    ///
    /// assert_eq!(Money::from_major(199).to_string(), "199.00");
    /// ```
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Creates an amount from minor units (pence, cents).
    ///
    /// ```
    /// use plan_core::types::money::Money;
    ///
    /// assert_eq!(Money::from_minor(49167), Money::parse("491.67").unwrap());
    /// ```
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, PRESENTATION_DECIMAL_PLACES))
    }

    /// Parses a plain decimal string such as `"1234.5"`.
    ///
    /// A leading currency symbol and thousands separators are not accepted;
    /// those belong to the presentation layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_core::types::money::Money;
    ///
    /// assert_eq!(Money::parse("3000").unwrap(), Money::from_major(3000));
    /// assert!(Money::parse("£3000").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, MoneyError> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| MoneyError::ParseError(format!("'{}': {}", s, e)))
    }

    /// Returns the underlying decimal.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Money {
        Money(self.0.abs())
    }

    /// Rounds to `dp` decimal places, ties away from zero (half-up for
    /// positive amounts).
    ///
    /// ```
    /// use plan_core::types::money::Money;
    ///
    /// assert_eq!(Money::parse("0.125").unwrap().round_half_up(2), Money::parse("0.13").unwrap());
    /// assert_eq!(Money::parse("0.135").unwrap().round_half_up(2), Money::parse("0.14").unwrap());
    /// ```
    pub fn round_half_up(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Divides the amount into `parts` equal shares without rounding.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` when `parts` is zero or the division
    /// overflows.
    pub fn checked_div(&self, parts: u32) -> Result<Money, MoneyError> {
        self.0
            .checked_div(Decimal::from(parts))
            .map(Money)
            .ok_or(MoneyError::Overflow {
                operation: "division",
            })
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` when the sum leaves the decimal range.
    pub fn checked_add(&self, rhs: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .ok_or(MoneyError::Overflow {
                operation: "addition",
            })
    }

    /// Subtracts `rhs` from the amount.
    pub fn checked_sub(&self, rhs: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(rhs.0)
            .map(Money)
            .ok_or(MoneyError::Overflow {
                operation: "subtraction",
            })
    }

    /// Sums amounts, failing instead of overflowing.
    ///
    /// ```
    /// use plan_core::types::money::Money;
    ///
    /// let total = Money::checked_sum([Money::from_major(199), Money::from_minor(49167)]).unwrap();
    /// assert_eq!(total, Money::from_minor(69067));
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Multiplies the amount by a count of repetitions.
    pub fn checked_times(&self, count: u32) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(Decimal::from(count))
            .map(Money)
            .ok_or(MoneyError::Overflow {
                operation: "multiplication",
            })
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, MoneyError> {
        Money::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl fmt::Display for Money {
    /// Formats with exactly two decimal places and no currency symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.round_half_up(PRESENTATION_DECIMAL_PLACES).0;
        shown.rescale(PRESENTATION_DECIMAL_PLACES);
        write!(f, "{}", shown)
    }
}

/// Fixed-symbol currency formatting for the presentation boundary.
///
/// # Examples
///
/// ```
/// use plan_core::types::money::{CurrencyFormat, Money};
///
/// let usd = CurrencyFormat::new("$");
/// assert_eq!(usd.format(Money::from_major(-5)), "-$5.00");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyFormat {
    symbol: String,
}

impl CurrencyFormat {
    /// Creates a formatter with the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Formats an amount as `<symbol><amount>` with two decimal places.
    pub fn format(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{}{}", self.symbol, amount.abs())
        } else {
            format!("{}{}", self.symbol, amount)
        }
    }
}

impl Default for CurrencyFormat {
    /// Pound sterling, the currency the plans were designed for.
    fn default() -> Self {
        Self::new("£")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Money::from_major(2950).to_string(), "2950.00");
        assert_eq!(m("0.5").to_string(), "0.50");
        assert_eq!(m("491.666666").to_string(), "491.67");
    }

    #[test]
    fn test_round_half_up_ties() {
        assert_eq!(m("2.345").round_half_up(2), m("2.35"));
        assert_eq!(m("2.344").round_half_up(2), m("2.34"));
        assert_eq!(m("-2.345").round_half_up(2), m("-2.35"));
    }

    #[test]
    fn test_division_is_exact_until_rounded() {
        let share = Money::from_major(100).checked_div(3).unwrap();
        assert_ne!(share, m("33.33"));
        assert_eq!(share.round_half_up(2), m("33.33"));
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert!(matches!(
            Money::from_major(10).checked_div(0),
            Err(MoneyError::Overflow { operation: "division" })
        ));
    }

    #[test]
    fn test_checked_add_sub_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(matches!(
            max.checked_add(Money::from_minor(1)),
            Err(MoneyError::Overflow { operation: "addition" })
        ));
        assert!(matches!(
            Money::new(Decimal::MIN).checked_sub(Money::from_major(1)),
            Err(MoneyError::Overflow { operation: "subtraction" })
        ));
        assert_eq!(m("5").checked_sub(m("7.5")).unwrap(), m("-2.5"));
        assert!(matches!(
            Money::checked_sum([max, Money::from_major(149)]),
            Err(MoneyError::Overflow { .. })
        ));
    }

    #[test]
    fn test_checked_times() {
        assert_eq!(m("491.67").checked_times(6).unwrap(), m("2950.02"));
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let total = Money::checked_sum([m("1.10"), m("2.20"), m("3.30")]).unwrap();
        assert_eq!(total, m("6.60"));
        assert_eq!(Money::checked_sum(std::iter::empty()).unwrap(), Money::ZERO);
        assert_eq!(
            Money::checked_sum([m("5"), m("-7.5")]).unwrap(),
            m("-2.5")
        );
    }

    #[test]
    fn test_negative_and_zero() {
        assert!(m("-0.01").is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!m("-0").is_negative());
        assert!(m("0.00").is_zero());
    }

    #[test]
    fn test_parse_rejects_symbols() {
        assert!(matches!(Money::parse("£10"), Err(MoneyError::ParseError(_))));
        assert!(Money::parse("1,000").is_err());
    }


    #[test]
    fn test_currency_format() {
        let gbp = CurrencyFormat::default();
        assert_eq!(gbp.symbol(), "£");
        assert_eq!(gbp.format(m("491.67")), "£491.67");
        assert_eq!(gbp.format(Money::from_major(199)), "£199.00");
        assert_eq!(gbp.format(m("-0.02")), "-£0.02");
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_money_serializes_as_string() {
            let json = serde_json::to_string(&m("491.67")).unwrap();
            assert_eq!(json, "\"491.67\"");

            let parsed: Money = serde_json::from_str("\"2950\"").unwrap();
            assert_eq!(parsed, Money::from_major(2950));
        }
    }
}
