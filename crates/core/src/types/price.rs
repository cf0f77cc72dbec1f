//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] but serialized as plain JSON numbers, so
//! cart documents written by earlier clients (which stored `29.9`, not
//! `"29.9"`) load unchanged.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A unit price in the store's currency.
///
/// ```
/// use go_marketplace_core::Price;
///
/// let price: Price = "29.90".parse().unwrap();
/// assert_eq!(price.to_string(), "29.90");
/// assert_eq!(price.checked_mul(3).unwrap().to_string(), "89.70");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Add two prices, returning `None` if the result does not fit.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by a quantity, returning `None` if the result does not fit.
    #[must_use]
    pub fn checked_mul(self, quantity: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_serializes_as_number() {
        let price: Price = "29.9".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "29.9");
    }

    #[test]
    fn test_price_deserializes_from_number() {
        let price: Price = serde_json::from_str("149.99").unwrap();
        assert_eq!(price, Price::from_cents(14999));
    }

    #[test]
    fn test_price_display_rounds_to_cents() {
        assert_eq!(Price::from_cents(500).to_string(), "5.00");
        assert_eq!("1.005".parse::<Price>().unwrap().to_string(), "1.00");
    }

    #[test]
    fn test_price_parse_errors() {
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert_eq!("-1".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_price_arithmetic() {
        let doubled = Price::from_cents(250).checked_mul(2).unwrap();
        let total = Price::from_cents(150).checked_add(doubled).unwrap();
        assert_eq!(total, Price::from_cents(650));
    }

    #[test]
    fn test_price_arithmetic_overflow_is_none() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.checked_add(Price::from_cents(100)), None);
        assert_eq!(huge.checked_mul(2), None);
        assert_eq!(Price::from_cents(10_000_000_000_000).checked_mul(i64::MAX), None);
    }
}
