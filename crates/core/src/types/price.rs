//! Non-negative decimal money amounts.
//!
//! All arithmetic stays in [`Decimal`] at full precision. Rounding to cents
//! only happens in [`Price::display`], so totals recomputed from the same
//! inputs never drift.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::quantity::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount in the store's single currency.
///
/// Serialized as a JSON number so catalog documents round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from whole currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a price from cents (e.g. `from_cents(1999)` is 19.99).
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// This amount scaled by a non-negative rate (e.g. `0.05` for 5%).
    ///
    /// Negative rates are treated as zero.
    #[must_use]
    pub fn scaled(self, rate: Decimal) -> Self {
        if rate.is_sign_negative() {
            return Self::ZERO;
        }
        Self(self.0.saturating_mul(rate))
    }

    /// Format for display (e.g., "$19.99"), rounding half away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::new(-1, 2)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-1, 2)));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_times_quantity() {
        let unit = Price::from_cents(1999);
        let qty = Quantity::new(3).unwrap();
        assert_eq!(unit.times(qty), Price::from_cents(5997));
    }

    #[test]
    fn test_scaled_keeps_full_precision() {
        let tax = Price::from_units(110).scaled(Decimal::new(5, 2));
        assert_eq!(tax.amount(), Decimal::new(550, 2));

        let fine = Price::from_cents(1).scaled(Decimal::new(5, 2));
        assert_eq!(fine.amount(), Decimal::new(5, 4));
    }

    #[test]
    fn test_display_rounds_only_at_presentation() {
        assert_eq!(Price::from_units(115).display(), "$115.00");
        assert_eq!(Price::new(Decimal::new(12_345, 3)).unwrap().display(), "$12.35");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_units(10), Price::from_cents(550)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(1550));
    }

    #[test]
    fn test_serde_uses_json_numbers() {
        let price: Price = serde_json::from_str("45.99").unwrap();
        assert_eq!(price, Price::from_cents(4599));

        let whole: Price = serde_json::from_str("120").unwrap();
        assert_eq!(whole, Price::from_units(120));

        assert_eq!(serde_json::to_string(&price).unwrap(), "45.99");
        assert!(serde_json::from_str::<Price>("-3.5").is_err());
    }
}
