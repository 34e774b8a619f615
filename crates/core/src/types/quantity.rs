//! Positive item quantities.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is not a whole number.
    #[error("quantity must be a whole number (got {0:?})")]
    NotANumber(String),
    /// The input is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// The input does not fit the supported range.
    #[error("quantity must be at most {max}")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
    },
}

/// A cart quantity of at least one.
///
/// Zero and negative inputs are rejected, never clamped.
///
/// ```
/// use tidewear_core::Quantity;
///
/// assert_eq!(Quantity::parse("3").unwrap().get(), 3);
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("-2").is_err());
/// assert!(Quantity::parse("two").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for values below 1 and
    /// [`QuantityError::TooLarge`] for values above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: u32::MAX })
    }

    /// Parse a quantity from user input.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotANumber`] if the input is not an integer,
    /// otherwise the same errors as [`Quantity::new`].
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let trimmed = input.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| QuantityError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::TooLarge`] on overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        self.0
            .checked_add(other.get())
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: u32::MAX })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive(0)));
        assert_eq!(Quantity::new(-4), Err(QuantityError::NotPositive(-4)));
    }

    #[test]
    fn test_rejects_non_numeric_input() {
        assert!(matches!(
            Quantity::parse("1.5"),
            Err(QuantityError::NotANumber(_))
        ));
        assert!(matches!(Quantity::parse(""), Err(QuantityError::NotANumber(_))));
    }

    #[test]
    fn test_too_large() {
        let err = Quantity::new(i64::from(u32::MAX) + 1).unwrap_err();
        assert_eq!(err, QuantityError::TooLarge { max: u32::MAX });
    }

    #[test]
    fn test_checked_add_overflow() {
        let big = Quantity::new(i64::from(u32::MAX)).unwrap();
        assert!(big.checked_add(Quantity::ONE).is_err());
        assert_eq!(
            Quantity::new(2).unwrap().checked_add(Quantity::new(2).unwrap()),
            Ok(Quantity::new(4).unwrap())
        );
    }

    #[test]
    fn test_serde_validates() {
        let qty: Quantity = serde_json::from_str("2").unwrap();
        assert_eq!(qty.get(), 2);
        assert_eq!(serde_json::to_string(&qty).unwrap(), "2");
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
