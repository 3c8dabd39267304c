//! Percentage value constrained to 0..=100.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Money;

/// Errors from percentage construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercentageError {
    /// Value outside the inclusive 0..=100 range.
    #[error("Percentage out of range: {0} (must be between 0 and 100)")]
    OutOfRange(Decimal),
}

/// A percentage in the inclusive range 0..=100.
///
/// Used for budget alert thresholds and tax rates, where values outside
/// the range have no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// 0%.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// 100%.
    pub const FULL: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a percentage, rejecting values outside 0..=100.
    ///
    /// Both boundaries are valid.
    pub fn new(value: Decimal) -> Result<Self, PercentageError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(PercentageError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value (0..=100).
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Applies the percentage to a monetary amount.
    ///
    /// `Percentage::new(dec!(25))?.apply_to(m)` yields a quarter of `m`,
    /// in the same currency.
    #[must_use]
    pub fn apply_to(&self, money: Money) -> Money {
        money.mul_decimal(self.0 / Decimal::ONE_HUNDRED)
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = PercentageError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(percentage: Percentage) -> Self {
        percentage.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
