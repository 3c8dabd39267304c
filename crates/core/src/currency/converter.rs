//! Applying exchange rates to monetary amounts.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Converted amounts round to 4 decimal places
//! - Use banker's rounding (round half to even)
//!
//! No rate lookup or chaining through an intermediate currency happens
//! here: callers supply the exact matching (or inverse) rate.

use rust_decimal::{Decimal, RoundingStrategy};

use finora_shared::types::{CurrencyCode, Money};

use super::error::CurrencyError;
use super::types::ExchangeRate;

/// Decimal places conversion results are rounded to.
const CONVERSION_DECIMAL_PLACES: u32 = 4;

/// Stateless converter applying a caller-supplied exchange rate.
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Converts an amount into `target` using a rate quoted as
    /// `amount.currency() -> target`.
    ///
    /// Already-in-target amounts are returned untouched without
    /// consulting the rate. Otherwise the result is `amount × rate`,
    /// banker's-rounded to 4 decimal places, in the target currency.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::RateMismatch` unless the rate's pair is
    /// exactly `amount.currency() -> target`.
    pub fn convert(
        amount: Money,
        target: CurrencyCode,
        rate: &ExchangeRate,
    ) -> Result<Money, CurrencyError> {
        if amount.currency() == target {
            return Ok(amount);
        }
        if rate.from() != amount.currency() || rate.to() != target {
            return Err(CurrencyError::RateMismatch {
                rate_from: rate.from(),
                rate_to: rate.to(),
                need_from: amount.currency(),
                need_to: target,
            });
        }
        Ok(Money::new(round(rate.convert(amount.amount())), target))
    }

    /// Converts an amount into `target` using a rate quoted the other
    /// way around, `target -> amount.currency()`, dividing instead of
    /// multiplying.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::RateMismatch` unless the rate's pair is
    /// exactly `target -> amount.currency()`.
    pub fn convert_with_inverse_rate(
        amount: Money,
        target: CurrencyCode,
        rate: &ExchangeRate,
    ) -> Result<Money, CurrencyError> {
        if amount.currency() == target {
            return Ok(amount);
        }
        if rate.to() != amount.currency() || rate.from() != target {
            return Err(CurrencyError::RateMismatch {
                rate_from: rate.from(),
                rate_to: rate.to(),
                need_from: target,
                need_to: amount.currency(),
            });
        }
        Ok(Money::new(
            round(rate.convert_reverse(amount.amount())),
            target,
        ))
    }
}

/// Banker's rounding to the conversion precision.
fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CONVERSION_DECIMAL_PLACES,
        RoundingStrategy::MidpointNearestEven,
    )
}
