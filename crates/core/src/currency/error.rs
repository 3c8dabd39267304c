//! Currency and exchange rate error types.

use finora_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Currency-related errors.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// Display name is empty or whitespace-only.
    #[error("Currency name is required")]
    NameRequired,

    /// Decimal places outside the supported range.
    #[error("Invalid decimal places: {0} (must be between 0 and 4)")]
    InvalidDecimalPlaces(u32),

    /// An exchange rate between a currency and itself.
    #[error("Exchange rate requires two distinct currencies, got {0} twice")]
    SameCurrencyPair(CurrencyCode),

    /// Exchange rates must be strictly positive.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// The supplied rate covers a different currency pair than the
    /// requested conversion.
    #[error(
        "Rate does not match currencies: have {rate_from}->{rate_to}, need {need_from}->{need_to}"
    )]
    RateMismatch {
        /// Source currency of the supplied rate.
        rate_from: CurrencyCode,
        /// Target currency of the supplied rate.
        rate_to: CurrencyCode,
        /// Source currency the conversion needs.
        need_from: CurrencyCode,
        /// Target currency the conversion needs.
        need_to: CurrencyCode,
    },
}
