//! Multi-currency reference data, exchange rates, and conversion.

pub mod converter;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use converter::CurrencyConverter;
pub use error::CurrencyError;
pub use types::{CreateExchangeRateInput, Currency, ExchangeRate, MAX_DECIMAL_PLACES};
