//! Common types used across the application.

pub mod date_range;
pub mod id;
pub mod money;
pub mod percentage;

#[cfg(test)]
mod props;

pub use date_range::{DateRange, DateRangeError};
pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use percentage::{Percentage, PercentageError};
