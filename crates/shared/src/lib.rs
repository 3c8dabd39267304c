//! Shared value objects and typed identifiers for Finora.
//!
//! This crate provides common types used across all other crates:
//! - Money with decimal precision and validated currency codes
//! - Percentage and inclusive date-range value objects
//! - Typed IDs for type-safe entity references

pub mod types;

pub use types::{
    CurrencyCode, DateRange, DateRangeError, Money, MoneyError, Percentage, PercentageError,
};
