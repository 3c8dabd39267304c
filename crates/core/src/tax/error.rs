//! Tax rate errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from tax rate construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxRateError {
    /// Name was blank after trimming.
    #[error("Tax rate name is required")]
    NameRequired,

    /// Name exceeds the maximum length.
    #[error("Tax rate name is too long: {len} characters (max {max})")]
    NameTooLong {
        /// Characters supplied.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// The effective window ends before it begins.
    #[error("Effective-to date {to} is before effective-from date {from}")]
    InvalidEffectiveWindow {
        /// First day the rate would be in effect.
        from: NaiveDate,
        /// Claimed last day, earlier than `from`.
        to: NaiveDate,
    },
}
