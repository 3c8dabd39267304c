//! Budget error types.

use finora_shared::types::{Money, MoneyError};
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Name is empty or whitespace-only.
    #[error("Budget name is required")]
    NameRequired,

    /// Name exceeds the maximum length.
    #[error("Budget name is too long: {len} characters (max {max})")]
    NameTooLong {
        /// Length of the rejected name after trimming.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Budget limit must be strictly positive.
    #[error("Budget limit must be positive, got {0}")]
    NonPositiveLimit(Money),

    /// A pacing calculation was requested after the period's last day.
    #[error("Budget period has ended: no days remaining")]
    PeriodEnded,

    /// Savings rate is undefined for zero or negative income.
    #[error("Income must be positive to compute a savings rate")]
    NonPositiveIncome,

    /// Monetary failure, propagated with its original message.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
