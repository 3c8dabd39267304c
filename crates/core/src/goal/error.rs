//! Savings goal error types.

use finora_shared::types::{Money, MoneyError};
use thiserror::Error;

use super::types::GoalStatus;

/// Savings goal errors.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Name is empty or whitespace-only.
    #[error("Goal name is required")]
    NameRequired,

    /// Name exceeds the maximum length.
    #[error("Goal name is too long: {len} characters (max {max})")]
    NameTooLong {
        /// Length of the rejected name after trimming.
        len: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Target amount must be strictly positive.
    #[error("Goal target must be positive, got {0}")]
    NonPositiveTarget(Money),

    /// Contributions must be strictly positive.
    #[error("Contribution must be positive, got {0}")]
    NonPositiveContribution(Money),

    /// Operation requires an active goal.
    #[error("Goal is not active: status is {status}")]
    NotActive {
        /// Current lifecycle status.
        status: GoalStatus,
    },

    /// Monetary failure, propagated with its original message.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
