//! Savings goals and contribution tracking.

pub mod error;
pub mod types;


pub use error::GoalError;
pub use types::{CreateGoalInput, GoalContribution, GoalStatus, SavingsGoal, MAX_NAME_LEN};
