//! Budget tracking, spending accrual, and pacing projections.

pub mod calculator;
pub mod error;
pub mod types;


pub use calculator::BudgetCalculator;
pub use error::BudgetError;
pub use types::{
    Budget, BudgetPeriod, CategoryBudget, CreateBudgetInput, CreateCategoryBudgetInput,
    MAX_NAME_LEN,
};
