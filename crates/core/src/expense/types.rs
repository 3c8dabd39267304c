//! Expense records consumed by the aggregator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use finora_shared::types::{CategoryId, ExpenseId, Money};

/// A single recorded expense.
///
/// Aggregation input only: the amount's validity is enforced by
/// `Money`, and categorization rules live on `Category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Category the expense is filed under.
    pub category_id: CategoryId,
    /// Amount spent.
    pub amount: Money,
    /// Day the expense occurred.
    pub date: NaiveDate,
    /// Free-form note, if any.
    pub description: Option<String>,
}
