//! Expense records and aggregation.

pub mod aggregator;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregator::ExpenseAggregator;
pub use types::Expense;
