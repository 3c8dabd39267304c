//! Summing and grouping over expense collections.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use finora_shared::types::{CategoryId, CurrencyCode, Money, MoneyError};

use super::types::Expense;

/// Stateless aggregation over expense collections.
///
/// Every operation is a pure function of its input slice. Sums never
/// mix currencies: the first element whose currency differs from the
/// requested (or bucket's) currency fails the whole aggregation, and
/// the `Money` error is passed through unchanged.
pub struct ExpenseAggregator;

impl ExpenseAggregator {
    /// Sums all amounts into the requested currency.
    ///
    /// An empty collection sums to zero in the requested currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if any element is not
    /// denominated in `currency`.
    pub fn total(expenses: &[Expense], currency: CurrencyCode) -> Result<Money, MoneyError> {
        let mut sum = Money::zero(currency);
        for expense in expenses {
            sum = sum.try_add(expense.amount)?;
        }
        Ok(sum)
    }

    /// Arithmetic mean of the amounts, in the requested currency.
    ///
    /// An empty collection averages to zero in the requested currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if any element is not
    /// denominated in `currency`.
    pub fn average(expenses: &[Expense], currency: CurrencyCode) -> Result<Money, MoneyError> {
        if expenses.is_empty() {
            return Ok(Money::zero(currency));
        }
        let total = Self::total(expenses, currency)?;
        let count = Decimal::from(expenses.len());
        Ok(Money::new(total.amount() / count, currency))
    }

    /// Sums per category id.
    ///
    /// Each bucket is denominated in the currency of its first
    /// expense. Buckets carry no meaningful order.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if two expenses in the
    /// same category carry different currencies.
    pub fn by_category(expenses: &[Expense]) -> Result<HashMap<CategoryId, Money>, MoneyError> {
        let mut buckets: HashMap<CategoryId, Money> = HashMap::new();
        for expense in expenses {
            let sum = match buckets.get(&expense.category_id) {
                Some(existing) => existing.try_add(expense.amount)?,
                None => expense.amount,
            };
            buckets.insert(expense.category_id, sum);
        }
        Ok(buckets)
    }

    /// Sums per calendar day, ordered by day ascending.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if two expenses on the
    /// same day carry different currencies.
    pub fn by_day(expenses: &[Expense]) -> Result<BTreeMap<NaiveDate, Money>, MoneyError> {
        let mut buckets: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        for expense in expenses {
            let sum = match buckets.get(&expense.date) {
                Some(existing) => existing.try_add(expense.amount)?,
                None => expense.amount,
            };
            buckets.insert(expense.date, sum);
        }
        Ok(buckets)
    }

    /// Sums per month number (1-12), ordered by month ascending.
    ///
    /// Years are not distinguished: a January 2023 expense and a
    /// January 2024 expense land in the same bucket.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if two expenses in the
    /// same month bucket carry different currencies.
    pub fn by_month(expenses: &[Expense]) -> Result<BTreeMap<u32, Money>, MoneyError> {
        let mut buckets: BTreeMap<u32, Money> = BTreeMap::new();
        for expense in expenses {
            let month = expense.date.month();
            let sum = match buckets.get(&month) {
                Some(existing) => existing.try_add(expense.amount)?,
                None => expense.amount,
            };
            buckets.insert(month, sum);
        }
        Ok(buckets)
    }
}
