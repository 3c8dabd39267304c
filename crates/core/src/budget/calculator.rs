//! Pacing and projection math over budgets.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use finora_shared::types::Money;

use super::error::BudgetError;
use super::types::Budget;

/// Stateless calculator for budget pacing metrics.
///
/// Every function takes the reference date as a parameter; nothing here
/// reads a wall clock, so results are deterministic under test.
pub struct BudgetCalculator;

impl BudgetCalculator {
    /// Amount available per remaining day: `remaining / days_remaining`.
    ///
    /// Negative once the budget is overspent.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::PeriodEnded` when no days remain as of
    /// `as_of`.
    pub fn daily_budget(budget: &Budget, as_of: NaiveDate) -> Result<Money, BudgetError> {
        let days = budget.range().days_remaining(as_of);
        if days <= 0 {
            return Err(BudgetError::PeriodEnded);
        }
        let remaining = budget.remaining();
        Ok(Money::new(
            remaining.amount() / Decimal::from(days),
            remaining.currency(),
        ))
    }

    /// Seven times the daily budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::PeriodEnded` when no days remain as of
    /// `as_of`.
    pub fn weekly_budget(budget: &Budget, as_of: NaiveDate) -> Result<Money, BudgetError> {
        Ok(Self::daily_budget(budget, as_of)?.mul_decimal(Decimal::from(7)))
    }

    /// Linear run-rate extrapolation of total-period spending:
    /// `spent / days_elapsed × total_days`.
    ///
    /// Zero before a full day has elapsed. This is a plain run-rate
    /// model with no smoothing or seasonality, not a statistical
    /// forecast.
    #[must_use]
    pub fn projected_spending(budget: &Budget, as_of: NaiveDate) -> Money {
        let spent = budget.spent();
        let elapsed = budget.range().days_elapsed(as_of);
        if elapsed <= 0 {
            return Money::zero(spent.currency());
        }
        let daily_rate = spent.amount() / Decimal::from(elapsed);
        Money::new(
            daily_rate * Decimal::from(budget.range().total_days()),
            spent.currency(),
        )
    }

    /// True when the projected spending exceeds the limit.
    #[must_use]
    pub fn will_exceed_budget(budget: &Budget, as_of: NaiveDate) -> bool {
        Self::projected_spending(budget, as_of).amount() > budget.limit().amount()
    }

    /// Share of income kept, as a percentage rounded to 2 decimal
    /// places: `(income - expenses) / income × 100`.
    ///
    /// Clamped to a minimum of 0: spending more than one earns reports
    /// a 0% rate, not a negative one or an error.
    ///
    /// # Errors
    ///
    /// Fails with the underlying currency-mismatch error when income
    /// and expenses are in different currencies, and with
    /// `BudgetError::NonPositiveIncome` when income is zero or negative.
    pub fn savings_rate(income: Money, expenses: Money) -> Result<Decimal, BudgetError> {
        let net = income.try_sub(expenses)?;
        if !income.is_positive() {
            return Err(BudgetError::NonPositiveIncome);
        }
        let rate = net.amount() / income.amount() * Decimal::ONE_HUNDRED;
        Ok(rate.round_dp(2).max(Decimal::ZERO))
    }
}
