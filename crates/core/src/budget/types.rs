//! Budget data types.
//!
//! Two shapes of budget exist: [`CategoryBudget`] caps spending for a
//! single category and carries alert settings; [`Budget`] is the
//! user-level envelope spanning a set of categories. Both accrue
//! spending exclusively through `add_spending`, which is what keeps the
//! limit/spent currency invariant intact.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finora_shared::types::{
    BudgetId, CategoryBudgetId, CategoryId, DateRange, Money, MoneyError, Percentage, UserId,
};

use super::error::BudgetError;

/// Maximum length of budget names, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Recurrence of a budget window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    /// Seven-day window.
    Weekly,
    /// Calendar-month window.
    Monthly,
    /// Three-month window.
    Quarterly,
    /// Twelve-month window.
    Annual,
}

impl BudgetPeriod {
    /// Returns the string representation of the period.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating a per-category budget.
#[derive(Debug, Clone)]
pub struct CreateCategoryBudgetInput {
    /// Category this budget caps.
    pub category_id: CategoryId,
    /// Owning user.
    pub owner_id: UserId,
    /// Spending limit (strictly positive).
    pub limit: Money,
    /// Recurrence of the window.
    pub period: BudgetPeriod,
    /// Dates the budget covers.
    pub range: DateRange,
    /// Whether threshold alerts are enabled.
    pub alert_enabled: bool,
    /// Percent-of-limit trigger for the approaching-limit alert.
    pub alert_threshold: Option<Percentage>,
    /// Creation timestamp (supplied by the caller).
    pub created_at: DateTime<Utc>,
}

/// A spending cap for a single category over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCategoryBudget")]
pub struct CategoryBudget {
    id: CategoryBudgetId,
    category_id: CategoryId,
    owner_id: UserId,
    limit: Money,
    spent: Money,
    period: BudgetPeriod,
    range: DateRange,
    alert_enabled: bool,
    alert_threshold: Option<Percentage>,
    created_at: DateTime<Utc>,
}

impl CategoryBudget {
    /// Creates a category budget with zero spending.
    ///
    /// `spent` starts at zero in the limit's currency; `add_spending`
    /// is the only mutation and checks currency on every call.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NonPositiveLimit` unless the limit is
    /// strictly positive.
    pub fn create(input: CreateCategoryBudgetInput) -> Result<Self, BudgetError> {
        if !input.limit.is_positive() {
            return Err(BudgetError::NonPositiveLimit(input.limit));
        }
        Ok(Self {
            id: CategoryBudgetId::new(),
            category_id: input.category_id,
            owner_id: input.owner_id,
            limit: input.limit,
            spent: Money::zero(input.limit.currency()),
            period: input.period,
            range: input.range,
            alert_enabled: input.alert_enabled,
            alert_threshold: input.alert_threshold,
            created_at: input.created_at,
        })
    }

    /// Accrues spending against the budget.
    ///
    /// # Errors
    ///
    /// Fails with the underlying currency-mismatch error when `amount`
    /// is not in the limit's currency; `spent` is unchanged in that case.
    pub fn add_spending(&mut self, amount: Money) -> Result<(), BudgetError> {
        self.spent = self.spent.try_add(amount)?;
        Ok(())
    }

    /// Share of the limit consumed, as a percentage rounded to 2 decimal
    /// places. Recomputed on every call; zero when the limit is not
    /// positive.
    #[must_use]
    pub fn percentage_used(&self) -> Decimal {
        percentage_used(self.spent, self.limit)
    }

    /// True once spending exceeds the limit.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        is_over_budget(self.spent, self.limit)
    }

    /// True while spending is in the approaching band: alerts are
    /// enabled, a threshold is set, usage has reached it, and the limit
    /// has not yet been breached. A breach suppresses the alert;
    /// [`Self::is_over_budget`] is the post-breach signal.
    #[must_use]
    pub fn should_alert(&self) -> bool {
        match self.alert_threshold {
            Some(threshold) if self.alert_enabled => {
                !self.is_over_budget() && self.percentage_used() >= threshold.value()
            }
            _ => false,
        }
    }

    /// Limit minus spending. Negative once over budget.
    #[must_use]
    pub fn remaining(&self) -> Money {
        remaining(self.spent, self.limit)
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryBudgetId {
        self.id
    }

    /// Category this budget caps.
    #[must_use]
    pub const fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Spending limit.
    #[must_use]
    pub const fn limit(&self) -> Money {
        self.limit
    }

    /// Spending accrued so far.
    #[must_use]
    pub const fn spent(&self) -> Money {
        self.spent
    }

    /// Recurrence of the window.
    #[must_use]
    pub const fn period(&self) -> BudgetPeriod {
        self.period
    }

    /// Dates the budget covers.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Whether threshold alerts are enabled.
    #[must_use]
    pub const fn alert_enabled(&self) -> bool {
        self.alert_enabled
    }

    /// Percent-of-limit trigger for the approaching-limit alert.
    #[must_use]
    pub const fn alert_threshold(&self) -> Option<Percentage> {
        self.alert_threshold
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Input for creating a user-level budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Owning user.
    pub owner_id: UserId,
    /// Display name (non-blank, max 50 characters).
    pub name: String,
    /// Spending limit (strictly positive).
    pub limit: Money,
    /// Recurrence of the window.
    pub period: BudgetPeriod,
    /// Dates the budget covers.
    pub range: DateRange,
    /// Categories the budget spans.
    pub category_ids: BTreeSet<CategoryId>,
}

/// A user-level budget spanning a set of categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawBudget")]
pub struct Budget {
    id: BudgetId,
    owner_id: UserId,
    name: String,
    limit: Money,
    spent: Money,
    period: BudgetPeriod,
    range: DateRange,
    category_ids: BTreeSet<CategoryId>,
    is_active: bool,
}

impl Budget {
    /// Creates a budget with zero spending.
    ///
    /// # Errors
    ///
    /// Returns a name validation error, or
    /// `BudgetError::NonPositiveLimit` unless the limit is strictly
    /// positive.
    pub fn create(input: CreateBudgetInput) -> Result<Self, BudgetError> {
        let name = validated_name(&input.name)?;
        if !input.limit.is_positive() {
            return Err(BudgetError::NonPositiveLimit(input.limit));
        }
        Ok(Self {
            id: BudgetId::new(),
            owner_id: input.owner_id,
            name,
            limit: input.limit,
            spent: Money::zero(input.limit.currency()),
            period: input.period,
            range: input.range,
            category_ids: input.category_ids,
            is_active: true,
        })
    }

    /// Accrues spending against the budget.
    ///
    /// # Errors
    ///
    /// Fails with the underlying currency-mismatch error when `amount`
    /// is not in the limit's currency.
    pub fn add_spending(&mut self, amount: Money) -> Result<(), BudgetError> {
        self.spent = self.spent.try_add(amount)?;
        Ok(())
    }

    /// Adds a category to the budget's span. Returns false if it was
    /// already present.
    pub fn add_category(&mut self, id: CategoryId) -> bool {
        self.category_ids.insert(id)
    }

    /// Removes a category from the budget's span. Returns false if it
    /// was not present.
    pub fn remove_category(&mut self, id: CategoryId) -> bool {
        self.category_ids.remove(&id)
    }

    /// Soft-deletes the budget. Idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Share of the limit consumed, as a percentage rounded to 2 decimal
    /// places. Zero when the limit is not positive.
    #[must_use]
    pub fn percentage_used(&self) -> Decimal {
        percentage_used(self.spent, self.limit)
    }

    /// True once spending exceeds the limit.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        is_over_budget(self.spent, self.limit)
    }

    /// Limit minus spending. Negative once over budget.
    #[must_use]
    pub fn remaining(&self) -> Money {
        remaining(self.spent, self.limit)
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> BudgetId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spending limit.
    #[must_use]
    pub const fn limit(&self) -> Money {
        self.limit
    }

    /// Spending accrued so far.
    #[must_use]
    pub const fn spent(&self) -> Money {
        self.spent
    }

    /// Recurrence of the window.
    #[must_use]
    pub const fn period(&self) -> BudgetPeriod {
        self.period
    }

    /// Dates the budget covers.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Categories the budget spans.
    #[must_use]
    pub const fn category_ids(&self) -> &BTreeSet<CategoryId> {
        &self.category_ids
    }

    /// False once soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Serde-facing mirror of `CategoryBudget` without the invariants.
///
/// Deserialization re-checks the positive limit and the limit/spent
/// currency equality, so hydration cannot smuggle in a state that
/// `create` plus `add_spending` could never reach.
#[derive(Deserialize)]
struct RawCategoryBudget {
    id: CategoryBudgetId,
    category_id: CategoryId,
    owner_id: UserId,
    limit: Money,
    spent: Money,
    period: BudgetPeriod,
    range: DateRange,
    alert_enabled: bool,
    alert_threshold: Option<Percentage>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawCategoryBudget> for CategoryBudget {
    type Error = BudgetError;

    fn try_from(raw: RawCategoryBudget) -> Result<Self, Self::Error> {
        if !raw.limit.is_positive() {
            return Err(BudgetError::NonPositiveLimit(raw.limit));
        }
        ensure_spent_currency(raw.limit, raw.spent)?;
        Ok(Self {
            id: raw.id,
            category_id: raw.category_id,
            owner_id: raw.owner_id,
            limit: raw.limit,
            spent: raw.spent,
            period: raw.period,
            range: raw.range,
            alert_enabled: raw.alert_enabled,
            alert_threshold: raw.alert_threshold,
            created_at: raw.created_at,
        })
    }
}

/// Serde-facing mirror of `Budget` without the invariants.
#[derive(Deserialize)]
struct RawBudget {
    id: BudgetId,
    owner_id: UserId,
    name: String,
    limit: Money,
    spent: Money,
    period: BudgetPeriod,
    range: DateRange,
    category_ids: BTreeSet<CategoryId>,
    is_active: bool,
}

impl TryFrom<RawBudget> for Budget {
    type Error = BudgetError;

    fn try_from(raw: RawBudget) -> Result<Self, Self::Error> {
        let name = validated_name(&raw.name)?;
        if !raw.limit.is_positive() {
            return Err(BudgetError::NonPositiveLimit(raw.limit));
        }
        ensure_spent_currency(raw.limit, raw.spent)?;
        Ok(Self {
            id: raw.id,
            owner_id: raw.owner_id,
            name,
            limit: raw.limit,
            spent: raw.spent,
            period: raw.period,
            range: raw.range,
            category_ids: raw.category_ids,
            is_active: raw.is_active,
        })
    }
}

fn ensure_spent_currency(limit: Money, spent: Money) -> Result<(), BudgetError> {
    if spent.currency() == limit.currency() {
        Ok(())
    } else {
        Err(BudgetError::Money(MoneyError::CurrencyMismatch {
            expected: limit.currency(),
            got: spent.currency(),
        }))
    }
}

/// `spent / limit × 100` rounded to 2 decimal places, zero for a
/// non-positive limit. Currencies are equal by construction.
fn percentage_used(spent: Money, limit: Money) -> Decimal {
    if limit.is_positive() {
        (spent.amount() / limit.amount() * Decimal::ONE_HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

fn is_over_budget(spent: Money, limit: Money) -> bool {
    spent.amount() > limit.amount()
}

fn remaining(spent: Money, limit: Money) -> Money {
    Money::new(limit.amount() - spent.amount(), limit.currency())
}

/// Validates and trims a budget name.
fn validated_name(name: &str) -> Result<String, BudgetError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::NameRequired);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(BudgetError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
