//! Savings goal types and lifecycle.
//!
//! A goal moves through a small state machine:
//! - `Active → Completed` when a contribution brings the balance to the
//!   target (stamped with that contribution's date), or
//! - `Active → Cancelled` by explicit cancellation.
//!
//! Both end states are terminal. Contributions are owned by the goal
//! and only ever increase the balance.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finora_shared::types::{AccountId, ContributionId, GoalId, Money, MoneyError, UserId};

use super::error::GoalError;

/// Maximum length of goal names, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Lifecycle status of a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// Accepting contributions.
    Active,
    /// Target reached. Terminal.
    Completed,
    /// Explicitly cancelled. Terminal.
    Cancelled,
}

impl GoalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// True for end states that admit no further transitions.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single contribution toward a goal.
///
/// Created only through [`SavingsGoal::add_contribution`]; the goal
/// holds the canonical, append-only list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawGoalContribution")]
pub struct GoalContribution {
    id: ContributionId,
    goal_id: GoalId,
    amount: Money,
    date: NaiveDate,
    notes: Option<String>,
}

impl GoalContribution {
    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> ContributionId {
        self.id
    }

    /// The goal this contribution belongs to.
    #[must_use]
    pub const fn goal_id(&self) -> GoalId {
        self.goal_id
    }

    /// Contributed amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Date of the contribution.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Optional free-form notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Input for creating a savings goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Owning user.
    pub owner_id: UserId,
    /// Display name (non-blank, max 50 characters).
    pub name: String,
    /// Amount to save (strictly positive).
    pub target_amount: Money,
    /// Optional date to reach the target by.
    pub target_date: Option<NaiveDate>,
    /// Optional account the savings accumulate in.
    pub linked_account_id: Option<AccountId>,
    /// Creation timestamp (supplied by the caller).
    pub created_at: DateTime<Utc>,
}

/// A savings goal accumulating contributions toward a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSavingsGoal")]
pub struct SavingsGoal {
    id: GoalId,
    owner_id: UserId,
    name: String,
    target_amount: Money,
    current_amount: Money,
    target_date: Option<NaiveDate>,
    status: GoalStatus,
    linked_account_id: Option<AccountId>,
    created_at: DateTime<Utc>,
    completed_at: Option<NaiveDate>,
    contributions: Vec<GoalContribution>,
}

impl SavingsGoal {
    /// Creates an active goal with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns a name validation error, or
    /// `GoalError::NonPositiveTarget` unless the target is strictly
    /// positive.
    pub fn create(input: CreateGoalInput) -> Result<Self, GoalError> {
        let name = validated_name(&input.name)?;
        if !input.target_amount.is_positive() {
            return Err(GoalError::NonPositiveTarget(input.target_amount));
        }
        Ok(Self {
            id: GoalId::new(),
            owner_id: input.owner_id,
            name,
            target_amount: input.target_amount,
            current_amount: Money::zero(input.target_amount.currency()),
            target_date: input.target_date,
            status: GoalStatus::Active,
            linked_account_id: input.linked_account_id,
            created_at: input.created_at,
            completed_at: None,
            contributions: Vec::new(),
        })
    }

    /// Records a contribution and increases the balance.
    ///
    /// Reaching the target completes the goal as a side effect:
    /// `status` becomes `Completed` and `completed_at` is stamped with
    /// the contribution's date.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NotActive` once the goal is terminal,
    /// `GoalError::NonPositiveContribution` for amounts that would not
    /// increase the balance, and the underlying currency-mismatch error
    /// when the amount is not in the target's currency.
    pub fn add_contribution(
        &mut self,
        amount: Money,
        date: NaiveDate,
        notes: Option<String>,
    ) -> Result<ContributionId, GoalError> {
        if self.status != GoalStatus::Active {
            return Err(GoalError::NotActive {
                status: self.status,
            });
        }
        if !amount.is_positive() {
            return Err(GoalError::NonPositiveContribution(amount));
        }
        self.current_amount = self.current_amount.try_add(amount)?;

        let id = ContributionId::new();
        self.contributions.push(GoalContribution {
            id,
            goal_id: self.id,
            amount,
            date,
            notes,
        });

        if self.current_amount.amount() >= self.target_amount.amount() {
            self.status = GoalStatus::Completed;
            self.completed_at = Some(date);
        }
        Ok(id)
    }

    /// Cancels the goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::NotActive` from either terminal state;
    /// cancellation is only valid while active.
    pub fn cancel(&mut self) -> Result<(), GoalError> {
        if self.status != GoalStatus::Active {
            return Err(GoalError::NotActive {
                status: self.status,
            });
        }
        self.status = GoalStatus::Cancelled;
        Ok(())
    }

    /// Amount still to save: `max(0, target - current)`.
    #[must_use]
    pub fn remaining_amount(&self) -> Money {
        let remaining = (self.target_amount.amount() - self.current_amount.amount())
            .max(Decimal::ZERO);
        Money::new(remaining, self.target_amount.currency())
    }

    /// Share of the target reached, as a percentage rounded to 2
    /// decimal places and capped at 100.
    #[must_use]
    pub fn progress_percentage(&self) -> Decimal {
        (self.current_amount.amount() / self.target_amount.amount() * Decimal::ONE_HUNDRED)
            .round_dp(2)
            .min(Decimal::ONE_HUNDRED)
    }

    /// Days from `as_of` until the target date, floored at zero.
    /// `None` when the goal has no target date.
    #[must_use]
    pub fn days_remaining(&self, as_of: NaiveDate) -> Option<i64> {
        self.target_date
            .map(|target| (target - as_of).num_days().max(0))
    }

    /// Contribution per month needed to reach the target on time,
    /// using 30-day months rounded up (at least one).
    ///
    /// `None` when there is no target date or it has already passed.
    #[must_use]
    pub fn required_monthly_contribution(&self, as_of: NaiveDate) -> Option<Money> {
        let target_date = self.target_date?;
        if target_date < as_of {
            return None;
        }
        let days = (target_date - as_of).num_days();
        let months = (Decimal::from(days) / Decimal::from(30))
            .ceil()
            .max(Decimal::ONE);
        let remaining = self.remaining_amount();
        Some(Money::new(
            remaining.amount() / months,
            remaining.currency(),
        ))
    }

    /// Sum of the owned contribution list, recomputed on each call.
    #[must_use]
    pub fn total_contributed(&self) -> Money {
        let total = self
            .contributions
            .iter()
            .map(|c| c.amount.amount())
            .sum::<Decimal>();
        Money::new(total, self.target_amount.currency())
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> GoalId {
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

    /// Amount to save.
    #[must_use]
    pub const fn target_amount(&self) -> Money {
        self.target_amount
    }

    /// Balance accumulated so far.
    #[must_use]
    pub const fn current_amount(&self) -> Money {
        self.current_amount
    }

    /// Optional date to reach the target by.
    #[must_use]
    pub const fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> GoalStatus {
        self.status
    }

    /// Optional account the savings accumulate in.
    #[must_use]
    pub const fn linked_account_id(&self) -> Option<AccountId> {
        self.linked_account_id
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Date of the completing contribution, once completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<NaiveDate> {
        self.completed_at
    }

    /// Contributions in the order they were recorded.
    #[must_use]
    pub fn contributions(&self) -> &[GoalContribution] {
        &self.contributions
    }
}

/// Serde-facing mirror of `GoalContribution` without the invariants.
#[derive(Deserialize)]
struct RawGoalContribution {
    id: ContributionId,
    goal_id: GoalId,
    amount: Money,
    date: NaiveDate,
    notes: Option<String>,
}

impl TryFrom<RawGoalContribution> for GoalContribution {
    type Error = GoalError;

    fn try_from(raw: RawGoalContribution) -> Result<Self, Self::Error> {
        if !raw.amount.is_positive() {
            return Err(GoalError::NonPositiveContribution(raw.amount));
        }
        Ok(Self {
            id: raw.id,
            goal_id: raw.goal_id,
            amount: raw.amount,
            date: raw.date,
            notes: raw.notes,
        })
    }
}

/// Serde-facing mirror of `SavingsGoal` without the invariants.
///
/// Deserialization re-checks the name, the positive target, and the
/// currency equality of the balance and every contribution against the
/// target, so a hydrated goal obeys the same rules as a created one.
#[derive(Deserialize)]
struct RawSavingsGoal {
    id: GoalId,
    owner_id: UserId,
    name: String,
    target_amount: Money,
    current_amount: Money,
    target_date: Option<NaiveDate>,
    status: GoalStatus,
    linked_account_id: Option<AccountId>,
    created_at: DateTime<Utc>,
    completed_at: Option<NaiveDate>,
    contributions: Vec<GoalContribution>,
}

impl TryFrom<RawSavingsGoal> for SavingsGoal {
    type Error = GoalError;

    fn try_from(raw: RawSavingsGoal) -> Result<Self, Self::Error> {
        let name = validated_name(&raw.name)?;
        if !raw.target_amount.is_positive() {
            return Err(GoalError::NonPositiveTarget(raw.target_amount));
        }
        ensure_goal_currency(raw.target_amount, raw.current_amount)?;
        for contribution in &raw.contributions {
            ensure_goal_currency(raw.target_amount, contribution.amount)?;
        }
        Ok(Self {
            id: raw.id,
            owner_id: raw.owner_id,
            name,
            target_amount: raw.target_amount,
            current_amount: raw.current_amount,
            target_date: raw.target_date,
            status: raw.status,
            linked_account_id: raw.linked_account_id,
            created_at: raw.created_at,
            completed_at: raw.completed_at,
            contributions: raw.contributions,
        })
    }
}

fn ensure_goal_currency(target: Money, other: Money) -> Result<(), GoalError> {
    if other.currency() == target.currency() {
        Ok(())
    } else {
        Err(GoalError::Money(MoneyError::CurrencyMismatch {
            expected: target.currency(),
            got: other.currency(),
        }))
    }
}

/// Validates and trims a goal name.
fn validated_name(name: &str) -> Result<String, GoalError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GoalError::NameRequired);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(GoalError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
