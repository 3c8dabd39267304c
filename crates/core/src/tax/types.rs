//! Tax rate reference data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use finora_shared::types::{Money, Percentage, TaxRateId};

use super::error::TaxRateError;

/// Maximum length of a tax rate name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Input for creating a tax rate.
#[derive(Debug, Clone)]
pub struct CreateTaxRateInput {
    /// Display name (e.g., "VAT Standard").
    pub name: String,
    /// Rate applied to taxable amounts.
    pub rate: Percentage,
    /// Country the rate is scoped to, if any.
    pub country_code: Option<String>,
    /// Expense category the rate is scoped to, if any.
    pub category_code: Option<String>,
    /// First day the rate is in effect.
    pub effective_from: NaiveDate,
    /// Last day the rate is in effect; open-ended when absent.
    pub effective_to: Option<NaiveDate>,
}

/// A named tax rate with an effective window.
///
/// The window is inclusive on both ends. Effectiveness is purely a
/// question of dates; `is_active` is an administrative flag that hides
/// the rate from new use without rewriting history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawTaxRate")]
pub struct TaxRate {
    id: TaxRateId,
    name: String,
    rate: Percentage,
    country_code: Option<String>,
    category_code: Option<String>,
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
    is_active: bool,
}

impl TaxRate {
    /// Creates a tax rate after validating the name and the window.
    ///
    /// # Errors
    ///
    /// Returns `TaxRateError::NameRequired` / `NameTooLong` for a bad
    /// name, or `InvalidEffectiveWindow` when `effective_to` precedes
    /// `effective_from`. A window with `effective_to == effective_from`
    /// is a valid single-day window.
    pub fn create(input: CreateTaxRateInput) -> Result<Self, TaxRateError> {
        let name = validated_name(&input.name)?;
        if let Some(to) = input.effective_to {
            if to < input.effective_from {
                return Err(TaxRateError::InvalidEffectiveWindow {
                    from: input.effective_from,
                    to,
                });
            }
        }
        Ok(Self {
            id: TaxRateId::new(),
            name,
            rate: input.rate,
            country_code: input.country_code,
            category_code: input.category_code,
            effective_from: input.effective_from,
            effective_to: input.effective_to,
            is_active: true,
        })
    }

    /// Returns true if the rate's window covers the given date.
    ///
    /// A missing `effective_to` means the window never closes. The
    /// answer does not depend on `is_active`.
    #[must_use]
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date <= to)
    }

    /// Computes the tax owed on an amount, in the amount's currency.
    ///
    /// The result is not rounded; callers round to the currency's
    /// precision when presenting it.
    #[must_use]
    pub fn apply_to(&self, amount: Money) -> Money {
        self.rate.apply_to(amount)
    }

    /// Withdraws the rate from new use. Idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> TaxRateId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rate applied to taxable amounts.
    #[must_use]
    pub const fn rate(&self) -> Percentage {
        self.rate
    }

    /// Country scope, if any.
    #[must_use]
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// Category scope, if any.
    #[must_use]
    pub fn category_code(&self) -> Option<&str> {
        self.category_code.as_deref()
    }

    /// First day the rate is in effect.
    #[must_use]
    pub const fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }

    /// Last day the rate is in effect, if the window closes.
    #[must_use]
    pub const fn effective_to(&self) -> Option<NaiveDate> {
        self.effective_to
    }

    /// Whether the rate is offered for new use.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Serde-facing mirror of `TaxRate` without the invariants.
#[derive(Deserialize)]
struct RawTaxRate {
    id: TaxRateId,
    name: String,
    rate: Percentage,
    country_code: Option<String>,
    category_code: Option<String>,
    effective_from: NaiveDate,
    effective_to: Option<NaiveDate>,
    is_active: bool,
}

impl TryFrom<RawTaxRate> for TaxRate {
    type Error = TaxRateError;

    fn try_from(raw: RawTaxRate) -> Result<Self, Self::Error> {
        let name = validated_name(&raw.name)?;
        if let Some(to) = raw.effective_to {
            if to < raw.effective_from {
                return Err(TaxRateError::InvalidEffectiveWindow {
                    from: raw.effective_from,
                    to,
                });
            }
        }
        Ok(Self {
            id: raw.id,
            name,
            rate: raw.rate,
            country_code: raw.country_code,
            category_code: raw.category_code,
            effective_from: raw.effective_from,
            effective_to: raw.effective_to,
            is_active: raw.is_active,
        })
    }
}

fn validated_name(name: &str) -> Result<String, TaxRateError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaxRateError::NameRequired);
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(TaxRateError::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}
