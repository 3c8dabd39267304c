//! Currency reference data and exchange rates.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use finora_shared::types::{CurrencyCode, ExchangeRateId};

use super::error::CurrencyError;

/// Maximum supported decimal places for a currency.
pub const MAX_DECIMAL_PLACES: u32 = 4;

/// A currency known to the system: reference data, immutable once
/// created except for deactivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCurrency")]
pub struct Currency {
    code: CurrencyCode,
    name: String,
    symbol: String,
    decimal_places: u32,
    is_active: bool,
}

impl Currency {
    /// Creates a currency definition.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::NameRequired` for a blank name and
    /// `CurrencyError::InvalidDecimalPlaces` when `decimal_places`
    /// exceeds [`MAX_DECIMAL_PLACES`].
    pub fn create(
        code: CurrencyCode,
        name: &str,
        symbol: &str,
        decimal_places: u32,
    ) -> Result<Self, CurrencyError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CurrencyError::NameRequired);
        }
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(CurrencyError::InvalidDecimalPlaces(decimal_places));
        }
        Ok(Self {
            code,
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimal_places,
            is_active: true,
        })
    }

    /// Rounds an amount to this currency's decimal places using
    /// banker's rounding (round half to even).
    #[must_use]
    pub fn round_amount(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointNearestEven)
    }

    /// Takes the currency out of circulation. Idempotent.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// ISO-style code.
    #[must_use]
    pub const fn code(&self) -> CurrencyCode {
        self.code
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display symbol (e.g. "$").
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of decimal places amounts are quoted in.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// False once deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Input for creating an exchange rate.
#[derive(Debug, Clone)]
pub struct CreateExchangeRateInput {
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency (must differ from the source).
    pub to: CurrencyCode,
    /// Units of `to` per unit of `from` (strictly positive).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
    /// Optional provider the rate was sourced from.
    pub source: Option<String>,
    /// Creation timestamp (supplied by the caller).
    pub created_at: DateTime<Utc>,
}

/// Exchange rate between two distinct currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawExchangeRate")]
pub struct ExchangeRate {
    id: ExchangeRateId,
    from: CurrencyCode,
    to: CurrencyCode,
    rate: Decimal,
    effective_date: NaiveDate,
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Creates an exchange rate.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::SameCurrencyPair` when both codes are
    /// equal and `CurrencyError::NonPositiveRate` unless the rate is
    /// strictly positive.
    pub fn create(input: CreateExchangeRateInput) -> Result<Self, CurrencyError> {
        if input.from == input.to {
            return Err(CurrencyError::SameCurrencyPair(input.from));
        }
        if input.rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(input.rate));
        }
        Ok(Self {
            id: ExchangeRateId::new(),
            from: input.from,
            to: input.to,
            rate: input.rate,
            effective_date: input.effective_date,
            source: input.source,
            created_at: input.created_at,
        })
    }

    /// Applies the rate: `amount × rate`, in units of the target
    /// currency.
    #[must_use]
    pub fn convert(&self, amount: Decimal) -> Decimal {
        amount * self.rate
    }

    /// Applies the rate backwards: `amount / rate`, in units of the
    /// source currency. The rate is strictly positive by construction.
    #[must_use]
    pub fn convert_reverse(&self, amount: Decimal) -> Decimal {
        amount / self.rate
    }

    /// Returns the reciprocal rate covering the swapped pair, with a
    /// fresh id and the same effective date and source.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            id: ExchangeRateId::new(),
            from: self.to,
            to: self.from,
            rate: Decimal::ONE / self.rate,
            effective_date: self.effective_date,
            source: self.source.clone(),
            created_at: self.created_at,
        }
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> ExchangeRateId {
        self.id
    }

    /// Source currency.
    #[must_use]
    pub const fn from(&self) -> CurrencyCode {
        self.from
    }

    /// Target currency.
    #[must_use]
    pub const fn to(&self) -> CurrencyCode {
        self.to
    }

    /// Units of `to` per unit of `from`.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Date this rate is effective.
    #[must_use]
    pub const fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Optional provider the rate was sourced from.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Serde-facing mirror of `Currency` without the invariants.
#[derive(Deserialize)]
struct RawCurrency {
    code: CurrencyCode,
    name: String,
    symbol: String,
    decimal_places: u32,
    is_active: bool,
}

impl TryFrom<RawCurrency> for Currency {
    type Error = CurrencyError;

    fn try_from(raw: RawCurrency) -> Result<Self, Self::Error> {
        let mut currency = Self::create(raw.code, &raw.name, &raw.symbol, raw.decimal_places)?;
        currency.is_active = raw.is_active;
        Ok(currency)
    }
}

/// Serde-facing mirror of `ExchangeRate` without the invariants.
#[derive(Deserialize)]
struct RawExchangeRate {
    id: ExchangeRateId,
    from: CurrencyCode,
    to: CurrencyCode,
    rate: Decimal,
    effective_date: NaiveDate,
    source: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawExchangeRate> for ExchangeRate {
    type Error = CurrencyError;

    fn try_from(raw: RawExchangeRate) -> Result<Self, Self::Error> {
        if raw.from == raw.to {
            return Err(CurrencyError::SameCurrencyPair(raw.from));
        }
        if raw.rate <= Decimal::ZERO {
            return Err(CurrencyError::NonPositiveRate(raw.rate));
        }
        Ok(Self {
            id: raw.id,
            from: raw.from,
            to: raw.to,
            rate: raw.rate,
            effective_date: raw.effective_date,
            source: raw.source,
            created_at: raw.created_at,
        })
    }
}
