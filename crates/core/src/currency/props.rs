//! Property-based tests for currency conversion.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finora_shared::types::{CurrencyCode, Money};

use crate::currency::converter::CurrencyConverter;
use crate::currency::types::{CreateExchangeRateInput, ExchangeRate};

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn usd_to_eur(rate: Decimal) -> ExchangeRate {
    ExchangeRate::create(CreateExchangeRateInput {
        from: code("USD"),
        to: code("EUR"),
        rate,
        effective_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        source: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap(),
    })
    .unwrap()
}

/// Strategy to generate positive money amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate exchange rates (0.1000 to 10,000.0000).
///
/// Rates below 0.1 amplify the 4-decimal rounding error past the
/// round-trip tolerance asserted below.
fn plausible_rate() -> impl Strategy<Value = Decimal> {
    (1_000i64..=100_000_000).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* amount and rate, converting and then converting back
    /// through the same rate lands within 0.001 of the original.
    #[test]
    fn prop_round_trip_within_tolerance(
        amount in positive_amount(),
        rate in plausible_rate(),
    ) {
        let rate = usd_to_eur(rate);
        let original = Money::new(amount, code("USD"));

        let there = CurrencyConverter::convert(original, code("EUR"), &rate).unwrap();
        let back =
            CurrencyConverter::convert_with_inverse_rate(there, code("USD"), &rate).unwrap();

        let drift = (back.amount() - amount).abs();
        prop_assert!(
            drift <= dec!(0.001),
            "round trip drifted by {} (got {})",
            drift,
            back.amount()
        );
    }

    /// *For any* amount, converting into its own currency returns it
    /// unchanged, without rounding.
    #[test]
    fn prop_identity_preserves_amount(amount in positive_amount()) {
        let rate = usd_to_eur(dec!(0.9));
        let original = Money::new(amount, code("USD"));

        let converted = CurrencyConverter::convert(original, code("USD"), &rate).unwrap();
        prop_assert_eq!(converted, original);
    }

    /// *For any* amount and rate, the conversion result carries at most
    /// 4 decimal places.
    #[test]
    fn prop_conversion_rounds_to_4_decimals(
        amount in positive_amount(),
        rate in plausible_rate(),
    ) {
        let rate = usd_to_eur(rate);
        let original = Money::new(amount, code("USD"));

        let converted = CurrencyConverter::convert(original, code("EUR"), &rate).unwrap();
        let scaled = converted.amount() * Decimal::from(10_000);
        prop_assert_eq!(
            scaled,
            scaled.round(),
            "result {} should have at most 4 decimal places",
            converted.amount()
        );
    }

    /// *For any* amount and rate, applying the raw rate and then
    /// reversing it recovers the amount exactly; drift only enters
    /// through the converter's rounding.
    #[test]
    fn prop_raw_rate_round_trip_is_exact(
        amount in positive_amount(),
        rate in plausible_rate(),
    ) {
        let rate = usd_to_eur(rate);

        let there = rate.convert(amount);
        prop_assert_eq!(rate.convert_reverse(there), amount);
    }

    /// *For any* positive amount and rate, the converted amount stays
    /// positive.
    #[test]
    fn prop_positive_amounts_stay_positive(
        amount in positive_amount(),
        rate in plausible_rate(),
    ) {
        let rate = usd_to_eur(rate);
        let original = Money::new(amount, code("USD"));

        let converted = CurrencyConverter::convert(original, code("EUR"), &rate).unwrap();
        prop_assert!(converted.is_positive());
    }
}
