//! Property-based tests for the shared value objects.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::money::{CurrencyCode, Money};
use super::percentage::Percentage;

/// Strategy to generate decimal amounts between -1,000,000.00 and 1,000,000.00.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a valid 3-letter currency code.
fn currency_code() -> impl Strategy<Value = CurrencyCode> {
    "[A-Z]{3}".prop_map(|s| CurrencyCode::new(&s).expect("generated 3 letters"))
}

proptest! {
    /// *For any* two amounts in the same currency, addition commutes.
    #[test]
    fn prop_add_commutative(
        a in any_amount(),
        b in any_amount(),
        code in currency_code(),
    ) {
        let x = Money::new(a, code);
        let y = Money::new(b, code);
        prop_assert_eq!(
            x.try_add(y).expect("same currency"),
            y.try_add(x).expect("same currency")
        );
    }

    /// *For any* three amounts in the same currency, addition associates.
    #[test]
    fn prop_add_associative(
        a in any_amount(),
        b in any_amount(),
        c in any_amount(),
        code in currency_code(),
    ) {
        let x = Money::new(a, code);
        let y = Money::new(b, code);
        let z = Money::new(c, code);

        let left = x.try_add(y).and_then(|s| s.try_add(z)).expect("same currency");
        let right = y.try_add(z).and_then(|s| x.try_add(s)).expect("same currency");
        prop_assert_eq!(left, right);
    }

    /// *For any* two distinct currencies, addition always fails.
    #[test]
    fn prop_add_mismatch_fails(
        a in any_amount(),
        b in any_amount(),
        left in currency_code(),
        right in currency_code(),
    ) {
        prop_assume!(left != right);
        let result = Money::new(a, left).try_add(Money::new(b, right));
        prop_assert!(result.is_err());
    }

    /// *For any* amount, adding zero is the identity.
    #[test]
    fn prop_add_zero_identity(
        a in any_amount(),
        code in currency_code(),
    ) {
        let x = Money::new(a, code);
        prop_assert_eq!(x.try_add(Money::zero(code)).expect("same currency"), x);
    }

    /// *For any* string that is not exactly 3 ASCII letters, parsing fails.
    #[test]
    fn prop_invalid_code_rejected(s in "[A-Z]{0,2}|[A-Z]{4,6}|[0-9]{3}") {
        prop_assert!(CurrencyCode::new(&s).is_err());
    }

    /// *For any* in-range value, the percentage round-trips unchanged.
    #[test]
    fn prop_percentage_accepts_in_range(v in 0u32..=10_000) {
        let value = Decimal::new(i64::from(v), 2); // 0.00 ..= 100.00
        let pct = Percentage::new(value).expect("in range");
        prop_assert_eq!(pct.value(), value);
    }

    /// *For any* out-of-range value, construction fails.
    #[test]
    fn prop_percentage_rejects_out_of_range(v in 10_001u32..1_000_000) {
        let value = Decimal::new(i64::from(v), 2); // > 100.00
        prop_assert!(Percentage::new(value).is_err());
        prop_assert!(Percentage::new(-value).is_err());
    }
}
