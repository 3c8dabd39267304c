//! Tests for expense aggregation.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use finora_shared::types::{CategoryId, CurrencyCode, ExpenseId, Money};

use crate::expense::aggregator::ExpenseAggregator;
use crate::expense::types::Expense;

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

fn expense(category_id: CategoryId, amount: Money, date: NaiveDate) -> Expense {
    Expense {
        id: ExpenseId::new(),
        category_id,
        amount,
        date,
        description: None,
    }
}

/// Strategy for a batch of USD expenses spread over 2024 and up to
/// three categories. The batch may be empty.
fn usd_expenses() -> impl Strategy<Value = Vec<Expense>> {
    let amount = (1i64..=10_000_000).prop_map(|cents| Decimal::new(cents, 2));
    let row = (amount, 0u64..365, 0usize..3);
    prop::collection::vec(row, 0..20).prop_map(|rows| {
        let categories = [CategoryId::new(), CategoryId::new(), CategoryId::new()];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        rows.into_iter()
            .map(|(amount, day, category)| {
                expense(
                    categories[category],
                    Money::new(amount, code("USD")),
                    start + Days::new(day),
                )
            })
            .collect()
    })
}

proptest! {
    /// *For any* same-currency batch, the total equals the plain sum of
    /// the amounts.
    #[test]
    fn prop_total_matches_decimal_sum(expenses in usd_expenses()) {
        let total = ExpenseAggregator::total(&expenses, code("USD")).unwrap();

        let expected: Decimal = expenses.iter().map(|e| e.amount.amount()).sum();
        prop_assert_eq!(total.amount(), expected);
        prop_assert_eq!(total.currency(), code("USD"));
    }

    /// *For any* same-currency batch, every grouping is a partition:
    /// bucket sums add back up to the total.
    #[test]
    fn prop_groupings_conserve_total(expenses in usd_expenses()) {
        let total = ExpenseAggregator::total(&expenses, code("USD")).unwrap();

        let by_category = ExpenseAggregator::by_category(&expenses).unwrap();
        let by_day = ExpenseAggregator::by_day(&expenses).unwrap();
        let by_month = ExpenseAggregator::by_month(&expenses).unwrap();

        for buckets in [
            by_category.values().collect::<Vec<_>>(),
            by_day.values().collect::<Vec<_>>(),
            by_month.values().collect::<Vec<_>>(),
        ] {
            let sum: Decimal = buckets.iter().map(|m| m.amount()).sum();
            prop_assert_eq!(sum, total.amount());
        }
    }

    /// *For any* non-empty same-currency batch, the average lies
    /// between the smallest and largest amount.
    #[test]
    fn prop_average_is_bounded_by_extremes(expenses in usd_expenses()) {
        prop_assume!(!expenses.is_empty());

        let average = ExpenseAggregator::average(&expenses, code("USD")).unwrap();

        let min = expenses.iter().map(|e| e.amount.amount()).min().unwrap();
        let max = expenses.iter().map(|e| e.amount.amount()).max().unwrap();
        prop_assert!(average.amount() >= min);
        prop_assert!(average.amount() <= max);
    }
}

mod unit_tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, code("USD"))
    }

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, code("EUR"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_sums_amounts() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(groceries, usd(dec!(20)), date(2024, 3, 2)),
            expense(groceries, usd(dec!(30.50)), date(2024, 3, 3)),
        ];

        let total = ExpenseAggregator::total(&expenses, code("USD")).unwrap();
        assert_eq!(total, usd(dec!(60.50)));
    }

    #[test]
    fn test_total_of_empty_collection_is_zero() {
        let total = ExpenseAggregator::total(&[], code("USD")).unwrap();
        assert!(total.is_zero());
        assert_eq!(total.currency(), code("USD"));
    }

    #[test]
    fn test_total_fails_on_mixed_currencies() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(groceries, eur(dec!(20)), date(2024, 3, 2)),
        ];

        let err = ExpenseAggregator::total(&expenses, code("USD")).unwrap_err();
        assert_eq!(err.to_string(), "Currency mismatch: expected USD, got EUR");
    }

    #[test]
    fn test_total_fails_when_requested_currency_differs() {
        let groceries = CategoryId::new();
        let expenses = vec![expense(groceries, eur(dec!(10)), date(2024, 3, 1))];

        assert!(ExpenseAggregator::total(&expenses, code("USD")).is_err());
    }

    #[test]
    fn test_average() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(groceries, usd(dec!(20)), date(2024, 3, 2)),
            expense(groceries, usd(dec!(30)), date(2024, 3, 3)),
        ];

        let average = ExpenseAggregator::average(&expenses, code("USD")).unwrap();
        assert_eq!(average, usd(dec!(20)));
    }

    #[test]
    fn test_average_of_empty_collection_is_zero() {
        let average = ExpenseAggregator::average(&[], code("EUR")).unwrap();
        assert!(average.is_zero());
        assert_eq!(average.currency(), code("EUR"));
    }

    #[test]
    fn test_by_category_sums_per_bucket() {
        let groceries = CategoryId::new();
        let transport = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(transport, usd(dec!(5)), date(2024, 3, 1)),
            expense(groceries, usd(dec!(20)), date(2024, 3, 2)),
        ];

        let buckets = ExpenseAggregator::by_category(&expenses).unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&groceries], usd(dec!(30)));
        assert_eq!(buckets[&transport], usd(dec!(5)));
    }

    #[test]
    fn test_by_category_allows_currencies_to_differ_across_buckets() {
        let groceries = CategoryId::new();
        let travel = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(travel, eur(dec!(40)), date(2024, 3, 1)),
        ];

        let buckets = ExpenseAggregator::by_category(&expenses).unwrap();
        assert_eq!(buckets[&groceries], usd(dec!(10)));
        assert_eq!(buckets[&travel], eur(dec!(40)));
    }

    #[test]
    fn test_by_category_fails_on_mixed_currencies_within_bucket() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
            expense(groceries, eur(dec!(20)), date(2024, 3, 2)),
        ];

        assert!(ExpenseAggregator::by_category(&expenses).is_err());
    }

    #[test]
    fn test_by_day_orders_days_ascending() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(3)), date(2024, 3, 3)),
            expense(groceries, usd(dec!(1)), date(2024, 3, 1)),
            expense(groceries, usd(dec!(2)), date(2024, 3, 2)),
            expense(groceries, usd(dec!(10)), date(2024, 3, 1)),
        ];

        let buckets = ExpenseAggregator::by_day(&expenses).unwrap();

        let days: Vec<NaiveDate> = buckets.keys().copied().collect();
        assert_eq!(days, vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)]);
        assert_eq!(buckets[&date(2024, 3, 1)], usd(dec!(11)));
    }

    #[test]
    fn test_by_month_folds_years_into_month_numbers() {
        let groceries = CategoryId::new();
        let expenses = vec![
            expense(groceries, usd(dec!(30)), date(2024, 3, 15)),
            expense(groceries, usd(dec!(10)), date(2023, 1, 20)),
            expense(groceries, usd(dec!(5)), date(2024, 1, 8)),
        ];

        let buckets = ExpenseAggregator::by_month(&expenses).unwrap();

        let months: Vec<u32> = buckets.keys().copied().collect();
        assert_eq!(months, vec![1, 3]);
        // January 2023 and January 2024 share the month-1 bucket.
        assert_eq!(buckets[&1], usd(dec!(15)));
        assert_eq!(buckets[&3], usd(dec!(30)));
    }
}
