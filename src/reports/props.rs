//! Property-based tests for performance ratios.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{performance_metrics, CurrencyPortfolio};
use crate::decimal::Money;

fn money() -> impl Strategy<Value = Money> {
    (0i64..100_000_000i64).prop_map(|cents| Money::from_decimal(Decimal::new(cents, 2)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// With no active loans, PAR and average loan size are zero whatever the numerators.
    #[test]
    fn prop_no_active_loans_yields_zero(
        overdue in 0u64..10_000,
        value in money(),
        collected in money(),
    ) {
        let metrics = performance_metrics(&CurrencyPortfolio {
            active_loans: 0,
            overdue_loans: overdue,
            portfolio_value: value,
            total_collections: collected,
        });

        prop_assert_eq!(metrics.portfolio_at_risk, Decimal::ZERO);
        prop_assert_eq!(metrics.default_rate, Decimal::ZERO);
        prop_assert_eq!(metrics.average_loan_size, Money::ZERO);
    }

    /// With no portfolio value, collection efficiency is zero whatever was collected.
    #[test]
    fn prop_no_portfolio_value_yields_zero(
        active in 0u64..10_000,
        overdue in 0u64..10_000,
        collected in money(),
    ) {
        let metrics = performance_metrics(&CurrencyPortfolio {
            active_loans: active,
            overdue_loans: overdue,
            portfolio_value: Money::ZERO,
            total_collections: collected,
        });

        prop_assert_eq!(metrics.collection_efficiency, Decimal::ZERO);
    }

    /// Default rate always mirrors PAR.
    #[test]
    fn prop_default_rate_mirrors_par(
        active in 0u64..10_000,
        overdue in 0u64..10_000,
    ) {
        let metrics = performance_metrics(&CurrencyPortfolio {
            active_loans: active,
            overdue_loans: overdue,
            ..CurrencyPortfolio::default()
        });

        prop_assert_eq!(metrics.default_rate, metrics.portfolio_at_risk);
    }
}
