//! Property-based tests for loan terms.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::calculator::{recalc_default_charges, recalc_principal, recalc_upfront};
use crate::decimal::Money;

/// Strategy for amounts with cent precision (0.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for percentages with two decimals in [0, 100].
fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Upfront fee is `amount * pct / 100` and principal is the non-negative remainder.
    #[test]
    fn prop_upfront_and_principal(amount in amount(), pct in percentage()) {
        let upfront = recalc_upfront(Some(amount), Some(pct));
        prop_assert_eq!(upfront, Money::from_decimal(amount * pct / Decimal::ONE_HUNDRED));

        let principal = recalc_principal(Money::from_decimal(amount), upfront);
        prop_assert!(!principal.is_negative());
        prop_assert_eq!(principal, Money::from_decimal(amount) - upfront);
    }

    /// Default charges are `principal * pct / 100`.
    #[test]
    fn prop_default_charges(principal in amount(), pct in percentage()) {
        let charges = recalc_default_charges(Money::from_decimal(principal), Some(pct));
        prop_assert_eq!(charges, Money::from_decimal(principal * pct / Decimal::ONE_HUNDRED));
        prop_assert!(charges <= Money::from_decimal(principal));
    }

    /// Upfront fee never exceeds the amount for an in-range percentage.
    #[test]
    fn prop_upfront_bounded(amount in amount(), pct in percentage()) {
        let upfront = recalc_upfront(Some(amount), Some(pct));
        prop_assert!(upfront <= Money::from_decimal(amount));
    }
}
