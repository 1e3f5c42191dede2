//! # Property-Based Tests for Quantity Rounding and Arithmetic
//!
//! Uses proptest to verify the rounding invariants of `Quantity` over
//! arbitrary decimal inputs.
//!
//! # Test Coverage
//!
//! - Monetary rounding: at most 4 fractional digits, ties half-up
//! - Integral rounding: no fractional digits, ties half-down
//! - Arithmetic keeps the receiver's metric and rounding policy
//! - `a + b - b == a` under the active policy
//! - Division by a zero amount always fails

use proptest::prelude::*;
use rust_decimal::Decimal;

use salespoint_core::metric::Metric;
use salespoint_core::quantity::Quantity;
use salespoint_core::rounding::{RoundingPolicy, RoundingStrategy, MONETARY_ROUNDING, ROUND_ONE};
use salespoint_core::CoreError;

// ============================================================================
// Strategies
// ============================================================================

/// Decimals below 10^12 in magnitude with up to 10 fractional digits.
fn decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..=10)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn metric() -> impl Strategy<Value = Metric> {
    prop_oneof![
        Just(Metric::UNIT),
        Just(Metric::KILOGRAM),
        Just(Metric::LITER),
        Just(Metric::EURO),
    ]
}

fn policy() -> impl Strategy<Value = RoundingPolicy> {
    prop_oneof![Just(MONETARY_ROUNDING), Just(ROUND_ONE)]
}

// ============================================================================
// Rounding
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn monetary_keeps_four_fractional_digits(raw in decimal()) {
        let rounded = MONETARY_ROUNDING.round(raw);
        prop_assert_eq!(rounded.scale(), 4);
        prop_assert!((rounded - raw).abs() <= Decimal::new(5, 5));
    }

    #[test]
    fn monetary_ties_round_half_up(k in 0i64..1_000_000_000, negative in any::<bool>()) {
        // k.xxxx5 sits exactly between two monetary steps.
        let magnitude = Decimal::new(k * 10 + 5, 5);
        let expected = Decimal::new(k + 1, 4);
        if negative {
            prop_assert_eq!(MONETARY_ROUNDING.round(-magnitude), -expected);
        } else {
            prop_assert_eq!(MONETARY_ROUNDING.round(magnitude), expected);
        }
    }

    #[test]
    fn integral_has_no_fractional_digits(raw in decimal()) {
        let rounded = ROUND_ONE.round(raw);
        prop_assert_eq!(rounded.scale(), 0);
        prop_assert!((rounded - raw).abs() <= Decimal::new(5, 1));
    }

    #[test]
    fn integral_ties_round_half_down(k in 0i64..1_000_000_000, negative in any::<bool>()) {
        let magnitude = Decimal::new(k * 10 + 5, 1);
        let expected = Decimal::from(k);
        if negative {
            prop_assert_eq!(ROUND_ONE.round(-magnitude), -expected);
        } else {
            prop_assert_eq!(ROUND_ONE.round(magnitude), expected);
        }
    }

    #[test]
    fn rounding_is_idempotent(raw in decimal(), policy in policy()) {
        let once = policy.round(raw);
        prop_assert_eq!(policy.round(once), once);
    }

    #[test]
    fn construction_applies_policy(raw in decimal(), metric in metric(), policy in policy()) {
        let quantity = Quantity::new(raw, metric, policy);
        prop_assert_eq!(quantity.amount(), policy.round(raw));
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn arithmetic_preserves_receiver_metric_and_policy(
        a in decimal(),
        b in decimal(),
        metric_a in metric(),
        metric_b in metric(),
        policy_a in policy(),
        policy_b in policy(),
    ) {
        let left = Quantity::new(a, metric_a.clone(), policy_a);
        let right = Quantity::new(b, metric_b, policy_b);

        let results = [
            left.add(&right),
            left.subtract(&right),
            left.multiply(&right),
        ];
        for result in results {
            let quantity = result.unwrap();
            prop_assert_eq!(quantity.metric(), &metric_a);
            prop_assert_eq!(quantity.rounding(), policy_a);
        }

        if !right.is_zero() {
            let quotient = left.divide(&right).unwrap();
            prop_assert_eq!(quotient.metric(), &metric_a);
            prop_assert_eq!(quotient.rounding(), policy_a);
        }
    }

    #[test]
    fn add_then_subtract_restores_within_tolerance(
        a in decimal(),
        b in decimal(),
        metric in metric(),
        policy in policy(),
    ) {
        let left = Quantity::new(a, metric.clone(), policy);
        let right = Quantity::new(b, metric, policy);

        let restored = left.add(&right).unwrap().subtract(&right).unwrap();
        let drift = (restored.amount() - left.amount()).abs();
        prop_assert!(drift <= policy.tolerance());
        prop_assert_eq!(restored.metric(), left.metric());
    }

    #[test]
    fn division_by_zero_always_fails(a in decimal(), metric in metric(), policy in policy()) {
        let dividend = Quantity::new(a, metric.clone(), policy);
        let zero = Quantity::zero(metric, policy);
        prop_assert!(matches!(dividend.divide(&zero), Err(CoreError::DivisionByZero)));
    }

    #[test]
    fn ordering_follows_amount(a in decimal(), b in decimal()) {
        let left = Quantity::new(a, Metric::KILOGRAM, MONETARY_ROUNDING);
        let right = Quantity::new(b, Metric::LITER, MONETARY_ROUNDING);
        prop_assert_eq!(left.compare_amount(&right), left.amount().cmp(&right.amount()));
    }
}

// ============================================================================
// Worked Examples
// ============================================================================

#[test]
fn monetary_example() {
    let quantity = Quantity::from_f64(1.23456, Metric::EURO, MONETARY_ROUNDING).unwrap();
    assert_eq!(quantity.amount(), Decimal::new(12346, 4));
}

#[test]
fn integral_example() {
    let quantity = Quantity::from_f64(2.5, Metric::UNIT, ROUND_ONE).unwrap();
    assert_eq!(quantity.amount(), Decimal::from(2));
}
