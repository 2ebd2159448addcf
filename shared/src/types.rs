//! Common types and unit conversion used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Pounds per kilogram, the fixed conversion factor used everywhere
/// cross-row weights are aggregated (2.20462).
pub const POUNDS_PER_KG: Decimal = Decimal::from_parts(220462, 0, 0, false, 5);

/// Tolerance applied when comparing aggregated weights against the
/// declared total output quantity (0.01 lb).
pub const WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Weight units accepted on classification rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    Kg,
    #[default]
    Lb,
}

impl WeightUnit {
    pub fn code(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a weight in the given unit to pounds.
///
/// Kilograms are multiplied by [`POUNDS_PER_KG`]; pounds pass through
/// unchanged. No rounding happens here: rounding belongs to aggregation
/// boundaries, see [`round2`].
pub fn to_pounds(weight: Decimal, unit: WeightUnit) -> Decimal {
    match unit {
        WeightUnit::Kg => weight * POUNDS_PER_KG,
        WeightUnit::Lb => weight,
    }
}

/// Round to 2 decimal places at an aggregation boundary.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse free-text numeric input, coercing malformed input to zero.
///
/// Field values arrive from the form as text; anything that does not parse
/// as a number sums as zero rather than surfacing an error.
pub fn coerce_decimal(input: &str) -> Decimal {
    input.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_pounds_passthrough_for_lb() {
        assert_eq!(to_pounds(dec("12.5"), WeightUnit::Lb), dec("12.5"));
        assert_eq!(to_pounds(Decimal::ZERO, WeightUnit::Lb), Decimal::ZERO);
    }

    #[test]
    fn test_to_pounds_converts_kg() {
        assert_eq!(to_pounds(dec("1"), WeightUnit::Kg), dec("2.20462"));
        assert_eq!(to_pounds(dec("2.2"), WeightUnit::Kg), dec("4.850164"));
    }

    #[test]
    fn test_conversion_is_unrounded() {
        // 0.3 kg -> 0.661386 lb keeps full precision until round2
        let lb = to_pounds(dec("0.3"), WeightUnit::Kg);
        assert_eq!(lb, dec("0.661386"));
        assert_eq!(round2(lb), dec("0.66"));
    }

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(dec("1.005")), dec("1.01"));
        assert_eq!(round2(dec("1.004")), dec("1.00"));
    }

    #[test]
    fn test_coerce_decimal() {
        assert_eq!(coerce_decimal("42.5"), dec("42.5"));
        assert_eq!(coerce_decimal("  7 "), dec("7"));
        assert_eq!(coerce_decimal("abc"), Decimal::ZERO);
        assert_eq!(coerce_decimal(""), Decimal::ZERO);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Pound values pass through conversion untouched
            #[test]
            fn to_pounds_is_identity_on_lb(weight in 0u32..1_000_000) {
                let w = Decimal::from(weight);
                prop_assert_eq!(to_pounds(w, WeightUnit::Lb), w);
            }

            /// Kilogram values are scaled by exactly 2.20462
            #[test]
            fn to_pounds_scales_kg_by_factor(weight in 0u32..1_000_000) {
                let w = Decimal::from(weight);
                prop_assert_eq!(
                    to_pounds(w, WeightUnit::Kg),
                    w * dec("2.20462")
                );
            }

            /// round2 never moves a value by more than half a cent
            #[test]
            fn round2_stays_within_half_unit(units in 0i64..10_000_000) {
                // Three-decimal inputs exercise the midpoint rule
                let value = Decimal::new(units, 3);
                let diff = (round2(value) - value).abs();
                prop_assert!(diff <= dec("0.005"));
            }
        }
    }
}
