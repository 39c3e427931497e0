// ── Unit conversion for rate requests ──
//
// The gateway bills on weight with three decimals and never on zero, and on
// whole-unit dimensions rounded up. Values are first rounded to three
// decimals so float noise from the canonical storage (5.2499999 in) does
// not push a dimension up a whole unit.

use crate::model::{Axis, Package};

/// Smallest weight the gateway accepts.
pub const MIN_WEIGHT: f64 = 0.1;

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Package weight in pounds (`imperial`) or kilograms, rounded to three
/// decimals and never below [`MIN_WEIGHT`].
pub fn weight_value(package: &Package, imperial: bool) -> f64 {
    let raw = if imperial {
        package.pounds()
    } else {
        package.kilograms()
    };
    round3(raw).max(MIN_WEIGHT)
}

/// Length, width, height in inches (`imperial`) or centimetres, rounded up
/// to whole units. `None` when the package has no dimensions at all.
#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
pub fn dimension_values(package: &Package, imperial: bool) -> Option<[i64; 3]> {
    if Axis::ALL.iter().all(|axis| package.centimetres(*axis) == 0.0) {
        return None;
    }

    Some(Axis::ALL.map(|axis| {
        let raw = if imperial {
            package.inches(axis)
        } else {
            package.centimetres(axis)
        };
        round3(raw).ceil() as i64
    }))
}

/// Decimal text as sent on the wire: integral values keep one fractional
/// digit (`2.0`), others use the shortest exact representation (`0.469`).
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::UnitSystem;

    fn imperial(ounces: f64, dims: [f64; 3]) -> Package {
        Package::new(ounces, dims, UnitSystem::Imperial).unwrap()
    }

    fn metric(grams: f64, dims: [f64; 3]) -> Package {
        Package::new(grams, dims, UnitSystem::Metric).unwrap()
    }

    #[test]
    fn weight_is_rounded_to_three_decimals() {
        // 7.5 oz = 0.46875 lb
        assert_eq!(weight_value(&imperial(7.5, [0.0; 3]), true), 0.469);
        assert_eq!(weight_value(&metric(1234.5678, [0.0; 3]), false), 1.235);
    }

    #[test]
    fn zero_weight_becomes_the_minimum() {
        assert_eq!(weight_value(&metric(0.0, [0.0; 3]), false), MIN_WEIGHT);
        assert_eq!(weight_value(&imperial(0.0, [0.0; 3]), true), MIN_WEIGHT);
        assert_eq!(format_decimal(weight_value(&metric(0.0, [0.0; 3]), false)), "0.1");
    }

    #[test]
    fn weights_below_the_minimum_are_raised_to_it() {
        assert_eq!(weight_value(&metric(40.0, [0.0; 3]), false), MIN_WEIGHT);
    }

    #[test]
    fn dimensions_round_up_to_whole_units() {
        let pkg = imperial(10.0, [5.25, 4.0, 0.2]);
        assert_eq!(dimension_values(&pkg, true), Some([6, 4, 1]));
    }

    #[test]
    fn dimensions_ignore_float_noise_below_three_decimals() {
        // 15 in round-trips through centimetres as 14.999999999999998 or
        // 15.000000000000002; either way it must stay 15.
        let pkg = imperial(10.0, [15.0, 15.0, 15.0]);
        assert_eq!(dimension_values(&pkg, true), Some([15, 15, 15]));
    }

    #[test]
    fn dimensions_convert_between_systems() {
        let pkg = metric(100.0, [25.4, 10.0, 1.0]);
        assert_eq!(dimension_values(&pkg, true), Some([10, 4, 1]));
        assert_eq!(dimension_values(&pkg, false), Some([26, 10, 1]));
    }

    #[test]
    fn zero_dimensions_are_absent() {
        assert_eq!(dimension_values(&metric(100.0, [0.0; 3]), false), None);
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(format_decimal(2.0), "2.0");
        assert_eq!(format_decimal(0.469), "0.469");
        assert_eq!(format_decimal(12.5), "12.5");
    }
}
