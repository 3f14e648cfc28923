//! Axis marker planning with 1-2-5 "nice number" rounding.
//!
//! Given a visible numeric range, the planner picks a marker interval
//! whose leading digit is 1, 2, or 5 (times a power of ten) so axis
//! labels read as round decimals at any zoom level, then emits every
//! multiple of that interval covering the range.

use crate::error::{Error, Result};

/// Planned markers for one axis: ordered values plus their interval.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSet {
    /// Marker positions, ascending, covering at least `[min, max]`.
    pub values: Vec<f64>,
    /// Spacing between consecutive markers; a 1-2-5 × 10^k value.
    pub interval: f64,
}

/// Round a positive value to the nearest 1, 2, or 5 times a power of
/// ten (the classic axis-labeling heuristic).
#[must_use]
pub fn nice_round(value: f64) -> f64 {
    debug_assert!(value > 0.0, "nice_round requires a positive value");
    let exponent = value.log10().floor();
    let magnitude = 10.0_f64.powf(exponent);
    let fraction = value / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Plan markers for the visible range `[min, max]`, aiming for about
/// `target_count` of them.
///
/// Values run from `floor(min/interval)·interval` to
/// `ceil(max/interval)·interval` inclusive, each re-rounded to the
/// interval's decimal magnitude so floating-point noise never leaks
/// into labels. A flat or inverted range is a caller error the camera
/// invariant rules out.
pub fn plan_markers(min: f64, max: f64, target_count: usize) -> Result<MarkerSet> {
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        return Err(Error::MarkerRange { min, max });
    }
    let interval = nice_round(range / target_count.max(1) as f64);
    let rounded_min = (min / interval).floor() * interval;
    let rounded_max = (max / interval).ceil() * interval;
    let steps = ((rounded_max - rounded_min) / interval).round() as usize;
    let values = (0..=steps)
        .map(|k| snap_to_interval(rounded_min + k as f64 * interval, interval))
        .collect();
    Ok(MarkerSet { values, interval })
}

/// Re-round `value` to the decimal precision implied by the interval's
/// order of magnitude (`0.30000000000000004` becomes `0.3`).
fn snap_to_interval(value: f64, interval: f64) -> f64 {
    let digits = -interval.log10().floor();
    let factor = 10.0_f64.powf(digits);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nice_round_fixed_points() {
        assert_relative_eq!(nice_round(1.0), 1.0);
        assert_relative_eq!(nice_round(4.0), 5.0);
        assert_relative_eq!(nice_round(9.0), 10.0);
        assert_relative_eq!(nice_round(23.0), 20.0);
    }

    #[test]
    fn test_nice_round_small_magnitudes() {
        assert_relative_eq!(nice_round(0.004), 0.005);
        assert_relative_eq!(nice_round(0.14), 0.1);
        assert_relative_eq!(nice_round(0.25), 0.2);
    }

    #[test]
    fn test_marker_coverage() {
        let markers = plan_markers(-7.0, 7.0, 10).unwrap();
        assert_relative_eq!(markers.interval, 1.0);
        assert!(*markers.values.first().unwrap() <= -7.0);
        assert!(*markers.values.last().unwrap() >= 7.0);
    }

    #[test]
    fn test_interval_is_a_nice_number() {
        for &(min, max) in &[(-7.0, 7.0), (0.3, 9.1), (-1234.0, 987.0), (-0.07, 0.05)] {
            let markers = plan_markers(min, max, 10).unwrap();
            let exponent = markers.interval.log10().floor();
            let fraction = markers.interval / 10.0_f64.powf(exponent);
            let is_125 = [1.0, 2.0, 5.0, 10.0]
                .iter()
                .any(|nice| (fraction - nice).abs() < 1e-9);
            assert!(is_125, "interval {} is not 1-2-5", markers.interval);
        }
    }

    #[test]
    fn test_values_are_interval_multiples() {
        let markers = plan_markers(-7.0, 7.0, 10).unwrap();
        for value in &markers.values {
            let ratio = value / markers.interval;
            assert!((ratio - ratio.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fractional_interval_suppresses_float_noise() {
        let markers = plan_markers(-0.95, 1.0, 10).unwrap();
        assert_relative_eq!(markers.interval, 0.2);
        for value in &markers.values {
            // Every value is exactly representable at one decimal.
            let scaled = value * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-12,
                "float noise in marker value {value}"
            );
        }
    }

    #[test]
    fn test_values_ascending_and_evenly_spaced() {
        let markers = plan_markers(-40.0, 160.0, 10).unwrap();
        for pair in markers.values.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], markers.interval, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_flat_range_is_an_error() {
        assert!(plan_markers(5.0, 5.0, 10).is_err());
        assert!(plan_markers(7.0, -7.0, 10).is_err());
    }
}
