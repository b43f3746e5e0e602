//! Value mapping between track percent and domain value.
//!
//! Every value produced here is clamped to `[min, max]` and aligned to
//! `min + k * step` for some integer `k`. When `max` itself is not aligned
//! the largest reachable value is the last aligned one at or below `max`.

use thiserror::Error;

/// Slack used when counting whole steps, so `(1.0 - 0.0) / 0.1` counts 10.
const STEP_EPSILON: f64 = 1e-9;

/// Decimal places kept when rounding away float noise.
const MAX_PRECISION: usize = 10;

/// Finest step whose grid survives rounding to `MAX_PRECISION` places.
pub const MIN_STEP: f64 = 1e-10;

/// Invalid slider configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    #[error("slider bounds must be finite (min={min}, max={max})")]
    NonFiniteBounds { min: f64, max: f64 },

    #[error("slider min {min} exceeds max {max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("slider step must be a positive finite number, got {0}")]
    InvalidStep(f64),

    #[error("slider step {0} is finer than the supported minimum of 1e-10")]
    StepTooFine(f64),
}

/// Numeric domain of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    min: f64,
    max: f64,
    step: f64,
    precision: i32,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self::from_parts(0.0, 100.0, 1.0)
    }
}

impl SliderBounds {
    /// Validate and build bounds.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, SliderError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SliderError::NonFiniteBounds { min, max });
        }
        if min > max {
            return Err(SliderError::InvertedBounds { min, max });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SliderError::InvalidStep(step));
        }
        if step < MIN_STEP {
            return Err(SliderError::StepTooFine(step));
        }
        Ok(Self::from_parts(min, max, step))
    }

    /// Build bounds from untrusted input, correcting whatever is invalid.
    ///
    /// Non-finite bounds fall back to `0..100`, inverted bounds are swapped
    /// and an invalid or too fine step defaults to `1`.
    pub fn sanitized(min: f64, max: f64, step: f64) -> Self {
        match Self::new(min, max, step) {
            Ok(bounds) => bounds,
            Err(err) => {
                tracing::warn!(%err, "correcting slider bounds");
                let min = if min.is_finite() { min } else { 0.0 };
                let max = if max.is_finite() { max } else { 100.0 };
                let (min, max) = if min > max { (max, min) } else { (min, max) };
                let step = if step.is_finite() && step >= MIN_STEP {
                    step
                } else {
                    1.0
                };
                Self::from_parts(min, max, step)
            }
        }
    }

    fn from_parts(min: f64, max: f64, step: f64) -> Self {
        let precision = decimals(step).max(decimals(min)) as i32;
        Self {
            min,
            max,
            step,
            precision,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Width of the domain. Zero for a degenerate single-point slider.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Number of whole steps that fit between `min` and `max`.
    pub fn step_count(&self) -> u64 {
        if self.is_degenerate() {
            return 0;
        }
        (self.span() / self.step + STEP_EPSILON).floor() as u64
    }

    /// Largest value the slider can actually reach.
    pub fn max_reachable(&self) -> f64 {
        self.round(self.min + self.step_count() as f64 * self.step)
    }

    /// Map a track percent in `[0, 100]` to a snapped domain value.
    pub fn percent_to_value(&self, percent: f64) -> f64 {
        if self.is_degenerate() {
            return self.min;
        }
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.snap(self.min + percent / 100.0 * self.span())
    }

    /// Map a domain value to a track percent. Unclamped.
    pub fn value_to_percent(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (value - self.min) / self.span() * 100.0
    }

    /// Clamp to the domain and align to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() || self.is_degenerate() {
            return self.min;
        }
        let steps = ((value - self.min) / self.step).round();
        let k = steps.clamp(0.0, self.step_count() as f64);
        self.round(self.min + k * self.step)
    }

    /// Strip floating noise left over from `min + k * step`.
    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision);
        (value * factor).round() / factor
    }
}

/// Count the decimal places of a float's shortest representation.
fn decimals(value: f64) -> usize {
    let text = format!("{value}");
    text.split_once('.')
        .map(|(_, frac)| frac.len())
        .unwrap_or(0)
        .min(MAX_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: f64, max: f64, step: f64) -> SliderBounds {
        SliderBounds::new(min, max, step).unwrap()
    }

    #[test]
    fn percent_maps_linearly() {
        let b = bounds(0.0, 100.0, 1.0);
        assert_eq!(b.percent_to_value(0.0), 0.0);
        assert_eq!(b.percent_to_value(30.0), 30.0);
        assert_eq!(b.percent_to_value(100.0), 100.0);
        assert_eq!(b.percent_to_value(30.4), 30.0);
        assert_eq!(b.percent_to_value(30.6), 31.0);
    }

    #[test]
    fn percent_is_clamped() {
        let b = bounds(10.0, 20.0, 1.0);
        assert_eq!(b.percent_to_value(-40.0), 10.0);
        assert_eq!(b.percent_to_value(250.0), 20.0);
        assert_eq!(b.percent_to_value(f64::NAN), 10.0);
    }

    #[test]
    fn fractional_steps_have_no_float_noise() {
        let b = bounds(0.0, 1.0, 0.1);
        assert_eq!(b.percent_to_value(30.0), 0.3);
        assert_eq!(b.percent_to_value(70.0), 0.7);
        assert_eq!(b.step_count(), 10);
        assert_eq!(b.max_reachable(), 1.0);
    }

    #[test]
    fn unaligned_max_is_unreachable() {
        let b = bounds(0.0, 10.0, 3.0);
        assert_eq!(b.max_reachable(), 9.0);
        assert_eq!(b.percent_to_value(100.0), 9.0);
        assert_eq!(b.snap(10.0), 9.0);
    }

    #[test]
    fn snap_aligns_to_min_offset() {
        let b = bounds(5.0, 25.0, 5.0);
        assert_eq!(b.snap(12.4), 10.0);
        assert_eq!(b.snap(12.6), 15.0);
        assert_eq!(b.snap(-100.0), 5.0);
        assert_eq!(b.snap(f64::INFINITY), 25.0);
    }

    #[test]
    fn value_to_percent_is_unclamped() {
        let b = bounds(0.0, 200.0, 1.0);
        assert_eq!(b.value_to_percent(50.0), 25.0);
        assert_eq!(b.value_to_percent(-20.0), -10.0);
        assert_eq!(b.value_to_percent(300.0), 150.0);
    }

    #[test]
    fn degenerate_slider_never_divides_by_zero() {
        let b = bounds(7.0, 7.0, 1.0);
        assert!(b.is_degenerate());
        assert_eq!(b.percent_to_value(0.0), 7.0);
        assert_eq!(b.percent_to_value(63.0), 7.0);
        assert_eq!(b.value_to_percent(7.0), 0.0);
        assert_eq!(b.value_to_percent(1000.0), 0.0);
        assert_eq!(b.step_count(), 0);
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert_eq!(
            SliderBounds::new(0.0, 10.0, 0.0),
            Err(SliderError::InvalidStep(0.0))
        );
        assert!(matches!(
            SliderBounds::new(0.0, 10.0, -1.0),
            Err(SliderError::InvalidStep(_))
        ));
        assert!(matches!(
            SliderBounds::new(0.0, 10.0, f64::NAN),
            Err(SliderError::InvalidStep(_))
        ));
        assert!(matches!(
            SliderBounds::new(10.0, 0.0, 1.0),
            Err(SliderError::InvertedBounds { .. })
        ));
        assert!(matches!(
            SliderBounds::new(f64::NEG_INFINITY, 0.0, 1.0),
            Err(SliderError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn steps_finer_than_rounding_precision_are_rejected() {
        assert_eq!(
            SliderBounds::new(0.0, 1.0, 1e-11),
            Err(SliderError::StepTooFine(1e-11))
        );
        assert_eq!(SliderBounds::sanitized(0.0, 1.0, 1e-20).step(), 1.0);

        let b = bounds(0.0, 1e-9, MIN_STEP);
        assert_eq!(b.step_count(), 10);
        assert_eq!(b.snap(3.2e-10), 3e-10);
    }

    #[test]
    fn sanitized_corrects_instead_of_failing() {
        let b = SliderBounds::sanitized(50.0, 10.0, -2.0);
        assert_eq!(b.min(), 10.0);
        assert_eq!(b.max(), 50.0);
        assert_eq!(b.step(), 1.0);

        let b = SliderBounds::sanitized(f64::NAN, f64::INFINITY, 5.0);
        assert_eq!(b.min(), 0.0);
        assert_eq!(b.max(), 100.0);
        assert_eq!(b.step(), 5.0);
    }

    #[test]
    fn decimals_counts_fraction_digits() {
        assert_eq!(decimals(1.0), 0);
        assert_eq!(decimals(0.25), 2);
        assert_eq!(decimals(0.001), 3);
    }
}
