//! Slider values and who owns them.

use serde::{Deserialize, Serialize};

use super::mapping::SliderBounds;

/// Which handle of the slider is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Thumb {
    /// The only thumb of a single-value slider.
    Single,
    Start,
    End,
}

/// Current value of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliderValue {
    Single(f64),
    Range { start: f64, end: f64 },
}

impl SliderValue {
    pub fn range(start: f64, end: f64) -> Self {
        SliderValue::Range { start, end }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, SliderValue::Range { .. })
    }

    /// Thumbs present for this value, in track order.
    pub fn thumbs(&self) -> &'static [Thumb] {
        match self {
            SliderValue::Single(_) => &[Thumb::Single],
            SliderValue::Range { .. } => &[Thumb::Start, Thumb::End],
        }
    }

    /// Value held by a thumb. `None` when the thumb does not belong to this mode.
    pub fn get(&self, thumb: Thumb) -> Option<f64> {
        match (self, thumb) {
            (SliderValue::Single(v), Thumb::Single) => Some(*v),
            (SliderValue::Range { start, .. }, Thumb::Start) => Some(*start),
            (SliderValue::Range { end, .. }, Thumb::End) => Some(*end),
            _ => None,
        }
    }

    /// Replace one thumb's value, keeping `start <= end` by clamping the
    /// moved thumb against the other one.
    pub fn with_thumb(self, thumb: Thumb, value: f64) -> Self {
        match (self, thumb) {
            (SliderValue::Single(_), Thumb::Single) => SliderValue::Single(value),
            (SliderValue::Range { end, .. }, Thumb::Start) => SliderValue::Range {
                start: value.min(end),
                end,
            },
            (SliderValue::Range { start, .. }, Thumb::End) => SliderValue::Range {
                start,
                end: value.max(start),
            },
            (other, _) => other,
        }
    }

    /// Clamp and snap every component. A reversed range is swapped.
    pub fn normalized(self, bounds: &SliderBounds) -> Self {
        match self {
            SliderValue::Single(v) => SliderValue::Single(bounds.snap(v)),
            SliderValue::Range { start, end } => {
                let (a, b) = (bounds.snap(start), bounds.snap(end));
                if a <= b {
                    SliderValue::Range { start: a, end: b }
                } else {
                    SliderValue::Range { start: b, end: a }
                }
            }
        }
    }
}

/// Ownership of the slider value, chosen once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSource {
    /// The owner holds the value and applies emitted changes itself.
    Controlled(SliderValue),
    /// The slider keeps interaction results; the value is only the initial default.
    Uncontrolled(SliderValue),
}

impl ValueSource {
    pub fn value(&self) -> SliderValue {
        match self {
            ValueSource::Controlled(v) | ValueSource::Uncontrolled(v) => *v,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ValueSource::Controlled(_))
    }

    pub(crate) fn set(&mut self, value: SliderValue) {
        match self {
            ValueSource::Controlled(v) | ValueSource::Uncontrolled(v) => *v = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_thumb_never_crosses() {
        let v = SliderValue::range(20.0, 80.0);
        assert_eq!(v.with_thumb(Thumb::Start, 95.0), SliderValue::range(80.0, 80.0));
        assert_eq!(v.with_thumb(Thumb::End, 5.0), SliderValue::range(20.0, 20.0));
        assert_eq!(v.with_thumb(Thumb::Start, 30.0), SliderValue::range(30.0, 80.0));
    }

    #[test]
    fn with_thumb_ignores_foreign_thumb() {
        let v = SliderValue::Single(4.0);
        assert_eq!(v.with_thumb(Thumb::End, 9.0), v);
        assert_eq!(v.get(Thumb::Start), None);
        assert_eq!(v.get(Thumb::Single), Some(4.0));
    }

    #[test]
    fn normalized_clamps_out_of_range_props() {
        let b = SliderBounds::new(0.0, 100.0, 1.0).unwrap();
        assert_eq!(SliderValue::Single(-5.0).normalized(&b), SliderValue::Single(0.0));
        assert_eq!(SliderValue::Single(140.0).normalized(&b), SliderValue::Single(100.0));
    }

    #[test]
    fn normalized_swaps_reversed_range() {
        let b = SliderBounds::new(0.0, 100.0, 10.0).unwrap();
        assert_eq!(
            SliderValue::range(82.0, 19.0).normalized(&b),
            SliderValue::range(20.0, 80.0)
        );
    }
}
