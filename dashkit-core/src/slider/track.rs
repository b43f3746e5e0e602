//! Track hit-testing: which thumb a click or press belongs to.

use super::mapping::SliderBounds;
use super::value::{SliderValue, Thumb};

/// Thumb that should take a click at `click_percent`.
///
/// Distances are measured in percent space and ties go to the start thumb,
/// except when both thumbs sit on the same spot and the click lies above
/// them: only the end thumb can move there.
pub fn nearest_thumb(bounds: &SliderBounds, value: &SliderValue, click_percent: f64) -> Thumb {
    match value {
        SliderValue::Single(_) => Thumb::Single,
        SliderValue::Range { start, end } => {
            let start_pct = bounds.value_to_percent(*start);
            let end_pct = bounds.value_to_percent(*end);
            let to_start = (click_percent - start_pct).abs();
            let to_end = (click_percent - end_pct).abs();
            if to_start < to_end {
                Thumb::Start
            } else if to_end < to_start {
                Thumb::End
            } else if start_pct == end_pct && click_percent > end_pct {
                Thumb::End
            } else {
                Thumb::Start
            }
        }
    }
}

/// Thumb drawn within `tolerance` percent of `percent`, if any.
pub fn thumb_at(
    bounds: &SliderBounds,
    value: &SliderValue,
    percent: f64,
    tolerance: f64,
) -> Option<Thumb> {
    let candidate = nearest_thumb(bounds, value, percent);
    let thumb_pct = bounds.value_to_percent(value.get(candidate)?);
    ((percent - thumb_pct).abs() <= tolerance).then_some(candidate)
}
