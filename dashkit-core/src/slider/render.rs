//! Display data derived from a slider's props and value.
//!
//! Nothing here has a lifecycle beyond one render pass.

use serde::{Deserialize, Serialize};

use super::mapping::SliderBounds;
use super::value::{SliderValue, Thumb};

/// Explicit ticks beyond this count fall back to [`FALLBACK_TICKS`] evenly spaced ones.
pub const MAX_STEP_TICKS: u64 = 101;
pub const FALLBACK_TICKS: usize = 11;

/// Purely visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPhase {
    Idle,
    Dragging(Thumb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderAccent {
    #[default]
    Primary,
    Success,
    Warning,
    Danger,
}

/// How values are shown next to the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValueFormat {
    Plain { decimals: usize },
    Percent,
    Currency { symbol: String },
    Suffix { decimals: usize, suffix: String },
}

impl Default for ValueFormat {
    fn default() -> Self {
        ValueFormat::Plain { decimals: 0 }
    }
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Plain { decimals } => format!("{value:.prec$}", prec = *decimals),
            ValueFormat::Percent => format!("{value:.0}%"),
            ValueFormat::Currency { symbol } => format!("{symbol}{value:.2}"),
            ValueFormat::Suffix { decimals, suffix } => {
                format!("{value:.prec$}{suffix}", prec = *decimals)
            }
        }
    }

    /// `"20 – 80"` for ranges, the plain value otherwise.
    pub fn format_value(&self, value: &SliderValue) -> String {
        match value {
            SliderValue::Single(v) => self.format(*v),
            SliderValue::Range { start, end } => {
                format!("{} – {}", self.format(*start), self.format(*end))
            }
        }
    }
}

/// Caller-supplied labeled position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub value: f64,
    pub label: String,
}

impl Mark {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkDescriptor {
    pub value: f64,
    pub percent: f64,
    pub label: String,
    /// Inside the filled part of the track.
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub percent: f64,
    pub in_range: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Filled,
    Unfilled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSegment {
    pub from: f64,
    pub to: f64,
    pub kind: SegmentKind,
}

/// Track fill computed from the current percent(s).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFill {
    segments: Vec<FillSegment>,
}

impl TrackFill {
    /// Two segments for single mode, three for range mode.
    pub fn new(bounds: &SliderBounds, value: &SliderValue) -> Self {
        let pct = |v: f64| bounds.value_to_percent(v).clamp(0.0, 100.0);
        let segments = match value {
            SliderValue::Single(v) => {
                let p = pct(*v);
                vec![
                    FillSegment {
                        from: 0.0,
                        to: p,
                        kind: SegmentKind::Filled,
                    },
                    FillSegment {
                        from: p,
                        to: 100.0,
                        kind: SegmentKind::Unfilled,
                    },
                ]
            }
            SliderValue::Range { start, end } => {
                let (a, b) = (pct(*start), pct(*end));
                vec![
                    FillSegment {
                        from: 0.0,
                        to: a,
                        kind: SegmentKind::Unfilled,
                    },
                    FillSegment {
                        from: a,
                        to: b,
                        kind: SegmentKind::Filled,
                    },
                    FillSegment {
                        from: b,
                        to: 100.0,
                        kind: SegmentKind::Unfilled,
                    },
                ]
            }
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[FillSegment] {
        &self.segments
    }

    /// Whether the track at `percent` is drawn filled. Boundaries count as filled.
    pub fn is_filled(&self, percent: f64) -> bool {
        self.segments
            .iter()
            .any(|s| s.kind == SegmentKind::Filled && percent >= s.from && percent <= s.to)
    }
}

/// Tick positions, in precedence order: explicit values, a tick count, one per step.
pub fn ticks(
    bounds: &SliderBounds,
    value: &SliderValue,
    show_ticks: bool,
    tick_count: Option<usize>,
    tick_values: &[f64],
) -> Vec<Tick> {
    let fill = TrackFill::new(bounds, value);
    let values: Vec<f64> = if !tick_values.is_empty() {
        let mut vals: Vec<f64> = tick_values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v >= bounds.min() && *v <= bounds.max())
            .collect();
        vals.sort_by(|a, b| a.total_cmp(b));
        vals.dedup();
        vals
    } else if let Some(count) = tick_count.filter(|c| *c >= 2) {
        evenly_spaced(bounds, count)
    } else if show_ticks {
        let steps = bounds.step_count();
        if steps < MAX_STEP_TICKS {
            (0..=steps)
                .map(|k| bounds.snap(bounds.min() + k as f64 * bounds.step()))
                .collect()
        } else {
            evenly_spaced(bounds, FALLBACK_TICKS)
        }
    } else {
        Vec::new()
    };

    values
        .into_iter()
        .map(|v| {
            let percent = bounds.value_to_percent(v);
            Tick {
                value: v,
                percent,
                in_range: fill.is_filled(percent),
            }
        })
        .collect()
}

fn evenly_spaced(bounds: &SliderBounds, count: usize) -> Vec<f64> {
    if bounds.is_degenerate() {
        return vec![bounds.min()];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| bounds.min() + bounds.span() * i as f64 / last)
        .collect()
}

/// Resolve marks against the current value. Out-of-range marks are dropped.
pub fn marks(bounds: &SliderBounds, value: &SliderValue, marks: &[Mark]) -> Vec<MarkDescriptor> {
    let fill = TrackFill::new(bounds, value);
    marks
        .iter()
        .filter(|m| m.value >= bounds.min() && m.value <= bounds.max())
        .map(|m| {
            let percent = bounds.value_to_percent(m.value);
            MarkDescriptor {
                value: m.value,
                percent,
                label: m.label.clone(),
                active: fill.is_filled(percent),
            }
        })
        .collect()
}
