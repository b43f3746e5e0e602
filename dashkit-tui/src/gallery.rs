//! Slider gallery state — the demo instances on the Sliders page.

use std::collections::VecDeque;

use dashkit_core::config::SliderConfig;
use dashkit_core::slider::{
    CaptureOwner, Mark, Orientation, PointerDocument, Slider, SliderAccent, SliderBounds,
    SliderEvent, SliderProps, SliderSize, SliderValue, Thumb, ValueFormat, ValueSource,
};

pub const VOLUME: usize = 0;
pub const PRICE: usize = 1;
pub const TEMPERATURE: usize = 2;
pub const OPACITY: usize = 3;
pub const LOCKED: usize = 4;
pub const GAIN: usize = 5;

/// The controlled slider's owner refuses values above this.
pub const OPACITY_CAP: f64 = 90.0;

const LOG_CAPACITY: usize = 6;

#[derive(Debug)]
pub struct GalleryEntry {
    pub title: &'static str,
    pub hint: &'static str,
    pub slider: Slider,
}

#[derive(Debug)]
pub struct SliderGallery {
    pub entries: Vec<GalleryEntry>,
    pub focus: usize,
    /// Which end of a range slider the keyboard moves.
    pub focus_thumb: Thumb,
    /// Most recent completions, newest first.
    pub log: VecDeque<String>,
    pub changes: u64,
    pub completions: u64,
}

impl SliderGallery {
    pub fn new(document: &PointerDocument, config: &SliderConfig) -> Self {
        let entry = |idx: usize, title, hint, props: SliderProps, source| GalleryEntry {
            title,
            hint,
            slider: Slider::mount(CaptureOwner(idx as u32 + 1), props, source, document),
        };

        let entries = vec![
            entry(
                VOLUME,
                "Volume",
                "single value, uncontrolled",
                SliderProps::new(SliderBounds::sanitized(0.0, 100.0, config.default_step))
                    .show_ticks(config.show_ticks)
                    .format(ValueFormat::Percent),
                ValueSource::Uncontrolled(SliderValue::Single(40.0)),
            ),
            entry(
                PRICE,
                "Price range",
                "range, ticks on every step",
                SliderProps::new(SliderBounds::sanitized(0.0, 1000.0, 50.0))
                    .show_ticks(true)
                    .accent(SliderAccent::Success)
                    .format(ValueFormat::Currency {
                        symbol: "$".into(),
                    }),
                ValueSource::Uncontrolled(SliderValue::range(200.0, 750.0)),
            ),
            entry(
                TEMPERATURE,
                "Temperature",
                "marks, half-degree steps",
                SliderProps::new(SliderBounds::sanitized(-10.0, 40.0, 0.5))
                    .marks(vec![
                        Mark::new(0.0, "freeze"),
                        Mark::new(21.0, "room"),
                        Mark::new(37.0, "body"),
                    ])
                    .accent(SliderAccent::Warning)
                    .size(SliderSize::Large)
                    .format(ValueFormat::Suffix {
                        decimals: 1,
                        suffix: "°C".into(),
                    }),
                ValueSource::Uncontrolled(SliderValue::Single(21.0)),
            ),
            entry(
                OPACITY,
                "Opacity",
                "controlled, owner caps at 90%",
                SliderProps::new(SliderBounds::sanitized(0.0, 100.0, 5.0))
                    .tick_count(5)
                    .size(SliderSize::Small)
                    .format(ValueFormat::Percent),
                ValueSource::Controlled(SliderValue::Single(60.0)),
            ),
            entry(
                LOCKED,
                "Locked",
                "disabled",
                SliderProps::new(SliderBounds::sanitized(0.0, 100.0, 1.0)).disabled(true),
                ValueSource::Uncontrolled(SliderValue::range(25.0, 60.0)),
            ),
            entry(
                GAIN,
                "Gain",
                "vertical",
                SliderProps::new(SliderBounds::sanitized(0.0, 10.0, 1.0))
                    .orientation(Orientation::Vertical)
                    .tick_count(11)
                    .accent(SliderAccent::Danger)
                    .format(ValueFormat::Suffix {
                        decimals: 0,
                        suffix: " dB".into(),
                    }),
                ValueSource::Uncontrolled(SliderValue::Single(6.0)),
            ),
        ];

        Self {
            entries,
            focus: 0,
            focus_thumb: Thumb::Start,
            log: VecDeque::with_capacity(LOG_CAPACITY),
            changes: 0,
            completions: 0,
        }
    }

    pub fn index_of(&self, owner: CaptureOwner) -> Option<usize> {
        self.entries.iter().position(|e| e.slider.id() == owner)
    }

    pub fn focused(&self) -> &GalleryEntry {
        &self.entries[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut GalleryEntry {
        &mut self.entries[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.entries.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.entries.len() - 1) % self.entries.len();
    }

    /// Keyboard thumb of the focused slider.
    pub fn focused_thumb(&self) -> Thumb {
        if self.focused().slider.value().is_range() {
            self.focus_thumb
        } else {
            Thumb::Single
        }
    }

    pub fn toggle_thumb(&mut self) {
        self.focus_thumb = match self.focus_thumb {
            Thumb::Start => Thumb::End,
            _ => Thumb::Start,
        };
    }

    pub fn is_dragging(&self) -> bool {
        self.entries.iter().any(|e| e.slider.active_thumb().is_some())
    }

    /// Feed a slider's events back into the gallery.
    ///
    /// Returns a status line when a gesture completed.
    pub fn apply(&mut self, idx: usize, events: Vec<SliderEvent>) -> Option<String> {
        let mut status = None;
        for event in events {
            match event {
                SliderEvent::Change(value) => {
                    self.changes += 1;
                    let entry = &mut self.entries[idx];
                    if entry.slider.is_controlled() {
                        entry.slider.set_value(owner_accepts(idx, value));
                    }
                }
                SliderEvent::ChangeComplete(value) => {
                    self.completions += 1;
                    let entry = &self.entries[idx];
                    let shown = entry.slider.props().format.format_value(&value);
                    let line = if entry.slider.is_controlled() && value != entry.slider.value() {
                        format!(
                            "{}: asked {shown}, owner kept {}",
                            entry.title,
                            entry.slider.label()
                        )
                    } else {
                        format!("{}: {shown}", entry.title)
                    };
                    tracing::debug!(slider = entry.title, %shown, "slider change complete");
                    if self.log.len() == LOG_CAPACITY {
                        self.log.pop_back();
                    }
                    self.log.push_front(line.clone());
                    status = Some(line);
                }
            }
        }
        status
    }

    /// Abandon every drag in progress (page switch, shutdown).
    pub fn teardown_all(&mut self) {
        for entry in &mut self.entries {
            entry.slider.teardown();
        }
    }

    pub fn single_value(&self) -> f64 {
        self.entries[VOLUME]
            .slider
            .value()
            .get(Thumb::Single)
            .unwrap_or_default()
    }

    pub fn range_value(&self) -> (f64, f64) {
        let value = self.entries[PRICE].slider.value();
        (
            value.get(Thumb::Start).unwrap_or_default(),
            value.get(Thumb::End).unwrap_or_default(),
        )
    }

    /// Restore persisted values; out-of-range input is clamped by the sliders.
    pub fn restore(&mut self, single: f64, range: (f64, f64)) {
        self.entries[VOLUME]
            .slider
            .set_value(SliderValue::Single(single));
        self.entries[PRICE]
            .slider
            .set_value(SliderValue::range(range.0, range.1));
    }
}

/// What the owner of a controlled slider stores for a requested value.
fn owner_accepts(idx: usize, requested: SliderValue) -> SliderValue {
    match (idx, requested) {
        (OPACITY, SliderValue::Single(v)) => SliderValue::Single(v.min(OPACITY_CAP)),
        (_, other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> (PointerDocument, SliderGallery) {
        let doc = PointerDocument::new();
        let gallery = SliderGallery::new(&doc, &SliderConfig::default());
        (doc, gallery)
    }

    #[test]
    fn owners_are_unique() {
        let (_doc, g) = gallery();
        for (i, e) in g.entries.iter().enumerate() {
            assert_eq!(g.index_of(e.slider.id()), Some(i));
        }
    }

    #[test]
    fn controlled_owner_caps_value() {
        let (_doc, mut g) = gallery();
        let events = g.entries[OPACITY].slider.step_by(Thumb::Single, 10);
        let status = g.apply(OPACITY, events).unwrap();
        assert_eq!(g.entries[OPACITY].slider.value(), SliderValue::Single(90.0));
        assert!(status.contains("owner kept 90%"), "{status}");
    }

    #[test]
    fn log_is_bounded_and_newest_first() {
        let (_doc, mut g) = gallery();
        for _ in 0..10 {
            let events = g.entries[VOLUME].slider.step_by(Thumb::Single, 1);
            g.apply(VOLUME, events);
        }
        assert_eq!(g.log.len(), LOG_CAPACITY);
        assert_eq!(g.log[0], "Volume: 50%");
        assert_eq!(g.completions, 10);
    }

    #[test]
    fn restore_clamps() {
        let (_doc, mut g) = gallery();
        g.restore(250.0, (900.0, 100.0));
        assert_eq!(g.single_value(), 100.0);
        assert_eq!(g.range_value(), (100.0, 900.0));
    }

    #[test]
    fn focus_wraps_and_thumb_follows_mode() {
        let (_doc, mut g) = gallery();
        g.focus_prev();
        assert_eq!(g.focus, GAIN);
        assert_eq!(g.focused_thumb(), Thumb::Single);
        g.focus = PRICE;
        assert_eq!(g.focused_thumb(), Thumb::Start);
        g.toggle_thumb();
        assert_eq!(g.focused_thumb(), Thumb::End);
    }

    #[test]
    fn teardown_all_detaches() {
        let (doc, mut g) = gallery();
        g.entries[PRICE].slider.pointer_down(Thumb::End);
        assert!(g.is_dragging());
        g.teardown_all();
        assert!(!g.is_dragging());
        assert_eq!(doc.attach_count(), doc.detach_count());
    }
}
