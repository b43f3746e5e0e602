//! Value and range slider with pointer-drag tracking.
//!
//! [`Slider`] is headless: it owns the value (when uncontrolled), the active
//! [`DragSession`] and the derived display data, and reports what happened
//! through [`SliderEvent`]s. Drawing is left to the front end.
//!
//! Control flow for a drag:
//! 1. `pointer_down(thumb)` attaches move/up listeners to the [`PointerDocument`]
//! 2. each `pointer_move` maps the pointer to a snapped value and emits `Change`
//! 3. `pointer_up` detaches the listeners and emits exactly one `ChangeComplete`
//!
//! Dropping the slider (or calling [`Slider::teardown`]) mid-drag detaches the
//! listeners without emitting anything.

pub mod drag;
pub mod mapping;
pub mod render;
pub mod track;
pub mod value;

pub use drag::{
    CaptureOwner, DragSession, ListenerGuard, ListenerKind, Orientation, PointerDocument,
    PointerPos, TrackRect,
};
pub use mapping::{SliderBounds, SliderError};
pub use render::{
    FillSegment, Mark, MarkDescriptor, SegmentKind, SliderAccent, SliderPhase, SliderSize, Tick,
    TrackFill, ValueFormat,
};
pub use value::{SliderValue, Thumb, ValueSource};

/// Configuration surface of a slider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderProps {
    pub bounds: SliderBounds,
    pub orientation: Orientation,
    pub show_ticks: bool,
    pub tick_count: Option<usize>,
    pub tick_values: Vec<f64>,
    pub marks: Vec<Mark>,
    pub disabled: bool,
    pub format: ValueFormat,
    pub size: SliderSize,
    pub accent: SliderAccent,
}

impl SliderProps {
    pub fn new(bounds: SliderBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn show_ticks(mut self, show: bool) -> Self {
        self.show_ticks = show;
        self
    }

    pub fn tick_count(mut self, count: usize) -> Self {
        self.tick_count = Some(count);
        self
    }

    pub fn tick_values(mut self, values: Vec<f64>) -> Self {
        self.tick_values = values;
        self
    }

    pub fn marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn size(mut self, size: SliderSize) -> Self {
        self.size = size;
        self
    }

    pub fn accent(mut self, accent: SliderAccent) -> Self {
        self.accent = accent;
        self
    }
}

/// Notification for the slider's owner.
///
/// The payload variant follows the slider: `Single` for a value slider,
/// `Range` for a range slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Live update while the value is moving.
    Change(SliderValue),
    /// The gesture finished; carries the last value reported by `Change`.
    ChangeComplete(SliderValue),
}

/// Result of feeding a pointer event to a slider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerOutcome {
    pub events: Vec<SliderEvent>,
    /// The event belonged to a drag and must not scroll anything.
    pub consumed: bool,
}

impl PointerOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed(events: Vec<SliderEvent>) -> Self {
        Self {
            events,
            consumed: true,
        }
    }

    /// Final value of the gesture, if the event completed one.
    pub fn completed(&self) -> Option<SliderValue> {
        self.events.iter().find_map(|e| match e {
            SliderEvent::ChangeComplete(v) => Some(*v),
            SliderEvent::Change(_) => None,
        })
    }
}

/// Keyboard jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Min,
    Max,
}

/// A mounted slider instance.
#[derive(Debug)]
pub struct Slider {
    id: CaptureOwner,
    props: SliderProps,
    source: ValueSource,
    document: PointerDocument,
    session: Option<DragSession>,
}

impl Slider {
    /// Mount a slider against the application's pointer document.
    ///
    /// The initial value is clamped and snapped to the bounds.
    pub fn mount(
        id: CaptureOwner,
        props: SliderProps,
        source: ValueSource,
        document: &PointerDocument,
    ) -> Self {
        let normalized = source.value().normalized(&props.bounds);
        if normalized != source.value() {
            tracing::debug!(
                id = id.0,
                given = ?source.value(),
                normalized = ?normalized,
                "slider value clamped to bounds"
            );
        }
        let source = match source {
            ValueSource::Controlled(_) => ValueSource::Controlled(normalized),
            ValueSource::Uncontrolled(_) => ValueSource::Uncontrolled(normalized),
        };
        Self {
            id,
            props,
            source,
            document: document.clone(),
            session: None,
        }
    }

    pub fn id(&self) -> CaptureOwner {
        self.id
    }

    pub fn props(&self) -> &SliderProps {
        &self.props
    }

    pub fn bounds(&self) -> &SliderBounds {
        &self.props.bounds
    }

    pub fn value(&self) -> SliderValue {
        self.source.value()
    }

    pub fn is_controlled(&self) -> bool {
        self.source.is_controlled()
    }

    /// Apply a value from the owner. Always normalized.
    pub fn set_value(&mut self, value: SliderValue) {
        self.source.set(value.normalized(&self.props.bounds));
    }

    /// Disabling mid-drag ends the session without a completion event.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        if disabled {
            self.teardown();
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn phase(&self) -> SliderPhase {
        match &self.session {
            Some(session) => SliderPhase::Dragging(session.thumb()),
            None => SliderPhase::Idle,
        }
    }

    pub fn active_thumb(&self) -> Option<Thumb> {
        self.session.as_ref().map(DragSession::thumb)
    }

    /// Track percent of a thumb, clamped for drawing.
    pub fn thumb_percent(&self, thumb: Thumb) -> Option<f64> {
        let value = self.value().get(thumb)?;
        Some(self.props.bounds.value_to_percent(value).clamp(0.0, 100.0))
    }

    /// Thumb under `pos`, within `tolerance` percent.
    pub fn thumb_at(&self, pos: PointerPos, track: &TrackRect, tolerance: f64) -> Option<Thumb> {
        let percent = track.percent_at(pos, self.props.orientation);
        track::thumb_at(&self.props.bounds, &self.value(), percent, tolerance)
    }

    /// Start a drag on `thumb`.
    pub fn pointer_down(&mut self, thumb: Thumb) -> PointerOutcome {
        if self.props.disabled || !self.value().thumbs().contains(&thumb) {
            return PointerOutcome::ignored();
        }
        // A stray second press replaces the session; the old guard detaches first.
        self.teardown();
        let guard = self.document.attach(self.id);
        self.session = Some(DragSession::begin(thumb, self.value(), guard));
        tracing::debug!(id = self.id.0, ?thumb, "drag started");
        PointerOutcome::consumed(Vec::new())
    }

    /// Follow the pointer during a drag.
    pub fn pointer_move(&mut self, pos: PointerPos, track: &TrackRect) -> PointerOutcome {
        if self.props.disabled {
            return PointerOutcome::ignored();
        }
        let Some(session) = self.session.as_mut() else {
            return PointerOutcome::ignored();
        };
        let percent = track.percent_at(pos, self.props.orientation);
        let candidate = self.props.bounds.percent_to_value(percent);
        let previous = session.last_emitted();
        // Touching range thumbs: the first move's direction decides which one leaves.
        if let SliderValue::Range { start, end } = previous {
            if start == end && !session.has_moved() && candidate != start {
                let thumb = if candidate > start { Thumb::End } else { Thumb::Start };
                if thumb != session.thumb() {
                    tracing::debug!(id = self.id.0, ?thumb, "drag handed to other thumb");
                    session.retarget(thumb);
                }
            }
        }
        let next = previous.with_thumb(session.thumb(), candidate);
        if next == previous {
            return PointerOutcome::consumed(Vec::new());
        }
        session.record(next);
        if !self.source.is_controlled() {
            self.source.set(next);
        }
        PointerOutcome::consumed(vec![SliderEvent::Change(next)])
    }

    /// Finish the drag. Emits exactly one `ChangeComplete` when a drag was active.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        let Some(session) = self.session.take() else {
            return PointerOutcome::ignored();
        };
        let final_value = session.last_emitted();
        drop(session);
        tracing::debug!(id = self.id.0, value = ?final_value, "drag finished");
        PointerOutcome::consumed(vec![SliderEvent::ChangeComplete(final_value)])
    }

    /// Jump the nearer thumb to a click on the track.
    pub fn track_click(&mut self, pos: PointerPos, track: &TrackRect) -> PointerOutcome {
        if self.props.disabled || self.session.is_some() {
            return PointerOutcome::ignored();
        }
        let percent = track.percent_at(pos, self.props.orientation);
        let thumb = track::nearest_thumb(&self.props.bounds, &self.value(), percent);
        let candidate = self.props.bounds.percent_to_value(percent);
        PointerOutcome::consumed(self.commit(thumb, candidate))
    }

    /// Move a thumb by whole steps (keyboard).
    pub fn step_by(&mut self, thumb: Thumb, steps: i64) -> Vec<SliderEvent> {
        if self.props.disabled || self.session.is_some() {
            return Vec::new();
        }
        let Some(current) = self.value().get(thumb) else {
            return Vec::new();
        };
        let target = self
            .props
            .bounds
            .snap(current + steps as f64 * self.props.bounds.step());
        self.commit(thumb, target)
    }

    /// Move a thumb to one end of the track (keyboard).
    pub fn jump_to(&mut self, thumb: Thumb, edge: Edge) -> Vec<SliderEvent> {
        if self.props.disabled || self.session.is_some() || self.value().get(thumb).is_none() {
            return Vec::new();
        }
        let target = match edge {
            Edge::Min => self.props.bounds.min(),
            Edge::Max => self.props.bounds.max_reachable(),
        };
        self.commit(thumb, target)
    }

    /// Drop an active drag without completing it. Safe to call at any time.
    pub fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(
                id = self.id.0,
                thumb = ?session.thumb(),
                "drag abandoned on teardown"
            );
        }
    }

    pub fn fill(&self) -> TrackFill {
        TrackFill::new(&self.props.bounds, &self.value())
    }

    pub fn ticks(&self) -> Vec<Tick> {
        render::ticks(
            &self.props.bounds,
            &self.value(),
            self.props.show_ticks,
            self.props.tick_count,
            &self.props.tick_values,
        )
    }

    pub fn marks(&self) -> Vec<MarkDescriptor> {
        render::marks(&self.props.bounds, &self.value(), &self.props.marks)
    }

    pub fn label(&self) -> String {
        self.props.format.format_value(&self.value())
    }

    /// Set a thumb in one gesture: `Change` when the value moved, then `ChangeComplete`.
    fn commit(&mut self, thumb: Thumb, candidate: f64) -> Vec<SliderEvent> {
        let current = self.value();
        let next = current.with_thumb(thumb, candidate);
        let mut events = Vec::with_capacity(2);
        if next != current {
            if !self.source.is_controlled() {
                self.source.set(next);
            }
            events.push(SliderEvent::Change(next));
        }
        events.push(SliderEvent::ChangeComplete(next));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> TrackRect {
        TrackRect::new(0.0, 0.0, 100.0, 0.0)
    }

    fn at(x: f64) -> PointerPos {
        PointerPos::new(x, 0.0)
    }

    fn range_slider(doc: &PointerDocument, start: f64, end: f64) -> Slider {
        Slider::mount(
            CaptureOwner(1),
            SliderProps::new(SliderBounds::default()),
            ValueSource::Uncontrolled(SliderValue::range(start, end)),
            doc,
        )
    }

    fn single_slider(doc: &PointerDocument, value: f64) -> Slider {
        Slider::mount(
            CaptureOwner(2),
            SliderProps::new(SliderBounds::default()),
            ValueSource::Uncontrolled(SliderValue::Single(value)),
            doc,
        )
    }

    #[test]
    fn mount_clamps_out_of_range_value() {
        let doc = PointerDocument::new();
        let s = single_slider(&doc, -5.0);
        assert_eq!(s.value(), SliderValue::Single(0.0));
    }

    #[test]
    fn drag_updates_and_completes_once() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 10.0);

        let down = s.pointer_down(Thumb::Single);
        assert!(down.consumed);
        assert_eq!(s.phase(), SliderPhase::Dragging(Thumb::Single));
        assert_eq!(doc.active_listeners(), 2);

        let mv = s.pointer_move(at(42.0), &track());
        assert_eq!(mv.events, vec![SliderEvent::Change(SliderValue::Single(42.0))]);
        let mv = s.pointer_move(at(57.3), &track());
        assert_eq!(mv.events, vec![SliderEvent::Change(SliderValue::Single(57.0))]);

        let up = s.pointer_up();
        assert_eq!(up.completed(), Some(SliderValue::Single(57.0)));
        assert_eq!(up.events.len(), 1);
        assert_eq!(s.phase(), SliderPhase::Idle);
        assert_eq!(doc.active_listeners(), 0);
        assert_eq!(doc.attach_count(), doc.detach_count());

        assert_eq!(s.pointer_up(), PointerOutcome::default());
    }

    #[test]
    fn drag_outside_track_keeps_tracking() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 50.0);
        s.pointer_down(Thumb::Single);
        let mv = s.pointer_move(PointerPos::new(400.0, 30.0), &track());
        assert_eq!(mv.events, vec![SliderEvent::Change(SliderValue::Single(100.0))]);
    }

    #[test]
    fn repeated_position_emits_nothing() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 50.0);
        s.pointer_down(Thumb::Single);
        let mv = s.pointer_move(at(50.2), &track());
        assert!(mv.events.is_empty());
        assert!(mv.consumed);
        assert_eq!(s.pointer_up().completed(), Some(SliderValue::Single(50.0)));
    }

    #[test]
    fn range_thumbs_never_cross_during_drag() {
        let doc = PointerDocument::new();
        let mut s = range_slider(&doc, 20.0, 80.0);
        s.pointer_down(Thumb::Start);
        s.pointer_move(at(90.0), &track());
        assert_eq!(s.value(), SliderValue::range(80.0, 80.0));
        s.pointer_move(at(10.0), &track());
        assert_eq!(s.value(), SliderValue::range(10.0, 80.0));
        s.pointer_up();

        s.pointer_down(Thumb::End);
        s.pointer_move(at(0.0), &track());
        assert_eq!(s.value(), SliderValue::range(10.0, 10.0));
    }

    #[test]
    fn touching_thumbs_split_in_the_first_move_direction() {
        let doc = PointerDocument::new();
        let mut s = range_slider(&doc, 0.0, 0.0);
        let grabbed = s.thumb_at(at(0.0), &track(), 2.0).unwrap();
        s.pointer_down(grabbed);
        let mv = s.pointer_move(at(60.0), &track());
        assert_eq!(mv.events, vec![SliderEvent::Change(SliderValue::range(0.0, 60.0))]);
        assert_eq!(s.active_thumb(), Some(Thumb::End));
        assert_eq!(s.pointer_up().completed(), Some(SliderValue::range(0.0, 60.0)));

        let mut s = range_slider(&doc, 50.0, 50.0);
        s.pointer_down(Thumb::End);
        s.pointer_move(at(30.0), &track());
        assert_eq!(s.value(), SliderValue::range(30.0, 50.0));
        assert_eq!(s.active_thumb(), Some(Thumb::Start));
        // Once moving, the thumb is fixed: coming back clamps instead of switching.
        s.pointer_move(at(70.0), &track());
        assert_eq!(s.value(), SliderValue::range(50.0, 50.0));
        assert_eq!(s.active_thumb(), Some(Thumb::Start));
        s.pointer_up();
        assert_eq!(doc.active_listeners(), 0);
    }

    #[test]
    fn track_click_moves_closer_thumb() {
        let doc = PointerDocument::new();
        let mut s = range_slider(&doc, 20.0, 80.0);
        let out = s.track_click(at(30.0), &track());
        assert_eq!(s.value(), SliderValue::range(30.0, 80.0));
        assert_eq!(out.completed(), Some(SliderValue::range(30.0, 80.0)));
        assert_eq!(doc.attach_count(), 0);
    }

    #[test]
    fn single_track_click_completes_immediately() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 0.0);
        let out = s.track_click(at(64.0), &track());
        assert_eq!(
            out.events,
            vec![
                SliderEvent::Change(SliderValue::Single(64.0)),
                SliderEvent::ChangeComplete(SliderValue::Single(64.0)),
            ]
        );
        assert_eq!(s.phase(), SliderPhase::Idle);
    }

    #[test]
    fn controlled_slider_waits_for_owner() {
        let doc = PointerDocument::new();
        let mut s = Slider::mount(
            CaptureOwner(9),
            SliderProps::new(SliderBounds::default()),
            ValueSource::Controlled(SliderValue::Single(10.0)),
            &doc,
        );
        s.pointer_down(Thumb::Single);
        let mv = s.pointer_move(at(70.0), &track());
        assert_eq!(mv.events, vec![SliderEvent::Change(SliderValue::Single(70.0))]);
        assert_eq!(s.value(), SliderValue::Single(10.0));
        let up = s.pointer_up();
        assert_eq!(up.completed(), Some(SliderValue::Single(70.0)));
        s.set_value(SliderValue::Single(70.0));
        assert_eq!(s.value(), SliderValue::Single(70.0));
    }

    #[test]
    fn disabled_slider_ignores_everything() {
        let doc = PointerDocument::new();
        let mut s = Slider::mount(
            CaptureOwner(4),
            SliderProps::new(SliderBounds::default()).disabled(true),
            ValueSource::Uncontrolled(SliderValue::Single(25.0)),
            &doc,
        );
        assert_eq!(s.pointer_down(Thumb::Single), PointerOutcome::default());
        assert_eq!(s.pointer_move(at(90.0), &track()), PointerOutcome::default());
        assert_eq!(s.pointer_up(), PointerOutcome::default());
        assert_eq!(s.track_click(at(90.0), &track()), PointerOutcome::default());
        assert!(s.step_by(Thumb::Single, 3).is_empty());
        assert!(s.jump_to(Thumb::Single, Edge::Max).is_empty());
        assert_eq!(s.value(), SliderValue::Single(25.0));
        assert_eq!(doc.attach_count(), 0);
    }

    #[test]
    fn disabling_mid_drag_detaches_without_completion() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 25.0);
        s.pointer_down(Thumb::Single);
        s.set_disabled(true);
        assert_eq!(doc.active_listeners(), 0);
        assert_eq!(s.pointer_up(), PointerOutcome::default());
    }

    #[test]
    fn teardown_and_drop_release_listeners() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 25.0);
        s.pointer_down(Thumb::Single);
        s.teardown();
        assert_eq!(doc.active_listeners(), 0);

        s.pointer_down(Thumb::Single);
        drop(s);
        assert_eq!(doc.active_listeners(), 0);
        assert_eq!(doc.attach_count(), 2);
        assert_eq!(doc.detach_count(), 2);
    }

    #[test]
    fn second_press_replaces_session() {
        let doc = PointerDocument::new();
        let mut s = range_slider(&doc, 20.0, 80.0);
        s.pointer_down(Thumb::Start);
        s.pointer_down(Thumb::End);
        assert_eq!(doc.active_listeners(), 2);
        assert_eq!(s.active_thumb(), Some(Thumb::End));
    }

    #[test]
    fn foreign_thumb_is_ignored() {
        let doc = PointerDocument::new();
        let mut s = single_slider(&doc, 25.0);
        assert!(!s.pointer_down(Thumb::Start).consumed);
        assert_eq!(doc.attach_count(), 0);
    }

    #[test]
    fn keyboard_steps_respect_bounds_and_order() {
        let doc = PointerDocument::new();
        let mut s = range_slider(&doc, 20.0, 30.0);
        s.step_by(Thumb::Start, 15);
        assert_eq!(s.value(), SliderValue::range(30.0, 30.0));
        s.jump_to(Thumb::End, Edge::Max);
        assert_eq!(s.value(), SliderValue::range(30.0, 100.0));
        let events = s.step_by(Thumb::End, 5);
        assert_eq!(
            events,
            vec![SliderEvent::ChangeComplete(SliderValue::range(30.0, 100.0))]
        );
    }

    #[test]
    fn vertical_drag_goes_up() {
        let doc = PointerDocument::new();
        let mut s = Slider::mount(
            CaptureOwner(5),
            SliderProps::new(SliderBounds::default()).orientation(Orientation::Vertical),
            ValueSource::Uncontrolled(SliderValue::Single(0.0)),
            &doc,
        );
        let track = TrackRect::new(0.0, 0.0, 0.0, 20.0);
        s.pointer_down(Thumb::Single);
        s.pointer_move(PointerPos::new(0.0, 5.0), &track);
        assert_eq!(s.value(), SliderValue::Single(75.0));
    }
}
