//! Pointer capture and drag sessions.
//!
//! A terminal has no `document` to hang global listeners on, so the
//! application owns a [`PointerDocument`]: while a component holds a
//! [`ListenerGuard`] every pointer move and release is routed to it, even when
//! the pointer has left the component's bounds. Listeners are detached when
//! the guard is dropped, which happens on release, on teardown and when the
//! owning slider itself is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::value::{SliderValue, Thumb};

/// Identifies the component that owns a set of listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaptureOwner(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    listeners: Vec<(ListenerId, CaptureOwner, ListenerKind)>,
    next_id: u64,
    attached: u64,
    detached: u64,
}

impl Registry {
    fn register(&mut self, owner: CaptureOwner, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, owner, kind));
        id
    }
}

/// Application-wide pointer listener registry.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerDocument {
    inner: Rc<RefCell<Registry>>,
}

impl PointerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a move and an up listener for `owner`.
    pub fn attach(&self, owner: CaptureOwner) -> ListenerGuard {
        let mut registry = self.inner.borrow_mut();
        let ids = [
            registry.register(owner, ListenerKind::Move),
            registry.register(owner, ListenerKind::Up),
        ];
        registry.attached += 1;
        tracing::trace!(owner = owner.0, "pointer listeners attached");
        ListenerGuard {
            registry: Rc::clone(&self.inner),
            owner,
            ids,
        }
    }

    /// Component that receives routed pointer events, if any.
    ///
    /// The most recently attached listener wins.
    pub fn capture_owner(&self) -> Option<CaptureOwner> {
        self.listener_owner(ListenerKind::Move)
    }

    /// Owner of the most recent listener of `kind`.
    pub fn listener_owner(&self, kind: ListenerKind) -> Option<CaptureOwner> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .rev()
            .find(|(_, _, k)| *k == kind)
            .map(|(_, owner, _)| *owner)
    }

    pub fn active_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of listener sets ever attached.
    pub fn attach_count(&self) -> u64 {
        self.inner.borrow().attached
    }

    /// Number of listener sets ever detached.
    pub fn detach_count(&self) -> u64 {
        self.inner.borrow().detached
    }
}

/// Keeps a component's move/up listeners attached until dropped.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Rc<RefCell<Registry>>,
    owner: CaptureOwner,
    ids: [ListenerId; 2],
}

impl ListenerGuard {
    pub fn owner(&self) -> CaptureOwner {
        self.owner
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        registry.listeners.retain(|(id, _, _)| !self.ids.contains(id));
        registry.detached += 1;
        tracing::trace!(owner = self.owner.0, "pointer listeners detached");
    }
}

/// Track direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Pointer position in the same coordinate space as [`TrackRect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of the track at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TrackRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Percent along the track under `pos`, clamped to `[0, 100]`.
    ///
    /// Vertical tracks are inverted: the top edge is 100%.
    pub fn percent_at(&self, pos: PointerPos, orientation: Orientation) -> f64 {
        let (offset, length) = match orientation {
            Orientation::Horizontal => (pos.x - self.x, self.width),
            Orientation::Vertical => (self.y + self.height - pos.y, self.height),
        };
        if length <= 0.0 || !offset.is_finite() {
            return 0.0;
        }
        (offset / length * 100.0).clamp(0.0, 100.0)
    }

    /// Coordinate along the main axis for a percent (inverse of [`percent_at`]).
    ///
    /// [`percent_at`]: TrackRect::percent_at
    pub fn offset_of(&self, percent: f64, orientation: Orientation) -> f64 {
        let fraction = percent.clamp(0.0, 100.0) / 100.0;
        match orientation {
            Orientation::Horizontal => self.x + fraction * self.width,
            Orientation::Vertical => self.y + self.height - fraction * self.height,
        }
    }

    pub fn contains(&self, pos: PointerPos) -> bool {
        pos.x >= self.x
            && pos.x <= self.x + self.width
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }
}

/// State that lives between pointer-down and pointer-up.
#[derive(Debug)]
pub struct DragSession {
    thumb: Thumb,
    last_emitted: SliderValue,
    moved: bool,
    _guard: ListenerGuard,
}

impl DragSession {
    pub(crate) fn begin(thumb: Thumb, current: SliderValue, guard: ListenerGuard) -> Self {
        Self {
            thumb,
            last_emitted: current,
            moved: false,
            _guard: guard,
        }
    }

    pub fn thumb(&self) -> Thumb {
        self.thumb
    }

    /// Last value reported to the owner during this session.
    pub fn last_emitted(&self) -> SliderValue {
        self.last_emitted
    }

    /// Whether any `Change` has been reported in this session.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub(crate) fn record(&mut self, value: SliderValue) {
        self.last_emitted = value;
        self.moved = true;
    }

    /// Hand the gesture to the other range thumb. Only valid before the first move.
    pub(crate) fn retarget(&mut self, thumb: Thumb) {
        if !self.moved {
            self.thumb = thumb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_detaches_on_drop() {
        let doc = PointerDocument::new();
        {
            let guard = doc.attach(CaptureOwner(3));
            assert_eq!(guard.owner(), CaptureOwner(3));
            assert_eq!(doc.active_listeners(), 2);
            assert_eq!(doc.capture_owner(), Some(CaptureOwner(3)));
            assert_eq!(doc.listener_owner(ListenerKind::Up), Some(CaptureOwner(3)));
        }
        assert_eq!(doc.active_listeners(), 0);
        assert_eq!(doc.capture_owner(), None);
        assert_eq!(doc.attach_count(), 1);
        assert_eq!(doc.detach_count(), 1);
    }

    #[test]
    fn latest_capture_wins() {
        let doc = PointerDocument::new();
        let first = doc.attach(CaptureOwner(1));
        let second = doc.attach(CaptureOwner(2));
        assert_eq!(doc.capture_owner(), Some(CaptureOwner(2)));
        drop(second);
        assert_eq!(doc.capture_owner(), Some(CaptureOwner(1)));
        drop(first);
        assert_eq!(doc.attach_count(), doc.detach_count());
    }

    #[test]
    fn horizontal_percent() {
        let track = TrackRect::new(10.0, 0.0, 50.0, 0.0);
        let o = Orientation::Horizontal;
        assert_eq!(track.percent_at(PointerPos::new(10.0, 0.0), o), 0.0);
        assert_eq!(track.percent_at(PointerPos::new(35.0, 0.0), o), 50.0);
        assert_eq!(track.percent_at(PointerPos::new(60.0, 0.0), o), 100.0);
        assert_eq!(track.percent_at(PointerPos::new(-100.0, 7.0), o), 0.0);
        assert_eq!(track.percent_at(PointerPos::new(900.0, 7.0), o), 100.0);
    }

    #[test]
    fn vertical_percent_is_inverted() {
        let track = TrackRect::new(0.0, 2.0, 0.0, 10.0);
        let o = Orientation::Vertical;
        assert_eq!(track.percent_at(PointerPos::new(0.0, 12.0), o), 0.0);
        assert_eq!(track.percent_at(PointerPos::new(0.0, 2.0), o), 100.0);
        assert_eq!(track.percent_at(PointerPos::new(0.0, 4.0), o), 80.0);
    }

    #[test]
    fn zero_length_track_maps_to_zero() {
        let track = TrackRect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            track.percent_at(PointerPos::new(5.0, 5.0), Orientation::Horizontal),
            0.0
        );
    }

    #[test]
    fn offset_inverts_percent() {
        let track = TrackRect::new(4.0, 1.0, 20.0, 8.0);
        assert_eq!(track.offset_of(50.0, Orientation::Horizontal), 14.0);
        assert_eq!(track.offset_of(25.0, Orientation::Vertical), 7.0);
    }
}
