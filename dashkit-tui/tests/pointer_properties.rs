//! Property tests for mouse routing across the whole gallery.
//!
//! Random press/drag/release/wheel sequences on the sliders page, including
//! presses whose release never arrives, must keep:
//! 1. At most one slider dragging and at most one guard attached
//! 2. Every range slider ordered (`start <= end`)
//! 3. Attach and detach counts balanced once the pointer is released

use std::path::PathBuf;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use proptest::prelude::*;

use dashkit_core::catalog::Page;
use dashkit_core::config::ShowcaseConfig;
use dashkit_tui::app::AppState;
use dashkit_tui::{handle_key, handle_mouse};

#[derive(Debug, Clone)]
enum Gesture {
    Down(u16, u16),
    Drag(u16, u16),
    Up,
    Wheel(bool),
    Escape,
}

/// Presses stay in the page body so the sliders page keeps the focus;
/// drags roam the whole 100x30 screen.
fn arb_gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        3 => (21u16..99, 2u16..28).prop_map(|(x, y)| Gesture::Down(x, y)),
        5 => (0u16..100, 0u16..30).prop_map(|(x, y)| Gesture::Drag(x, y)),
        2 => Just(Gesture::Up),
        1 => any::<bool>().prop_map(Gesture::Wheel),
        1 => Just(Gesture::Escape),
    ]
}

fn mouse(app: &mut AppState, kind: MouseEventKind, x: u16, y: u16) {
    handle_mouse(
        app,
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        },
    );
}

fn apply(app: &mut AppState, gesture: &Gesture) {
    match *gesture {
        Gesture::Down(x, y) => mouse(app, MouseEventKind::Down(MouseButton::Left), x, y),
        Gesture::Drag(x, y) => mouse(app, MouseEventKind::Drag(MouseButton::Left), x, y),
        Gesture::Up => mouse(app, MouseEventKind::Up(MouseButton::Left), 0, 0),
        Gesture::Wheel(down) => {
            let kind = if down {
                MouseEventKind::ScrollDown
            } else {
                MouseEventKind::ScrollUp
            };
            mouse(app, kind, 50, 15);
        }
        Gesture::Escape => handle_key(app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
    }
}

fn dragging(app: &AppState) -> usize {
    app.sliders
        .entries
        .iter()
        .filter(|e| e.slider.active_thumb().is_some())
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn one_drag_at_a_time(gestures in prop::collection::vec(arb_gesture(), 1..60)) {
        let mut app = AppState::new(ShowcaseConfig::default(), PathBuf::from("."));
        app.set_page(Page::Sliders);

        for gesture in &gestures {
            apply(&mut app, gesture);
            prop_assert!(dragging(&app) <= 1, "after {:?}", gesture);
            prop_assert!(app.document.active_listeners() <= 2, "after {:?}", gesture);
            prop_assert!(app.document.attach_count() - app.document.detach_count() <= 1);
            let (start, end) = app.sliders.range_value();
            prop_assert!(start <= end, "range crossed: {} > {}", start, end);
        }

        apply(&mut app, &Gesture::Up);
        prop_assert_eq!(dragging(&app), 0);
        prop_assert_eq!(app.document.active_listeners(), 0);
        prop_assert_eq!(app.document.attach_count(), app.document.detach_count());
    }
}
