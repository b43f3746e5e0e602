//! End-to-end sessions: draw every page on a test backend and drive sliders
//! with the same mouse events the terminal would deliver.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::Terminal;

use dashkit_core::catalog::Page;
use dashkit_core::config::ShowcaseConfig;
use dashkit_core::slider::{SliderValue, Thumb};
use dashkit_tui::app::{AppState, Overlay};
use dashkit_tui::gallery::{OPACITY, PRICE};
use dashkit_tui::ui::pages::sliders;
use dashkit_tui::ui::screen_layout;
use dashkit_tui::ui::widgets::slider::{cell_at, track_area};
use dashkit_tui::{handle_key, handle_mouse, ui};

fn app() -> AppState {
    AppState::new(ShowcaseConfig::default(), PathBuf::from("."))
}

fn draw(app: &mut AppState) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal
        .draw(|f| {
            app.viewport = f.area();
            ui::draw(f, app);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

fn text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn mouse(app: &mut AppState, kind: MouseEventKind, pos: Position) {
    handle_mouse(
        app,
        MouseEvent {
            kind,
            column: pos.x,
            row: pos.y,
            modifiers: KeyModifiers::NONE,
        },
    );
}

fn thumb_cell(app: &AppState, idx: usize, thumb: Thumb) -> (Position, ratatui::layout::Rect) {
    let body = screen_layout(app.viewport).body;
    let area = sliders::layout(body, &app.sliders).slot(idx).unwrap();
    let orientation = app.sliders.entries[idx].slider.props().orientation;
    let track = track_area(area, orientation);
    let pct = app.sliders.entries[idx].slider.thumb_percent(thumb).unwrap();
    (cell_at(track, orientation, pct), track)
}

#[test]
fn every_page_renders_its_title() {
    let mut app = app();
    for page in Page::ALL {
        app.set_page(page);
        let screen = text(&draw(&mut app));
        assert!(screen.contains(page.label()), "{} missing:\n{screen}", page.label());
    }
}

#[test]
fn overlays_render_on_top() {
    let mut app = app();
    app.overlay = Overlay::Help;
    let screen = text(&draw(&mut app));
    assert!(screen.contains("Help"));
    handle_key(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.overlay, Overlay::None);
}

#[test]
fn range_drag_cannot_cross_and_completes_once() {
    let mut app = app();
    app.set_page(Page::Sliders);
    draw(&mut app);

    let (end, track) = thumb_cell(&app, PRICE, Thumb::End);
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), end);
    assert_eq!(app.sliders.entries[PRICE].slider.active_thumb(), Some(Thumb::End));

    // Drag the end thumb far past the start thumb, off the left of the track.
    for x in (track.x.saturating_sub(5)..end.x).rev() {
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), Position::new(x, end.y + 3));
    }
    let (start, finish) = app.sliders.range_value();
    assert_eq!(start, 200.0);
    assert_eq!(finish, 200.0);

    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), Position::new(0, 0));
    assert_eq!(app.sliders.completions, 1);
    assert_eq!(app.document.active_listeners(), 0);
    assert_eq!(app.document.attach_count(), app.document.detach_count());

    // A stray release after the gesture does nothing.
    mouse(&mut app, MouseEventKind::Up(MouseButton::Left), Position::new(0, 0));
    assert_eq!(app.sliders.completions, 1);
}

#[test]
fn controlled_slider_follows_its_owner() {
    let mut app = app();
    app.set_page(Page::Sliders);
    draw(&mut app);

    let (_, track) = thumb_cell(&app, OPACITY, Thumb::Single);
    let right_end = Position::new(track.right() - 1, track.y);
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), right_end);
    assert_eq!(
        app.sliders.entries[OPACITY].slider.value(),
        SliderValue::Single(90.0)
    );
    let status = &app.status_message.as_ref().unwrap().0;
    assert!(status.contains("owner kept 90%"), "{status}");
}

#[test]
fn switching_pages_mid_drag_cleans_up() {
    let mut app = app();
    app.set_page(Page::Sliders);
    draw(&mut app);
    let (grab, _) = thumb_cell(&app, PRICE, Thumb::Start);
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), grab);
    assert!(app.sliders.is_dragging());

    handle_key(&mut app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    assert!(!app.sliders.is_dragging());
    assert_eq!(app.document.active_listeners(), 0);

    // Motion after teardown is not routed anywhere.
    let before = app.sliders.range_value();
    mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), Position::new(90, 10));
    assert_eq!(app.sliders.range_value(), before);
    assert_eq!(app.sliders.completions, 0);
}
