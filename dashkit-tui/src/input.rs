//! Input dispatch — overlays → global keys → page handlers, plus mouse routing.
//!
//! Mouse hit-testing reuses the layout functions the renderers draw with, so
//! a click always lands on what is on screen. Drag and release events go to
//! whichever slider holds pointer capture, wherever the pointer is.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, Borders};

use dashkit_core::catalog::Page;
use dashkit_core::slider::{Edge, SliderEvent};

use crate::app::{AppState, DrawerSide, ErrorCategory, ModalKind, Overlay, CONFIRM_SUBJECT, DRAWER_SETTINGS};
use crate::ui::pages::grid::GridHit;
use crate::ui::pages::select::SelectHit;
use crate::ui::pages::upload::UploadHit;
use crate::ui::pages::{grid, heatmap, select, sliders, tree, upload};
use crate::ui::widgets::slider::{cell_tolerance, hit_zone, pointer, track_area, track_rect};
use crate::ui::{centered_rect, nav, overlays, screen_layout, ScreenLayout};

const FORM_INPUT_MAX: usize = 32;
const BREADCRUMB_MAX_ITEMS: usize = 8;
const BREADCRUMB_MIN_ITEMS: usize = 2;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Modal(kind) => {
            handle_modal(app, kind, key);
            return;
        }
        Overlay::Drawer(side) => {
            handle_drawer(app, side, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. An open dropdown takes typed text before global keys.
    if app.page == Page::Select && app.selects.is_capturing_text() {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            app.selects.close_all();
        } else {
            handle_open_select_key(app, key);
            return;
        }
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            app.set_page(app.page.next());
            return;
        }
        KeyCode::BackTab => {
            app.set_page(app.page.prev());
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 4. Page-specific keys.
    match app.page {
        Page::Overview | Page::Cards => {}
        Page::Breadcrumbs => handle_breadcrumbs_key(app, key),
        Page::Modals => handle_modals_key(app, key),
        Page::Drawers => handle_drawers_key(app, key),
        Page::Sliders => handle_sliders_key(app, key),
        Page::Select => handle_select_key(app, key),
        Page::DataGrid => handle_grid_key(app, key),
        Page::TreeView => handle_tree_key(app, key),
        Page::FileUpload => handle_upload_key(app, key),
        Page::Heatmap => handle_heatmap_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => scroll_errors(app, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll_errors(app, -1),
        _ => {}
    }
}

fn scroll_errors(app: &mut AppState, delta: i32) {
    if delta > 0 {
        if app.error_scroll + 1 < app.error_history.len() {
            app.error_scroll += 1;
        }
    } else {
        app.error_scroll = app.error_scroll.saturating_sub(1);
    }
}

fn close_modal(app: &mut AppState, action: impl Into<String>) {
    let action = action.into();
    app.set_status(action.clone());
    app.demo.last_action = Some(action);
    app.demo.form_input.clear();
    app.overlay = Overlay::None;
}

fn handle_modal(app: &mut AppState, kind: ModalKind, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        close_modal(app, "Cancelled");
        return;
    }
    match kind {
        ModalKind::Confirm => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                close_modal(app, format!("Archived {CONFIRM_SUBJECT}"));
            }
            KeyCode::Char('n') => close_modal(app, "Cancelled"),
            _ => {}
        },
        ModalKind::Form => match key.code {
            KeyCode::Enter => {
                let name = app.demo.form_input.trim().to_string();
                if name.is_empty() {
                    app.set_warning("Name is required");
                } else {
                    close_modal(app, format!("Invited {name}"));
                }
            }
            KeyCode::Backspace => {
                app.demo.form_input.pop();
            }
            KeyCode::Char(c) => {
                if app.demo.form_input.chars().count() < FORM_INPUT_MAX {
                    app.demo.form_input.push(c);
                }
            }
            _ => {}
        },
        ModalKind::Info => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
                app.overlay = Overlay::None;
            }
        }
    }
}

fn drawer_len(side: DrawerSide) -> usize {
    match side {
        DrawerSide::Left => Page::ALL.len(),
        DrawerSide::Right => DRAWER_SETTINGS.len(),
    }
}

fn activate_drawer_item(app: &mut AppState, side: DrawerSide) {
    let cursor = app.demo.drawer_cursor;
    match side {
        DrawerSide::Left => {
            if let Some(&page) = Page::ALL.get(cursor) {
                app.overlay = Overlay::None;
                app.set_page(page);
            }
        }
        DrawerSide::Right => {
            if let Some(on) = app.demo.settings.get_mut(cursor) {
                *on = !*on;
                let state = if *on { "on" } else { "off" };
                let action = format!("{} {state}", DRAWER_SETTINGS[cursor]);
                app.set_status(action.clone());
                app.demo.last_action = Some(action);
            }
        }
    }
}

fn handle_drawer(app: &mut AppState, side: DrawerSide, key: KeyEvent) {
    let len = drawer_len(side);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.demo.drawer_cursor + 1 < len {
                app.demo.drawer_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.demo.drawer_cursor = app.demo.drawer_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate_drawer_item(app, side),
        _ => {}
    }
}

fn handle_breadcrumbs_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.breadcrumb_max = (app.breadcrumb_max + 1).min(BREADCRUMB_MAX_ITEMS);
        }
        KeyCode::Char('-') => {
            app.breadcrumb_max = app.breadcrumb_max.saturating_sub(1).max(BREADCRUMB_MIN_ITEMS);
        }
        _ => return,
    }
    app.set_status(format!("Showing at most {} crumbs", app.breadcrumb_max));
}

fn handle_modals_key(app: &mut AppState, key: KeyEvent) {
    let kind = match key.code {
        KeyCode::Char('c') => ModalKind::Confirm,
        KeyCode::Char('f') => ModalKind::Form,
        KeyCode::Char('i') => ModalKind::Info,
        _ => return,
    };
    app.demo.form_input.clear();
    app.overlay = Overlay::Modal(kind);
}

fn handle_drawers_key(app: &mut AppState, key: KeyEvent) {
    let side = match key.code {
        KeyCode::Char('l') => DrawerSide::Left,
        KeyCode::Char('r') => DrawerSide::Right,
        _ => return,
    };
    app.demo.drawer_cursor = 0;
    app.overlay = Overlay::Drawer(side);
}

fn handle_sliders_key(app: &mut AppState, key: KeyEvent) {
    let idx = app.sliders.focus;
    let thumb = app.sliders.focused_thumb();
    let events = match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.sliders.focus_next();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sliders.focus_prev();
            return;
        }
        KeyCode::Char('t') => {
            app.sliders.toggle_thumb();
            return;
        }
        KeyCode::Esc => {
            if app.sliders.is_dragging() {
                app.sliders.teardown_all();
                app.set_warning("Drag cancelled");
            }
            return;
        }
        KeyCode::Char('h') | KeyCode::Left => app.sliders.focused_mut().slider.step_by(thumb, -1),
        KeyCode::Char('l') | KeyCode::Right => app.sliders.focused_mut().slider.step_by(thumb, 1),
        KeyCode::PageDown => app.sliders.focused_mut().slider.step_by(thumb, -10),
        KeyCode::PageUp => app.sliders.focused_mut().slider.step_by(thumb, 10),
        KeyCode::Home => app.sliders.focused_mut().slider.jump_to(thumb, Edge::Min),
        KeyCode::End => app.sliders.focused_mut().slider.jump_to(thumb, Edge::Max),
        _ => return,
    };
    apply_slider_events(app, idx, events);
}

/// Hand slider events to the gallery and surface the outcome.
fn apply_slider_events(app: &mut AppState, idx: usize, events: Vec<SliderEvent>) {
    if events.is_empty() {
        let entry = &app.sliders.entries[idx];
        if entry.slider.is_disabled() {
            let msg = format!("{} is disabled", entry.title);
            app.set_warning(msg);
        }
        return;
    }
    if let Some(line) = app.sliders.apply(idx, events) {
        app.set_status(line);
    }
}

fn select_status(app: &mut AppState) {
    let which = app.selects.focus;
    let title = if which == 0 { "Country" } else { "Tags" };
    let text = app.selects.focused_mut().display_text();
    app.set_status(format!("{title}: {text}"));
}

fn handle_select_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.selects.focus = 0,
        KeyCode::Char('l') | KeyCode::Right => app.selects.focus = 1,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => app.selects.focused_mut().open(),
        KeyCode::Char('x') | KeyCode::Delete => {
            app.selects.focused_mut().clear();
            select_status(app);
        }
        _ => {}
    }
}

fn handle_open_select_key(app: &mut AppState, key: KeyEvent) {
    let select = app.selects.focused_mut();
    match key.code {
        KeyCode::Esc => select.close(),
        KeyCode::Enter => {
            if select.commit() {
                select_status(app);
            }
        }
        KeyCode::Down => select.highlight_next(),
        KeyCode::Up => select.highlight_prev(),
        KeyCode::Backspace => select.pop_char(),
        KeyCode::Char(c) => select.push_char(c),
        _ => {}
    }
}

fn handle_grid_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('s') => {
            let column = app.grid.column;
            sort_grid(app, column);
            return;
        }
        KeyCode::Char('w') => {
            app.export_grid();
            return;
        }
        _ => {}
    }
    let state = &mut app.grid;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.grid.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => state.grid.cursor_up(),
        KeyCode::Char('n') | KeyCode::PageDown => state.grid.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => state.grid.prev_page(),
        KeyCode::Char('h') | KeyCode::Left => state.column = state.column.saturating_sub(1),
        KeyCode::Char('l') | KeyCode::Right => {
            let last = state.grid.columns().len().saturating_sub(1);
            state.column = (state.column + 1).min(last);
        }
        KeyCode::Char(' ') => state.grid.toggle_selected(),
        KeyCode::Char('a') => state.grid.select_page(),
        KeyCode::Char('x') => state.grid.clear_selection(),
        _ => {}
    }
}

fn sort_grid(app: &mut AppState, column: usize) {
    app.grid.column = column;
    app.grid.grid.toggle_sort(column);
    let msg = match app.grid.grid.sort() {
        Some(s) => format!(
            "Sorted by {} {}",
            app.grid.grid.columns()[s.column].title,
            s.direction.arrow()
        ),
        None => "Sort cleared".to_string(),
    };
    app.set_status(msg);
}

fn handle_tree_key(app: &mut AppState, key: KeyEvent) {
    let tree = &mut app.tree;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => tree.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => tree.cursor_up(),
        KeyCode::Char('l') | KeyCode::Right => tree.cursor_right(),
        KeyCode::Char('h') | KeyCode::Left => tree.cursor_left(),
        KeyCode::Enter | KeyCode::Char(' ') => activate_tree(app),
        KeyCode::Char('E') => tree.expand_all(),
        KeyCode::Char('C') => tree.collapse_all(),
        _ => {}
    }
}

fn activate_tree(app: &mut AppState) {
    let before = app.tree.selected().map(str::to_string);
    app.tree.activate();
    let after = app.tree.selected().map(str::to_string);
    if after != before {
        if let Some(id) = after {
            app.set_status(format!("Selected {id}"));
        }
    }
}

fn handle_upload_key(app: &mut AppState, key: KeyEvent) {
    let selected_id = app
        .uploads
        .queue
        .items()
        .get(app.uploads.cursor)
        .map(|item| item.id);
    match key.code {
        KeyCode::Char('a') => app.add_sample_upload(),
        KeyCode::Char('j') | KeyCode::Down => {
            if app.uploads.cursor + 1 < app.uploads.queue.items().len() {
                app.uploads.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.uploads.cursor = app.uploads.cursor.saturating_sub(1);
        }
        KeyCode::Char('r') => {
            let Some(id) = selected_id else { return };
            match app.uploads.queue.retry(id) {
                Ok(()) => app.set_status("Retrying upload"),
                Err(err) => app.set_warning(err.to_string()),
            }
        }
        KeyCode::Char('d') => {
            let Some(id) = selected_id else { return };
            match app.uploads.queue.remove(id) {
                Ok(item) => app.set_status(format!("Removed {}", item.name)),
                Err(err) => app.push_error(ErrorCategory::Upload, err.to_string(), "remove".into()),
            }
        }
        KeyCode::Char('c') => {
            app.uploads.queue.clear_finished();
            app.set_status("Cleared finished uploads");
        }
        _ => {}
    }
    let len = app.uploads.queue.items().len();
    app.uploads.cursor = app.uploads.cursor.min(len.saturating_sub(1));
}

fn handle_heatmap_key(app: &mut AppState, key: KeyEvent) {
    let state = &mut app.heatmap;
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => state.col = state.col.saturating_sub(1),
        KeyCode::Char('l') | KeyCode::Right => {
            state.col = (state.col + 1).min(state.map.cols().saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => state.row = state.row.saturating_sub(1),
        KeyCode::Char('j') | KeyCode::Down => {
            state.row = (state.row + 1).min(state.map.rows().saturating_sub(1));
        }
        _ => {}
    }
}

// ── Mouse ────────────────────────────────────────────────────────────

/// Handle a mouse event against the last drawn frame.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    let pos = Position::new(mouse.column, mouse.row);
    let layout = screen_layout(app.viewport);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => on_press(app, &layout, pos),
        MouseEventKind::Drag(MouseButton::Left) => on_drag(app, &layout, pos),
        MouseEventKind::Up(MouseButton::Left) => on_release(app),
        MouseEventKind::ScrollDown => on_scroll(app, 1),
        MouseEventKind::ScrollUp => on_scroll(app, -1),
        _ => {}
    }
}

fn on_press(app: &mut AppState, layout: &ScreenLayout, pos: Position) {
    finish_lost_drag(app);
    match app.overlay {
        Overlay::None => {}
        Overlay::Welcome | Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            if !centered_rect(80, 70, layout.main).contains(pos) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::Modal(kind) => {
            if !overlays::modal_rect(layout.main, kind).contains(pos) {
                close_modal(app, "Cancelled");
            }
            return;
        }
        Overlay::Drawer(side) => {
            let rect = overlays::drawer_rect(layout.main, side);
            if rect.contains(pos) {
                press_drawer(app, side, rect, pos);
            } else {
                app.overlay = Overlay::None;
            }
            return;
        }
    }

    if let Some(page) = nav::sidebar_page_at(layout.sidebar, pos) {
        app.set_page(page);
        return;
    }
    if let Some(page) = nav::header_link_at(layout.header, app.page, app.breadcrumb_max, pos) {
        app.set_page(page);
        return;
    }
    if !layout.body.contains(pos) {
        return;
    }

    let body = layout.body;
    match app.page {
        Page::Sliders => press_slider(app, body, pos),
        Page::DataGrid => press_grid(app, body, pos),
        Page::TreeView => press_tree(app, body, pos),
        Page::Select => press_select(app, body, pos),
        Page::FileUpload => press_upload(app, body, pos),
        Page::Heatmap => {
            if let Some((row, col)) = heatmap::cell_at(body, &app.heatmap.map, pos) {
                app.heatmap.row = row;
                app.heatmap.col = col;
            }
        }
        _ => {}
    }
}

fn press_drawer(app: &mut AppState, side: DrawerSide, rect: Rect, pos: Position) {
    let inner = Block::default().borders(Borders::ALL).inner(rect);
    if !inner.contains(pos) {
        return;
    }
    let row = usize::from(pos.y - inner.y);
    if row < drawer_len(side) {
        app.demo.drawer_cursor = row;
        activate_drawer_item(app, side);
    }
}

fn press_slider(app: &mut AppState, body: Rect, pos: Position) {
    let layout = sliders::layout(body, &app.sliders);
    for (idx, area) in layout.slots {
        let orientation = app.sliders.entries[idx].slider.props().orientation;
        let track = track_area(area, orientation);
        if !hit_zone(track, orientation).contains(pos) {
            continue;
        }
        app.sliders.focus = idx;
        let rect = track_rect(track, orientation);
        let at = pointer(pos.x, pos.y);
        let tolerance = cell_tolerance(track, orientation);
        let slider = &mut app.sliders.entries[idx].slider;
        let outcome = match slider.thumb_at(at, &rect, tolerance) {
            Some(thumb) => {
                if slider.value().is_range() {
                    app.sliders.focus_thumb = thumb;
                }
                slider.pointer_down(thumb)
            }
            None => slider.track_click(at, &rect),
        };
        apply_slider_events(app, idx, outcome.events);
        return;
    }
}

/// Move the captured thumb. Position outside the track clamps to its ends.
fn on_drag(app: &mut AppState, layout: &ScreenLayout, pos: Position) {
    let Some(owner) = app.document.capture_owner() else {
        return;
    };
    let Some(idx) = app.sliders.index_of(owner) else {
        return;
    };
    let Some(area) = sliders::layout(layout.body, &app.sliders).slot(idx) else {
        return;
    };
    let slider = &mut app.sliders.entries[idx].slider;
    let orientation = slider.props().orientation;
    let rect = track_rect(track_area(area, orientation), orientation);
    let outcome = slider.pointer_move(pointer(pos.x, pos.y), &rect);
    apply_slider_events(app, idx, outcome.events);
}

fn on_release(app: &mut AppState) {
    let Some(owner) = app.document.capture_owner() else {
        return;
    };
    let Some(idx) = app.sliders.index_of(owner) else {
        return;
    };
    let outcome = app.sliders.entries[idx].slider.pointer_up();
    apply_slider_events(app, idx, outcome.events);
}

/// A press while a thumb is still held means the terminal dropped the release.
/// Complete that gesture so only one drag is ever attached.
fn finish_lost_drag(app: &mut AppState) {
    if app.document.capture_owner().is_none() {
        return;
    }
    tracing::debug!("press during a drag, finishing the previous gesture");
    on_release(app);
    app.sliders.teardown_all();
}

fn on_scroll(app: &mut AppState, delta: i32) {
    // The wheel does nothing while a thumb is held.
    if app.document.capture_owner().is_some() {
        return;
    }
    if app.overlay == Overlay::ErrorHistory {
        scroll_errors(app, delta);
        return;
    }
    if app.overlay != Overlay::None {
        return;
    }
    let down = delta > 0;
    match app.page {
        Page::DataGrid => {
            if down {
                app.grid.grid.cursor_down();
            } else {
                app.grid.grid.cursor_up();
            }
        }
        Page::TreeView => {
            if down {
                app.tree.cursor_down();
            } else {
                app.tree.cursor_up();
            }
        }
        Page::Select if app.selects.is_capturing_text() => {
            let select = app.selects.focused_mut();
            if down {
                select.highlight_next();
            } else {
                select.highlight_prev();
            }
        }
        Page::FileUpload => {
            let len = app.uploads.queue.items().len();
            if down {
                app.uploads.cursor = (app.uploads.cursor + 1).min(len.saturating_sub(1));
            } else {
                app.uploads.cursor = app.uploads.cursor.saturating_sub(1);
            }
        }
        Page::Heatmap => {
            let state = &mut app.heatmap;
            if down {
                state.row = (state.row + 1).min(state.map.rows().saturating_sub(1));
            } else {
                state.row = state.row.saturating_sub(1);
            }
        }
        _ => {}
    }
}

fn press_grid(app: &mut AppState, body: Rect, pos: Position) {
    match grid::hit(body, &app.grid.grid, pos) {
        Some(GridHit::Header(col)) => sort_grid(app, col),
        Some(GridHit::Checkbox(row)) => {
            app.grid.grid.set_cursor(row);
            app.grid.grid.toggle_selected();
        }
        Some(GridHit::Row(row)) => app.grid.grid.set_cursor(row),
        None => {}
    }
}

fn press_tree(app: &mut AppState, body: Rect, pos: Position) {
    let Some(hit) = tree::hit(body, &app.tree, pos) else {
        return;
    };
    if hit.on_marker {
        if let Some(row) = app.tree.visible_rows().get(hit.row) {
            let id = row.id.clone();
            app.tree.toggle(&id);
        }
    } else {
        app.tree.set_cursor(hit.row);
        activate_tree(app);
    }
}

fn press_select(app: &mut AppState, body: Rect, pos: Position) {
    match select::hit(body, &app.selects, pos) {
        Some(SelectHit::Control(which)) => {
            if app.selects.focus != which {
                app.selects.close_all();
            }
            app.selects.focus = which;
            app.selects.focused_mut().toggle_open();
        }
        Some(SelectHit::Option(which, idx)) => {
            app.selects.focus = which;
            if app.selects.focused_mut().pick(idx) {
                select_status(app);
            }
        }
        None => app.selects.close_all(),
    }
}

fn press_upload(app: &mut AppState, body: Rect, pos: Position) {
    match upload::hit(body, app, pos) {
        Some(UploadHit::DropZone) => app.add_sample_upload(),
        Some(UploadHit::Row(row)) => app.uploads.cursor = row,
        None => {}
    }
}
