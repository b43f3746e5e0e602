//! Top-level UI layout — header, sidebar, page body and status bar.
//!
//! Layout functions are pure so the mouse router can hit-test against the
//! same rectangles the renderer draws into.

pub mod nav;
pub mod overlays;
pub mod pages;
pub mod status_bar;
pub mod widgets;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay};
use crate::theme;

pub const SIDEBAR_WIDTH: u16 = 20;

/// Where each part of the frame goes for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Everything between header and status bar; overlays cover this.
    pub main: Rect,
    /// Sidebar inside its border.
    pub sidebar: Rect,
    /// Page frame including its border.
    pub content: Rect,
    /// Page body inside the frame.
    pub body: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[1]);
    let frame = Block::default().borders(Borders::ALL);
    ScreenLayout {
        header: rows[0],
        main: rows[1],
        sidebar: frame.inner(cols[0]),
        content: cols[1],
        body: frame.inner(cols[1]),
        status: rows[2],
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let layout = screen_layout(f.area());

    nav::render_header(f, layout.header, app);
    nav::render_sidebar(f, layout.sidebar, app);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", app.page.label()))
        .title_style(theme::panel_title(true));
    f.render_widget(block, layout.content);
    pages::render(f, layout.body, app);

    status_bar::render(f, layout.status, app);

    match app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, layout.main),
        Overlay::Help => overlays::render_help(f, layout.main),
        Overlay::ErrorHistory => overlays::render_error_history(f, layout.main, app),
        Overlay::Modal(kind) => overlays::render_modal(f, layout.main, app, kind),
        Overlay::Drawer(side) => overlays::render_drawer(f, layout.main, app, side),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
