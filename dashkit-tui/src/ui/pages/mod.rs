//! One renderer per gallery page.

pub mod breadcrumbs;
pub mod cards;
pub mod grid;
pub mod heatmap;
pub mod overlay_demo;
pub mod overview;
pub mod select;
pub mod sliders;
pub mod tree;
pub mod upload;

use ratatui::layout::Rect;
use ratatui::Frame;

use dashkit_core::catalog::Page;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match app.page {
        Page::Overview => overview::render(f, area, app),
        Page::Breadcrumbs => breadcrumbs::render(f, area, app),
        Page::Cards => cards::render(f, area, app),
        Page::Modals => overlay_demo::render_modals(f, area, app),
        Page::Drawers => overlay_demo::render_drawers(f, area, app),
        Page::Sliders => sliders::render(f, area, app),
        Page::TreeView => tree::render(f, area, app),
        Page::DataGrid => grid::render(f, area, app),
        Page::Select => select::render(f, area, app),
        Page::FileUpload => upload::render(f, area, app),
        Page::Heatmap => heatmap::render(f, area, app),
    }
}

/// First visible row of a list so the cursor stays on screen.
pub fn scroll_offset(cursor: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height || cursor < height {
        0
    } else {
        (cursor + 1 - height).min(len - height)
    }
}
