//! Sliders page: the gallery of slider variants and a log of completed gestures.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dashkit_core::slider::Orientation;

use crate::app::AppState;
use crate::gallery::SliderGallery;
use crate::theme;
use crate::ui::widgets::SliderWidget;
use crate::ui::widgets::slider::height_for;

const VERTICAL_COLUMN: u16 = 14;

/// Rectangles of every slider on the page, shared with mouse routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidersLayout {
    /// `(gallery index, widget area)` for each slider.
    pub slots: Vec<(usize, Rect)>,
    pub log: Rect,
}

impl SlidersLayout {
    pub fn slot(&self, idx: usize) -> Option<Rect> {
        self.slots.iter().find(|(i, _)| *i == idx).map(|(_, r)| *r)
    }
}

pub fn layout(area: Rect, gallery: &SliderGallery) -> SlidersLayout {
    let has_vertical = gallery
        .entries
        .iter()
        .any(|e| e.slider.props().orientation == Orientation::Vertical);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(if has_vertical { VERTICAL_COLUMN } else { 0 }),
        ])
        .split(area);

    let horizontal: Vec<usize> = gallery
        .entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.slider.props().orientation == Orientation::Horizontal)
        .map(|(i, _)| i)
        .collect();

    // One blank line under the hint and between sliders.
    let mut constraints = vec![Constraint::Length(2)];
    for &idx in &horizontal {
        constraints.push(Constraint::Length(height_for(&gallery.entries[idx].slider)));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(cols[0]);

    let mut slots: Vec<(usize, Rect)> = horizontal
        .iter()
        .enumerate()
        .map(|(n, &idx)| (idx, rows[1 + n * 2]))
        .collect();
    let log = rows[rows.len() - 1];

    if let Some(idx) = gallery
        .entries
        .iter()
        .position(|e| e.slider.props().orientation == Orientation::Vertical)
    {
        let column = cols[1];
        // Leave a row on top and keep the column off the frame edge.
        let area = Rect {
            x: column.x + 2,
            y: column.y + 2,
            width: column.width.saturating_sub(3),
            height: column.height.saturating_sub(3),
        };
        slots.push((idx, area));
    }

    SlidersLayout { slots, log }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let gallery = &app.sliders;
    let l = layout(area, gallery);

    let hint = Line::from(Span::styled(
        "[j/k]focus [h/l]step [PgUp/PgDn]x10 [Home/End] [t]thumb  or drag with the mouse",
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(hint), Rect { height: 1, ..area });

    for (idx, rect) in &l.slots {
        let entry = &gallery.entries[*idx];
        let widget = SliderWidget::new(&entry.slider, entry.title)
            .hint(entry.hint)
            .focused(*idx == gallery.focus, gallery.focused_thumb());
        f.render_widget(widget, *rect);
    }

    render_log(f, l.log, gallery);
}

fn render_log(f: &mut Frame, area: Rect, gallery: &SliderGallery) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(format!(
            " Events: {} changes, {} completed ",
            gallery.changes, gallery.completions
        ))
        .title_style(theme::neutral());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = if gallery.log.is_empty() {
        vec![Line::from(Span::styled(
            "Nothing yet. Release a thumb to see change-complete events.",
            theme::muted(),
        ))]
    } else {
        gallery
            .log
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == 0 { theme::accent() } else { theme::muted() };
                Line::from(Span::styled(format!("  {entry}"), style))
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines), inner);
}
