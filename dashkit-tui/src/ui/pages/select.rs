//! Select page: a searchable single select and a multi select side by side.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dashkit_core::select::Select;

use crate::app::{AppState, SelectPageState};
use crate::theme;

const TITLES: [&str; 2] = ["Country", "Tags"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectHit {
    /// The closed control of select 0 or 1.
    Control(usize),
    /// An option row: `(select, option index)`.
    Option(usize, usize),
}

fn column(area: Rect, which: usize) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)[which.min(1)]
}

/// Bordered control box under the field label.
pub fn control_rect(area: Rect, which: usize) -> Rect {
    let col = column(area, which);
    Rect {
        x: col.x + 1,
        y: col.y + 1,
        width: col.width.saturating_sub(2),
        height: col.height.saturating_sub(1).min(3),
    }
}

/// Dropdown list below the control. Empty when closed.
pub fn options_rect(area: Rect, which: usize, select: &Select) -> Rect {
    let control = control_rect(area, which);
    if !select.is_open() {
        return Rect { height: 0, ..control };
    }
    let rows = select.filtered().len().max(1) as u16;
    Rect {
        y: control.bottom(),
        height: rows.min(area.bottom().saturating_sub(control.bottom())),
        ..control
    }
}

pub fn hit(area: Rect, state: &SelectPageState, pos: Position) -> Option<SelectHit> {
    for (which, select) in [&state.country, &state.tags].into_iter().enumerate() {
        if control_rect(area, which).contains(pos) {
            return Some(SelectHit::Control(which));
        }
        let list = options_rect(area, which, select);
        if list.contains(pos) {
            let row = usize::from(pos.y - list.y);
            return select
                .filtered()
                .get(row)
                .map(|&idx| SelectHit::Option(which, idx));
        }
    }
    None
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let state = &app.selects;
    for (which, select) in [&state.country, &state.tags].into_iter().enumerate() {
        render_one(f, area, which, select, state.focus == which);
    }

    let summary_y = control_rect(area, 0).bottom() + 1;
    let open_below = [&state.country, &state.tags]
        .into_iter()
        .enumerate()
        .any(|(w, s)| options_rect(area, w, s).height > 0);
    if !open_below && summary_y < area.bottom() {
        let country = state.country.selected_values().join(",");
        let tags = state.tags.selected_values().join(",");
        let lines = vec![
            Line::from(Span::styled("Form values", theme::accent_bold())),
            Line::from(vec![
                Span::styled("  country = ", theme::muted()),
                Span::styled(format!("[{country}]"), theme::accent()),
            ]),
            Line::from(vec![
                Span::styled("  tags    = ", theme::muted()),
                Span::styled(format!("[{tags}]"), theme::accent()),
            ]),
        ];
        let rect = Rect {
            y: summary_y,
            height: area.bottom() - summary_y,
            ..area
        };
        f.render_widget(Paragraph::new(lines), rect);
    }
}

fn render_one(f: &mut Frame, area: Rect, which: usize, select: &Select, focused: bool) {
    let col = column(area, which);
    let mode = if select.is_multiple() { "multi" } else { "single" };
    let label = Line::from(vec![
        Span::styled(format!(" {}", TITLES[which.min(1)]), theme::panel_title(focused)),
        Span::styled(format!("  ({mode})"), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(label), Rect { height: 1, ..col });

    let control = control_rect(area, which);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused || select.is_open()));
    let inner = block.inner(control);
    f.render_widget(block, control);
    let text = if select.is_open() {
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(select.query().to_string(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ])
    } else if select.selected().next().is_none() {
        Line::from(Span::styled(select.display_text(), theme::muted()))
    } else {
        Line::from(Span::styled(select.display_text(), theme::text()))
    };
    f.render_widget(Paragraph::new(text), inner);

    let list = options_rect(area, which, select);
    if list.height == 0 {
        return;
    }
    let filtered = select.filtered();
    let lines: Vec<Line> = if filtered.is_empty() {
        vec![Line::from(Span::styled("  no matches", theme::muted()))]
    } else {
        filtered
            .iter()
            .map(|&idx| {
                let option = &select.options()[idx];
                let check = if select.is_selected(idx) { " ✓ " } else { "   " };
                let style = if option.disabled {
                    theme::muted()
                } else if select.highlighted() == Some(idx) {
                    theme::cursor()
                } else {
                    theme::text()
                };
                let suffix = if option.disabled { " (disabled)" } else { "" };
                Line::from(vec![
                    Span::styled(check, theme::positive()),
                    Span::styled(format!("{}{suffix}", option.label), style),
                ])
            })
            .collect()
    };
    f.render_widget(Paragraph::new(lines), list);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit_core::select::{sample_countries, sample_tags};

    fn state() -> SelectPageState {
        SelectPageState {
            country: sample_countries(),
            tags: sample_tags(),
            focus: 0,
        }
    }

    #[test]
    fn closed_controls_are_hit() {
        let area = Rect::new(0, 0, 80, 20);
        let s = state();
        let left = control_rect(area, 0);
        let right = control_rect(area, 1);
        assert_eq!(left, Rect::new(1, 1, 38, 3));
        assert_eq!(right.x, 41);
        assert_eq!(hit(area, &s, Position::new(5, 2)), Some(SelectHit::Control(0)));
        assert_eq!(hit(area, &s, Position::new(50, 2)), Some(SelectHit::Control(1)));
        // Closed: nothing below the control.
        assert_eq!(hit(area, &s, Position::new(5, 5)), None);
    }

    #[test]
    fn open_list_rows_map_to_filtered_options() {
        let area = Rect::new(0, 0, 80, 20);
        let mut s = state();
        s.country.open();
        s.country.set_query("an");
        // Canada, Germany, Japan, New Zealand
        assert_eq!(hit(area, &s, Position::new(5, 4)), Some(SelectHit::Option(0, 3)));
        assert_eq!(hit(area, &s, Position::new(5, 7)), Some(SelectHit::Option(0, 8)));
        assert_eq!(hit(area, &s, Position::new(5, 8)), None);
    }
}
