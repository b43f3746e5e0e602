//! Heatmap page: weekday by hour activity with a cell cursor.

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::heatmap::Heatmap;

use crate::app::AppState;
use crate::theme::{self, Theme};

const LABEL_WIDTH: u16 = 4;
const CELL_WIDTH: u16 = 2;

/// Top-left cell of the grid.
fn origin(area: Rect) -> Position {
    Position::new(area.x + LABEL_WIDTH, area.y + 3)
}

/// Heatmap cell under `pos`, as `(row, col)`.
pub fn cell_at(area: Rect, map: &Heatmap, pos: Position) -> Option<(usize, usize)> {
    let o = origin(area);
    if pos.x < o.x || pos.y < o.y || !area.contains(pos) {
        return None;
    }
    let col = usize::from((pos.x - o.x) / CELL_WIDTH);
    let row = usize::from(pos.y - o.y);
    (row < map.rows() && col < map.cols()).then_some((row, col))
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = Theme::default();
    let state = &app.heatmap;
    let map = &state.map;
    let buckets = theme.heat.len();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Sessions per hour, last week", theme::accent_bold()),
            Span::styled("  [arrows]move or click a cell", theme::muted()),
        ]),
        Line::from(""),
    ];

    // Hour labels every third column.
    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
    for (c, label) in map.col_labels().iter().enumerate() {
        let text = if c % 3 == 0 {
            format!("{label:<width$}", width = CELL_WIDTH as usize)
        } else {
            " ".repeat(CELL_WIDTH as usize)
        };
        header.push(Span::styled(text, theme::muted()));
    }
    lines.push(Line::from(header));

    for r in 0..map.rows() {
        let label = map.row_labels().get(r).map(String::as_str).unwrap_or("");
        let mut spans = vec![Span::styled(
            format!("{label:<width$}", width = LABEL_WIDTH as usize),
            if r == state.row { theme::accent_bold() } else { theme::muted() },
        )];
        for c in 0..map.cols() {
            let bucket = map.intensity(r, c, buckets).unwrap_or(0);
            let color = theme.heat_color(bucket);
            let cell = if r == state.row && c == state.col { "▐▌" } else { "  " };
            spans.push(Span::styled(
                cell,
                Style::default().bg(color).fg(theme.text_primary),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let mut legend = vec![Span::styled("less ", theme::muted())];
    for color in theme.heat {
        legend.push(Span::styled("  ", Style::default().bg(color)));
    }
    legend.push(Span::styled(" more", theme::muted()));
    lines.push(Line::from(legend));

    let value = map.get(state.row, state.col).unwrap_or(0.0);
    let day = map.row_labels().get(state.row).cloned().unwrap_or_default();
    let hour = map.col_labels().get(state.col).cloned().unwrap_or_default();
    let total = map.row_totals().get(state.row).copied().unwrap_or(0.0);
    lines.push(Line::from(vec![
        Span::styled(format!("{day} {hour}:00  "), theme::text()),
        Span::styled(format!("{value:.0} sessions"), theme::accent()),
        Span::styled(format!("   {day} total {total:.0}"), theme::muted()),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit_core::heatmap::sample_activity;
    use dashkit_core::rng::SeedTree;

    #[test]
    fn clicks_map_to_cells() {
        let map = sample_activity(&SeedTree::new(42));
        let area = Rect::new(20, 2, 78, 26);
        assert_eq!(cell_at(area, &map, Position::new(24, 5)), Some((0, 0)));
        assert_eq!(cell_at(area, &map, Position::new(25, 5)), Some((0, 0)));
        assert_eq!(cell_at(area, &map, Position::new(26, 6)), Some((1, 1)));
        assert_eq!(cell_at(area, &map, Position::new(24 + 47, 11)), Some((6, 23)));
        // Past the last hour and below Sunday.
        assert_eq!(cell_at(area, &map, Position::new(24 + 48, 5)), None);
        assert_eq!(cell_at(area, &map, Position::new(24, 12)), None);
        // Row labels are not cells.
        assert_eq!(cell_at(area, &map, Position::new(21, 5)), None);
    }
}
