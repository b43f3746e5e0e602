//! Data grid page: sortable headers, paging and row selection.

use ratatui::layout::{Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::grid::{Cell, DataGrid, Status};

use crate::app::AppState;
use crate::theme;

const CHECKBOX_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub header: Rect,
    pub rows: Rect,
    pub footer: Rect,
    /// `(column index, x, width)` for columns that fit entirely.
    pub columns: Vec<(usize, u16, u16)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridHit {
    Header(usize),
    Checkbox(usize),
    Row(usize),
}

pub fn layout(area: Rect, grid: &DataGrid) -> GridLayout {
    let header = Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2).min(1),
        ..area
    };
    let rows_height = (grid.page_size() as u16).min(area.height.saturating_sub(3));
    let rows = Rect {
        y: header.y + 1,
        height: rows_height,
        ..area
    };
    let footer = Rect {
        y: rows.bottom() + 1,
        height: area.bottom().saturating_sub(rows.bottom() + 1).min(1),
        ..area
    };

    let mut columns = Vec::new();
    let mut x = area.x + CHECKBOX_WIDTH;
    for (i, col) in grid.columns().iter().enumerate() {
        if x + col.width > area.right() {
            break;
        }
        columns.push((i, x, col.width));
        x += col.width + 1;
    }

    GridLayout {
        header,
        rows,
        footer,
        columns,
    }
}

pub fn hit(area: Rect, grid: &DataGrid, pos: Position) -> Option<GridHit> {
    let l = layout(area, grid);
    if l.header.contains(pos) {
        return l
            .columns
            .iter()
            .find(|(_, x, w)| pos.x >= *x && pos.x < x + w)
            .map(|(i, _, _)| GridHit::Header(*i));
    }
    if l.rows.contains(pos) {
        let row = usize::from(pos.y - l.rows.y);
        if row >= grid.page_rows().len() {
            return None;
        }
        return Some(if pos.x < area.x + CHECKBOX_WIDTH {
            GridHit::Checkbox(row)
        } else {
            GridHit::Row(row)
        });
    }
    None
}

fn fit(text: &str, width: u16) -> String {
    let width = width as usize;
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn cell_style(cell: &Cell) -> ratatui::style::Style {
    match cell {
        Cell::Status(Status::Active) => theme::positive(),
        Cell::Status(Status::Invited) => theme::warning(),
        Cell::Status(Status::Suspended) => theme::negative(),
        Cell::Number(_) => theme::accent(),
        _ => theme::text(),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let grid = &app.grid.grid;
    let l = layout(area, grid);

    let sort_text = match grid.sort() {
        Some(s) => format!(
            "sorted by {} {}",
            grid.columns()[s.column].title,
            s.direction.arrow()
        ),
        None => "unsorted".to_string(),
    };
    let info = Line::from(vec![
        Span::styled(format!("{} users", grid.row_count()), theme::accent()),
        Span::styled(format!("  {sort_text}"), theme::muted()),
        Span::styled(format!("  {} selected", grid.selected_count()), theme::neutral()),
    ]);
    f.render_widget(Paragraph::new(info), Rect { height: 1, ..area });

    let mut header = vec![Span::styled(" ".repeat(CHECKBOX_WIDTH as usize), theme::muted())];
    for (i, _, width) in &l.columns {
        let col = &grid.columns()[*i];
        let arrow = match grid.sort() {
            Some(s) if s.column == *i => s.direction.arrow(),
            _ => "",
        };
        let mut style = theme::accent_bold();
        if *i == app.grid.column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        header.push(Span::styled(fit(&format!("{}{arrow}", col.title), *width), style));
        header.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(header)), l.header);

    let lines: Vec<Line> = grid
        .page_rows()
        .into_iter()
        .enumerate()
        .take(l.rows.height as usize)
        .map(|(n, (id, cells))| {
            let is_cursor = n == grid.cursor();
            let check = if grid.is_selected(id) { "[x] " } else { "[ ] " };
            let mut spans = vec![Span::styled(
                check,
                if is_cursor { theme::cursor() } else { theme::muted() },
            )];
            for (i, _, width) in &l.columns {
                let cell = &cells[*i];
                let style = if is_cursor { theme::cursor() } else { cell_style(cell) };
                spans.push(Span::styled(fit(&cell.display(), *width), style));
                spans.push(Span::styled(" ", if is_cursor { theme::cursor() } else { theme::muted() }));
            }
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), l.rows);

    let footer = Line::from(vec![
        Span::styled(
            format!("Page {}/{}", grid.page() + 1, grid.page_count()),
            theme::accent(),
        ),
        Span::styled("  [n/p]page [s]sort [Space]select [w]export csv", theme::muted()),
    ]);
    f.render_widget(Paragraph::new(footer), l.footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit_core::grid::sample_users;

    #[test]
    fn columns_that_do_not_fit_are_dropped() {
        let grid = sample_users();
        let l = layout(Rect::new(0, 0, 60, 20), &grid);
        // Name, email and role fit; status would end past column 60.
        let shown: Vec<usize> = l.columns.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(shown, vec![0, 1, 2]);
        assert_eq!(l.columns[1].1, 4 + 19);
    }

    #[test]
    fn header_and_row_hits() {
        let grid = sample_users();
        let area = Rect::new(10, 5, 100, 20);
        let l = layout(area, &grid);
        assert_eq!(l.header.y, 7);
        assert_eq!(l.rows.y, 8);
        assert_eq!(l.rows.height, 10);

        assert_eq!(hit(area, &grid, Position::new(15, 7)), Some(GridHit::Header(0)));
        assert_eq!(hit(area, &grid, Position::new(10 + 4 + 19, 7)), Some(GridHit::Header(1)));
        assert_eq!(hit(area, &grid, Position::new(11, 9)), Some(GridHit::Checkbox(1)));
        assert_eq!(hit(area, &grid, Position::new(20, 12)), Some(GridHit::Row(4)));
        assert_eq!(hit(area, &grid, Position::new(20, 5)), None);
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abc…");
    }
}
