//! Tree view page: expandable file tree with a selection panel.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::tree::{TreeView, VisibleRow};

use crate::app::AppState;
use crate::theme;
use crate::ui::pages::scroll_offset;

/// Where a click on the tree landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeHit {
    pub row: usize,
    /// On the expand/collapse marker rather than the label.
    pub on_marker: bool,
}

/// Area the rows are drawn in.
pub fn rows_area(area: Rect) -> Rect {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let list = cols[0];
    Rect {
        y: list.y + 2,
        height: list.height.saturating_sub(2),
        ..list
    }
}

pub fn hit(area: Rect, tree: &TreeView, pos: Position) -> Option<TreeHit> {
    let rows_rect = rows_area(area);
    if !rows_rect.contains(pos) {
        return None;
    }
    let rows = tree.visible_rows();
    let offset = scroll_offset(tree.cursor(), rows.len(), rows_rect.height as usize);
    let index = offset + usize::from(pos.y - rows_rect.y);
    let row = rows.get(index)?;
    let marker_x = rows_rect.x + 2 * row.depth as u16;
    Some(TreeHit {
        row: index,
        on_marker: row.has_children && pos.x >= marker_x && pos.x < marker_x + 2,
    })
}

fn row_line(row: &VisibleRow, is_cursor: bool, is_selected: bool) -> Line<'static> {
    let marker = match (row.has_children, row.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    let style = if is_cursor {
        theme::cursor()
    } else if is_selected {
        theme::positive()
    } else if row.has_children {
        theme::neutral()
    } else {
        theme::text()
    };
    Line::from(vec![
        Span::raw("  ".repeat(row.depth)),
        Span::styled(marker, theme::accent()),
        Span::styled(row.label.clone(), style),
    ])
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let tree = &app.tree;
    let hint = Line::from(Span::styled(
        "[j/k]move [h/l]collapse/expand [Enter]open [E]expand all [C]collapse all",
        theme::muted(),
    ));
    f.render_widget(Paragraph::new(hint), Rect { height: 1, ..area });

    let rows_rect = rows_area(area);
    let rows = tree.visible_rows();
    let offset = scroll_offset(tree.cursor(), rows.len(), rows_rect.height as usize);
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows_rect.height as usize)
        .map(|(i, row)| row_line(row, i == tree.cursor(), tree.selected() == Some(row.id.as_str())))
        .collect();
    f.render_widget(Paragraph::new(lines), rows_rect);

    let detail = Rect {
        x: rows_rect.right(),
        width: area.right().saturating_sub(rows_rect.right()),
        ..rows_rect
    };
    let mut info = vec![Line::from(Span::styled("Selected", theme::accent_bold()))];
    match tree.selected() {
        Some(id) => info.push(Line::from(Span::styled(id.to_string(), theme::positive()))),
        None => info.push(Line::from(Span::styled("nothing yet", theme::muted()))),
    }
    info.push(Line::from(""));
    info.push(Line::from(vec![
        Span::styled("Visible rows: ", theme::muted()),
        Span::styled(rows.len().to_string(), theme::accent()),
    ]));
    f.render_widget(Paragraph::new(info), detail);
}
