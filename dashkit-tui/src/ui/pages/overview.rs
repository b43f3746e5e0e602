//! Overview: headline cards and a directory of every component page.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::catalog::Page;

use crate::app::AppState;
use crate::theme;
use crate::ui::nav::SECTIONS;
use crate::ui::pages::cards;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);
    cards::render_deck(f, rows[0], &app.cards);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let mut directory: Vec<Line> = vec![Line::from(Span::styled("Components", theme::accent_bold()))];
    for section in SECTIONS {
        let pages: Vec<&str> = Page::ALL
            .iter()
            .filter(|p| p.section() == section && **p != Page::Overview)
            .map(|p| p.label())
            .collect();
        if pages.is_empty() {
            continue;
        }
        directory.push(Line::from(vec![
            Span::styled(format!("  {section:<13}"), theme::neutral()),
            Span::styled(pages.join(", "), theme::muted()),
        ]));
    }
    f.render_widget(Paragraph::new(directory), cols[0]);

    let q = &app.uploads.queue;
    let activity = vec![
        Line::from(Span::styled("Session", theme::accent_bold())),
        stat("slider changes", app.sliders.changes.to_string()),
        stat("gestures completed", app.sliders.completions.to_string()),
        stat("grid rows selected", app.grid.grid.selected_count().to_string()),
        stat(
            "uploads done",
            format!("{} of {}", q.done_count(), q.items().len()),
        ),
        stat("errors recorded", app.error_history.len().to_string()),
    ];
    f.render_widget(Paragraph::new(activity), cols[1]);
}

fn stat(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:>20}: "), theme::muted()),
        Span::styled(value, theme::accent()),
    ])
}
