//! Modals and Drawers pages: launchers for the overlay components.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, DRAWER_SETTINGS};
use crate::theme;

pub fn render_modals(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled("Modal dialogs", theme::accent_bold())),
        Line::from(""),
        launcher("c", "Confirm", "destructive action with Enter / Esc"),
        launcher("f", "Form", "text input with validation"),
        launcher("i", "Info", "read-only content"),
        Line::from(""),
        Line::from(Span::styled(
            "Esc or a click outside the dialog closes it.",
            theme::muted(),
        )),
    ];
    push_last_action(&mut lines, app);
    f.render_widget(Paragraph::new(lines), area);
}

pub fn render_drawers(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled("Side drawers", theme::accent_bold())),
        Line::from(""),
        launcher("l", "Left", "page navigation"),
        launcher("r", "Right", "settings toggles"),
        Line::from(""),
        Line::from(Span::styled("Settings", theme::accent_bold())),
    ];
    for (name, on) in DRAWER_SETTINGS.iter().zip(app.demo.settings.iter()) {
        let (state, style) = if *on {
            ("on", theme::positive())
        } else {
            ("off", theme::muted())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {name:>14}: "), theme::muted()),
            Span::styled(state, style),
        ]));
    }
    push_last_action(&mut lines, app);
    f.render_widget(Paragraph::new(lines), area);
}

fn launcher(key: &'static str, name: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  [{key}] "), theme::accent()),
        Span::styled(format!("{name:<10}"), theme::text()),
        Span::styled(what, theme::muted()),
    ])
}

fn push_last_action(lines: &mut Vec<Line>, app: &AppState) {
    if let Some(action) = &app.demo.last_action {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last action: ", theme::muted()),
            Span::styled(action.clone(), theme::accent()),
        ]));
    }
}
