//! Overlay widgets — welcome, help, error history, modals and drawers.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use dashkit_core::catalog::Page;

use crate::app::{AppState, DrawerSide, ModalKind, CONFIRM_SUBJECT, DRAWER_SETTINGS};
use crate::theme;
use crate::ui::centered_rect;

pub const DRAWER_WIDTH: u16 = 30;

/// Where a modal sits inside the main area.
pub fn modal_rect(area: Rect, kind: ModalKind) -> Rect {
    match kind {
        ModalKind::Confirm => centered_rect(50, 30, area),
        ModalKind::Form => centered_rect(50, 36, area),
        ModalKind::Info => centered_rect(60, 50, area),
    }
}

/// Drawers take the full height of the main area along one edge.
pub fn drawer_rect(area: Rect, side: DrawerSide) -> Rect {
    let width = DRAWER_WIDTH.min(area.width);
    match side {
        DrawerSide::Left => Rect { width, ..area },
        DrawerSide::Right => Rect {
            x: area.right() - width,
            width,
            ..area
        },
    }
}

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to Dashkit ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("A tour of admin dashboard components:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled("  1. Pick a page from the sidebar or press Tab", theme::muted())),
        Line::from(Span::styled("  2. Drag slider thumbs with the mouse, or use h/l", theme::muted())),
        Line::from(Span::styled("  3. Click grid headers to sort", theme::muted())),
        Line::from(Span::styled("  4. Press ? for every key binding", theme::muted())),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Key binding reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Global");
    binding(&mut lines, "Tab / Shift-Tab", "next / previous page");
    binding(&mut lines, "?", "this help");
    binding(&mut lines, "e", "error history");
    binding(&mut lines, "q / Ctrl-C", "quit");
    lines.push(Line::from(""));
    section(&mut lines, "Mouse");
    binding(&mut lines, "click", "sidebar, crumbs, thumbs, tracks, headers, rows");
    binding(&mut lines, "drag", "move a slider thumb, even outside the track");
    binding(&mut lines, "wheel", "scroll lists (ignored while dragging)");
    lines.push(Line::from(""));
    section(&mut lines, "Sliders");
    binding(&mut lines, "j / k", "focus next / previous slider");
    binding(&mut lines, "h / l", "one step down / up");
    binding(&mut lines, "PgDn / PgUp", "ten steps");
    binding(&mut lines, "Home / End", "jump to min / max");
    binding(&mut lines, "t", "switch range thumb");
    lines.push(Line::from(""));
    section(&mut lines, "Overlays");
    binding(&mut lines, "Esc", "close, or click outside");
    binding(&mut lines, "Enter", "confirm / submit");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn binding(lines: &mut Vec<Line>, keys: &'static str, action: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::accent()),
        Span::styled(action, theme::muted()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_modal(f: &mut Frame, area: Rect, app: &AppState, kind: ModalKind) {
    let popup = modal_rect(area, kind);
    f.render_widget(Clear, popup);

    let (title, border) = match kind {
        ModalKind::Confirm => (" Archive project ", theme::negative()),
        ModalKind::Form => (" Invite member ", theme::accent()),
        ModalKind::Info => (" What's new ", theme::neutral()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
        .title_style(border.add_modifier(Modifier::BOLD));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = match kind {
        ModalKind::Confirm => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Archive project \"{CONFIRM_SUBJECT}\"?"),
                theme::text(),
            )),
            Line::from(Span::styled("Members lose access until it is restored.", theme::muted())),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Enter] ", theme::negative()),
                Span::styled("archive   ", theme::muted()),
                Span::styled("[Esc] ", theme::accent()),
                Span::styled("cancel", theme::muted()),
            ]),
        ],
        ModalKind::Form => vec![
            Line::from(""),
            Line::from(Span::styled("Name:", theme::muted())),
            Line::from(vec![
                Span::styled("> ", theme::accent()),
                Span::styled(app.demo.form_input.as_str(), theme::accent_bold()),
                Span::styled("_", theme::accent()),
            ]),
            Line::from(""),
            Line::from(Span::styled("[Enter]send invite [Esc]cancel", theme::muted())),
        ],
        ModalKind::Info => vec![
            Line::from(""),
            Line::from(Span::styled("Sliders", theme::accent_bold())),
            Line::from(Span::styled(
                "  Range mode, vertical tracks, ticks and marks.",
                theme::muted(),
            )),
            Line::from(Span::styled("Data grid", theme::accent_bold())),
            Line::from(Span::styled(
                "  Click a header to cycle ascending, descending, unsorted.",
                theme::muted(),
            )),
            Line::from(""),
            Line::from(Span::styled("[Esc]close", theme::muted())),
        ],
    };
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, inner);
}

pub fn render_drawer(f: &mut Frame, area: Rect, app: &AppState, side: DrawerSide) {
    let rect = drawer_rect(area, side);
    f.render_widget(Clear, rect);

    let title = match side {
        DrawerSide::Left => " Navigate ",
        DrawerSide::Right => " Settings ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(title)
        .title_style(theme::accent_bold());
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let row_style = |i: usize| {
        if i == app.demo.drawer_cursor {
            theme::cursor()
        } else {
            theme::text()
        }
    };
    let mut lines: Vec<Line> = match side {
        DrawerSide::Left => Page::ALL
            .iter()
            .enumerate()
            .map(|(i, page)| Line::from(Span::styled(format!(" {}", page.label()), row_style(i))))
            .collect(),
        DrawerSide::Right => DRAWER_SETTINGS
            .iter()
            .zip(app.demo.settings.iter())
            .enumerate()
            .map(|(i, (name, on))| {
                let mark = if *on { "[x]" } else { "[ ]" };
                Line::from(Span::styled(format!(" {mark} {name}"), row_style(i)))
            })
            .collect(),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[j/k]move [Enter]select [Esc]close",
        theme::muted(),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}
