//! Stat cards with a trend badge and a sparkline.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline};
use ratatui::Frame;

use dashkit_core::cards::StatCard;

use crate::app::AppState;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);
    render_deck(f, rows[0], &app.cards);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Change against previous period", theme::accent_bold())),
    ];
    for card in &app.cards {
        let delta = card
            .delta_pct()
            .map(|d| format!("{d:+.1}%"))
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>14}: ", card.title), theme::muted()),
            Span::styled(
                format!("{} {delta}", card.trend().arrow()),
                Style::default().fg(Theme::default().trend_color(card.trend())),
            ),
        ]));
    }
    f.render_widget(Paragraph::new(lines), rows[1]);
}

/// Cards side by side, sharing `area` evenly.
pub fn render_deck(f: &mut Frame, area: Rect, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (card, slot) in cards.iter().zip(slots.iter()) {
        render_card(f, *slot, card);
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &StatCard) {
    let theme = Theme::default();
    let trend_style = Style::default().fg(theme.trend_color(card.trend()));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {} ", card.title))
        .title_style(theme::neutral());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let delta = card
        .delta_pct()
        .map(|d| format!(" {} {:.1}%", card.trend().arrow(), d.abs()))
        .unwrap_or_default();
    let head = vec![
        Line::from(Span::styled(card.display_value(), theme::accent_bold())),
        Line::from(Span::styled(delta, trend_style)),
    ];
    f.render_widget(Paragraph::new(head), parts[0]);

    let spark = Sparkline::default().data(&card.history).style(trend_style);
    f.render_widget(spark, parts[1]);
}
