//! Breadcrumbs: every page's trail, plus a deep path collapsed to the limit.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::breadcrumb::Breadcrumb;
use dashkit_core::catalog::Page;

use crate::app::AppState;
use crate::theme;

/// A path deeper than any page trail, to show collapsing.
pub const DEEP_PATH: [&str; 6] = ["Home", "Projects", "Apollo", "Settings", "Billing", "Invoices"];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let max = app.breadcrumb_max;
    let deep = Breadcrumb::from_labels(DEEP_PATH);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Max items: ", theme::muted()),
            Span::styled(max.to_string(), theme::accent_bold()),
            Span::styled("  [+/-] adjust", theme::muted()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Deep path", theme::accent_bold())),
        trail_line("full", &deep),
        trail_line("collapsed", &deep.collapse(max)),
        Line::from(""),
        Line::from(Span::styled("Page trails", theme::accent_bold())),
    ];
    for page in Page::ALL {
        let trail = Breadcrumb::trail(page).collapse(max);
        lines.push(trail_line(page.label(), &trail));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn trail_line(label: &str, trail: &Breadcrumb) -> Line<'static> {
    let last = trail.len().saturating_sub(1);
    let mut spans = vec![Span::styled(format!("  {label:>12}  "), theme::muted())];
    for (i, crumb) in trail.crumbs().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", theme::muted()));
        }
        let style = if i == last {
            theme::text()
        } else if crumb.is_ellipsis() {
            theme::neutral()
        } else {
            theme::accent()
        };
        spans.push(Span::styled(crumb.label.clone(), style));
    }
    Line::from(spans)
}
