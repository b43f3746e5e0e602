//! Bottom status bar — page key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::catalog::Page;

use crate::app::{AppState, StatusLevel};
use crate::theme;

/// Key hints for a page.
pub fn hints(page: Page) -> &'static str {
    match page {
        Page::Overview => " Tab:next page  ?:help  e:errors  q:quit",
        Page::Breadcrumbs => " +/-:max items  click a crumb to navigate",
        Page::Cards => " Tab:next page",
        Page::Modals => " c:confirm  f:form  i:info",
        Page::Drawers => " l:left drawer  r:right drawer",
        Page::Sliders => " j/k:focus  h/l:step  PgUp/PgDn:x10  Home/End  t:thumb  drag with the mouse",
        Page::TreeView => " j/k:move  h/l:collapse/expand  Enter:open  E/C:all",
        Page::DataGrid => " j/k:row  n/p:page  ←/→:column  s:sort  Space:select  a/x  w:export",
        Page::Select => " ←/→:switch  Enter:open/pick  type to filter  Esc:close  x:clear",
        Page::FileUpload => " a:add file  r:retry  d:remove  c:clear finished",
        Page::Heatmap => " arrows:move cell",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(hints(app.page), theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let para = Paragraph::new(Line::from(spans));
    f.render_widget(para, area);
}
