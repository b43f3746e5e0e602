//! Header breadcrumbs and the sidebar page list.

use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dashkit_core::breadcrumb::{Breadcrumb, Crumb};
use dashkit_core::catalog::Page;

use crate::app::AppState;
use crate::theme;

const BRAND: &str = " ◆ Dashkit  ";
const CRUMB_SEPARATOR: &str = " / ";

pub const SECTIONS: [&str; 5] = ["Dashboard", "Layout", "Overlays", "Forms", "Data Display"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEntry {
    Section(&'static str),
    Page(Page),
}

/// Sidebar rows top to bottom: each section heading followed by its pages.
pub fn sidebar_entries() -> Vec<SidebarEntry> {
    let mut entries = Vec::with_capacity(SECTIONS.len() + Page::ALL.len());
    for section in SECTIONS {
        entries.push(SidebarEntry::Section(section));
        entries.extend(
            Page::ALL
                .iter()
                .filter(|p| p.section() == section)
                .map(|p| SidebarEntry::Page(*p)),
        );
    }
    entries
}

/// Page listed at `pos`, if the position is on a page row of the sidebar.
pub fn sidebar_page_at(sidebar: Rect, pos: Position) -> Option<Page> {
    if !sidebar.contains(pos) {
        return None;
    }
    match sidebar_entries().get(usize::from(pos.y - sidebar.y)) {
        Some(SidebarEntry::Page(page)) => Some(*page),
        _ => None,
    }
}

pub fn render_sidebar(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = sidebar_entries()
        .into_iter()
        .map(|entry| match entry {
            SidebarEntry::Section(name) => Line::from(Span::styled(name, theme::neutral())),
            SidebarEntry::Page(page) if page == app.page => {
                Line::from(Span::styled(format!(" ▸ {}", page.label()), theme::cursor()))
            }
            SidebarEntry::Page(page) => {
                Line::from(Span::styled(format!("   {}", page.label()), theme::muted()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

/// Crumbs of the header trail with the cells each one occupies.
pub fn header_crumbs(header: Rect, page: Page, max_items: usize) -> Vec<(Crumb, Rect)> {
    let trail = Breadcrumb::trail(page).collapse(max_items);
    let mut x = header.x + BRAND.chars().count() as u16;
    let mut out = Vec::with_capacity(trail.len());
    for (i, crumb) in trail.crumbs().iter().enumerate() {
        if i > 0 {
            x += CRUMB_SEPARATOR.chars().count() as u16;
        }
        let width = crumb.label.chars().count() as u16;
        out.push((crumb.clone(), Rect::new(x, header.y, width, 1)));
        x += width;
    }
    out
}

/// Page a header crumb at `pos` links to.
pub fn header_link_at(header: Rect, page: Page, max_items: usize, pos: Position) -> Option<Page> {
    header_crumbs(header, page, max_items)
        .into_iter()
        .find(|(_, rect)| rect.contains(pos))
        .and_then(|(crumb, _)| crumb.target)
}

pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let crumbs = header_crumbs(area, app.page, app.breadcrumb_max);
    let last = crumbs.len().saturating_sub(1);
    let mut spans = vec![Span::styled(BRAND, theme::accent_bold())];
    for (i, (crumb, _)) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(CRUMB_SEPARATOR, theme::muted()));
        }
        let style = if i == last {
            theme::text()
        } else if crumb.target.is_some() {
            theme::accent()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(crumb.label.clone(), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_is_listed_once() {
        let pages: Vec<Page> = sidebar_entries()
            .into_iter()
            .filter_map(|e| match e {
                SidebarEntry::Page(p) => Some(p),
                SidebarEntry::Section(_) => None,
            })
            .collect();
        assert_eq!(pages.len(), Page::ALL.len());
        for page in Page::ALL {
            assert!(pages.contains(&page), "{page:?} missing");
        }
    }

    #[test]
    fn sidebar_hit_skips_headings() {
        let sidebar = Rect::new(1, 2, 18, 20);
        assert_eq!(sidebar_page_at(sidebar, Position::new(3, 2)), None);
        assert_eq!(sidebar_page_at(sidebar, Position::new(3, 3)), Some(Page::Overview));
        // Layout heading on row 4, Breadcrumbs below it.
        assert_eq!(sidebar_page_at(sidebar, Position::new(3, 5)), Some(Page::Breadcrumbs));
        assert_eq!(sidebar_page_at(sidebar, Position::new(30, 5)), None);
    }

    #[test]
    fn home_crumb_links_to_overview() {
        let header = Rect::new(0, 0, 100, 1);
        let crumbs = header_crumbs(header, Page::Sliders, 3);
        assert_eq!(crumbs.len(), 3);
        let home = crumbs[0].1;
        assert_eq!(home.x, BRAND.chars().count() as u16);
        let pos = Position::new(home.x + 1, 0);
        assert_eq!(header_link_at(header, Page::Sliders, 3, pos), Some(Page::Overview));
        // The section crumb is not a link.
        let section = crumbs[1].1;
        assert_eq!(header_link_at(header, Page::Sliders, 3, Position::new(section.x, 0)), None);
    }

    #[test]
    fn trail_collapses_to_limit() {
        let crumbs = header_crumbs(Rect::new(0, 0, 100, 1), Page::DataGrid, 2);
        let labels: Vec<&str> = crumbs.iter().map(|(c, _)| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Home", "…", "Data Grid"]);
    }
}
