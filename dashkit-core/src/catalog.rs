//! Gallery page catalog.

use serde::{Deserialize, Serialize};

/// One gallery page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Overview,
    Breadcrumbs,
    Cards,
    Modals,
    Drawers,
    Sliders,
    TreeView,
    DataGrid,
    Select,
    FileUpload,
    Heatmap,
}

impl Page {
    pub const ALL: [Page; 11] = [
        Page::Overview,
        Page::Breadcrumbs,
        Page::Cards,
        Page::Modals,
        Page::Drawers,
        Page::Sliders,
        Page::TreeView,
        Page::DataGrid,
        Page::Select,
        Page::FileUpload,
        Page::Heatmap,
    ];

    pub fn index(self) -> usize {
        match self {
            Page::Overview => 0,
            Page::Breadcrumbs => 1,
            Page::Cards => 2,
            Page::Modals => 3,
            Page::Drawers => 4,
            Page::Sliders => 5,
            Page::TreeView => 6,
            Page::DataGrid => 7,
            Page::Select => 8,
            Page::FileUpload => 9,
            Page::Heatmap => 10,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Breadcrumbs => "Breadcrumbs",
            Page::Cards => "Cards",
            Page::Modals => "Modals",
            Page::Drawers => "Drawers",
            Page::Sliders => "Sliders",
            Page::TreeView => "Tree View",
            Page::DataGrid => "Data Grid",
            Page::Select => "Select",
            Page::FileUpload => "File Upload",
            Page::Heatmap => "Heatmap",
        }
    }

    /// Command-line friendly name (`tree-view`, `data-grid`, ...).
    pub fn slug(self) -> &'static str {
        match self {
            Page::Overview => "overview",
            Page::Breadcrumbs => "breadcrumbs",
            Page::Cards => "cards",
            Page::Modals => "modals",
            Page::Drawers => "drawers",
            Page::Sliders => "sliders",
            Page::TreeView => "tree-view",
            Page::DataGrid => "data-grid",
            Page::Select => "select",
            Page::FileUpload => "file-upload",
            Page::Heatmap => "heatmap",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.slug().eq_ignore_ascii_case(slug.trim()))
    }

    /// Sidebar section the page is filed under.
    pub fn section(self) -> &'static str {
        match self {
            Page::Overview => "Dashboard",
            Page::Breadcrumbs | Page::Cards => "Layout",
            Page::Modals | Page::Drawers => "Overlays",
            Page::Sliders | Page::Select | Page::FileUpload => "Forms",
            Page::TreeView | Page::DataGrid | Page::Heatmap => "Data Display",
        }
    }

    pub fn next(self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_cycle() {
        assert_eq!(Page::Overview.next(), Page::Breadcrumbs);
        assert_eq!(Page::Heatmap.next(), Page::Overview);
        assert_eq!(Page::Overview.prev(), Page::Heatmap);
        assert_eq!(Page::Breadcrumbs.prev(), Page::Overview);
    }

    #[test]
    fn page_from_index() {
        for i in 0..Page::ALL.len() {
            let p = Page::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Page::from_index(Page::ALL.len()).is_none());
    }

    #[test]
    fn slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug(" Data-Grid "), Some(Page::DataGrid));
        assert_eq!(Page::from_slug("charts"), None);
    }
}
