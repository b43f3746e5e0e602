//! Breadcrumb trails for the page header.

use crate::catalog::Page;

pub const ELLIPSIS: &str = "…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    /// Page the crumb links to. `None` for section headings and the ellipsis.
    pub target: Option<Page>,
}

impl Crumb {
    pub fn new(label: impl Into<String>, target: Option<Page>) -> Self {
        Self {
            label: label.into(),
            target,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        self.label == ELLIPSIS && self.target.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breadcrumb {
    crumbs: Vec<Crumb>,
}

impl Breadcrumb {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            crumbs: labels.into_iter().map(|l| Crumb::new(l, None)).collect(),
        }
    }

    /// `Home / <section> / <page>`.
    pub fn trail(page: Page) -> Self {
        let mut crumbs = vec![Crumb::new("Home", Some(Page::Overview))];
        if page != Page::Overview {
            crumbs.push(Crumb::new(page.section(), None));
            crumbs.push(Crumb::new(page.label(), Some(page)));
        }
        Self { crumbs }
    }

    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Keep the first crumb and the last `max_items - 1`, with an ellipsis between.
    ///
    /// `max_items` below 2 is treated as 2.
    pub fn collapse(&self, max_items: usize) -> Self {
        let max_items = max_items.max(2);
        if self.crumbs.len() <= max_items {
            return self.clone();
        }
        let tail = max_items - 1;
        let mut crumbs = Vec::with_capacity(max_items + 1);
        crumbs.push(self.crumbs[0].clone());
        crumbs.push(Crumb::new(ELLIPSIS, None));
        crumbs.extend_from_slice(&self.crumbs[self.crumbs.len() - tail..]);
        Self { crumbs }
    }

    pub fn render(&self, separator: &str) -> String {
        self.crumbs
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_for_page() {
        let trail = Breadcrumb::trail(Page::Sliders);
        assert_eq!(trail.render(" / "), "Home / Forms / Sliders");
        assert_eq!(trail.crumbs()[2].target, Some(Page::Sliders));
        assert_eq!(Breadcrumb::trail(Page::Overview).len(), 1);
    }

    #[test]
    fn collapse_keeps_head_and_tail() {
        let trail = Breadcrumb::from_labels(["Home", "Org", "Team", "Project", "Settings"]);
        let collapsed = trail.collapse(3);
        assert_eq!(collapsed.render(" > "), "Home > … > Project > Settings");
        assert!(collapsed.crumbs()[1].is_ellipsis());
    }

    #[test]
    fn short_trail_untouched() {
        let trail = Breadcrumb::from_labels(["Home", "Users"]);
        assert_eq!(trail.collapse(4), trail);
        assert_eq!(trail.collapse(0).render("/"), "Home/Users");
    }
}
