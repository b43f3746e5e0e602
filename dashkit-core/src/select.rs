//! Searchable single/multi select.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Select {
    options: Vec<SelectOption>,
    multiple: bool,
    open: bool,
    query: String,
    /// Position within `filtered()`.
    highlight: Option<usize>,
    /// Option indices, in the order they were picked.
    selected: Vec<usize>,
    placeholder: String,
}

impl Select {
    pub fn new(options: Vec<SelectOption>, multiple: bool) -> Self {
        Self {
            options,
            multiple,
            open: false,
            query: String::new(),
            highlight: None,
            selected: Vec::new(),
            placeholder: "Select…".to_string(),
        }
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlight = self.first_enabled();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlight = None;
    }

    pub fn toggle_open(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Indices of options whose label contains the query, case-insensitively.
    pub fn filtered(&self) -> Vec<usize> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.open = true;
        self.highlight = self.first_enabled();
    }

    pub fn push_char(&mut self, c: char) {
        let mut q = std::mem::take(&mut self.query);
        q.push(c);
        self.set_query(&q);
    }

    /// Backspace. With an empty query in multi mode, drops the last pick.
    pub fn pop_char(&mut self) {
        if self.query.is_empty() {
            if self.multiple {
                self.selected.pop();
            }
            return;
        }
        let mut q = std::mem::take(&mut self.query);
        q.pop();
        self.set_query(&q);
    }

    fn first_enabled(&self) -> Option<usize> {
        self.filtered()
            .iter()
            .position(|&i| !self.options[i].disabled)
    }

    /// Highlighted option index (into `options`).
    pub fn highlighted(&self) -> Option<usize> {
        let filtered = self.filtered();
        self.highlight.and_then(|h| filtered.get(h).copied())
    }

    pub fn highlight_next(&mut self) {
        self.step_highlight(true);
    }

    pub fn highlight_prev(&mut self) {
        self.step_highlight(false);
    }

    /// Wraps around and skips disabled options.
    fn step_highlight(&mut self, forward: bool) {
        let filtered = self.filtered();
        let n = filtered.len();
        if n == 0 {
            self.highlight = None;
            return;
        }
        let start = self.highlight.unwrap_or(if forward { n - 1 } else { 0 });
        for offset in 1..=n {
            let pos = if forward {
                (start + offset) % n
            } else {
                (start + n - offset % n) % n
            };
            if !self.options[filtered[pos]].disabled {
                self.highlight = Some(pos);
                return;
            }
        }
        self.highlight = None;
    }

    /// Pick the highlighted option. Returns whether the selection changed.
    pub fn commit(&mut self) -> bool {
        let Some(idx) = self.highlighted() else {
            return false;
        };
        self.pick(idx)
    }

    /// Pick option `idx` directly (mouse click).
    pub fn pick(&mut self, idx: usize) -> bool {
        match self.options.get(idx) {
            Some(o) if !o.disabled => {}
            _ => return false,
        }
        if self.multiple {
            if let Some(pos) = self.selected.iter().position(|&s| s == idx) {
                self.selected.remove(pos);
            } else {
                self.selected.push(idx);
            }
            true
        } else {
            let changed = self.selected != [idx];
            self.selected = vec![idx];
            self.close();
            changed
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, idx: usize) -> bool {
        self.selected.contains(&idx)
    }

    pub fn selected(&self) -> impl Iterator<Item = &SelectOption> {
        self.selected.iter().filter_map(|&i| self.options.get(i))
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.selected().map(|o| o.value.clone()).collect()
    }

    /// What the closed control shows.
    pub fn display_text(&self) -> String {
        let labels: Vec<&str> = self.selected().map(|o| o.label.as_str()).collect();
        match labels.len() {
            0 => self.placeholder.clone(),
            1 | 2 => labels.join(", "),
            n => format!("{n} selected"),
        }
    }
}

pub fn sample_countries() -> Select {
    let options = [
        ("ar", "Argentina"),
        ("au", "Australia"),
        ("br", "Brazil"),
        ("ca", "Canada"),
        ("de", "Germany"),
        ("in", "India"),
        ("jp", "Japan"),
        ("ke", "Kenya"),
        ("nz", "New Zealand"),
        ("se", "Sweden"),
    ]
    .into_iter()
    .map(|(v, l)| SelectOption::new(v, l))
    .collect();
    Select::new(options, false).placeholder("Choose a country")
}

pub fn sample_tags() -> Select {
    let options = vec![
        SelectOption::new("bug", "Bug"),
        SelectOption::new("feature", "Feature"),
        SelectOption::new("docs", "Documentation"),
        SelectOption::new("legacy", "Legacy").disabled(),
        SelectOption::new("perf", "Performance"),
        SelectOption::new("ux", "UX"),
    ];
    Select::new(options, true).placeholder("Add tags")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive() {
        let mut s = sample_countries();
        s.set_query("AN");
        let labels: Vec<&str> = s
            .filtered()
            .into_iter()
            .map(|i| s.options()[i].label.as_str())
            .collect();
        assert_eq!(labels, vec!["Canada", "Germany", "Japan", "New Zealand"]);
    }

    #[test]
    fn highlight_skips_disabled_and_wraps() {
        let mut s = sample_tags();
        s.open();
        assert_eq!(s.highlighted(), Some(0));
        s.highlight_next();
        s.highlight_next();
        assert_eq!(s.highlighted(), Some(2));
        s.highlight_next();
        assert_eq!(s.highlighted(), Some(4), "Legacy is disabled");
        s.highlight_next();
        s.highlight_next();
        assert_eq!(s.highlighted(), Some(0));
        s.highlight_prev();
        assert_eq!(s.highlighted(), Some(5));
    }

    #[test]
    fn single_commit_closes() {
        let mut s = sample_countries();
        s.set_query("jap");
        assert!(s.commit());
        assert!(!s.is_open());
        assert_eq!(s.selected_values(), vec!["jp"]);
        assert_eq!(s.display_text(), "Japan");
        assert_eq!(s.query(), "");

        s.set_query("jap");
        assert!(!s.commit(), "same pick is not a change");
    }

    #[test]
    fn multi_toggles_and_stays_open() {
        let mut s = sample_tags();
        s.open();
        assert!(s.commit());
        s.highlight_next();
        assert!(s.commit());
        assert!(s.is_open());
        assert_eq!(s.display_text(), "Bug, Feature");
        s.pick(4);
        assert_eq!(s.display_text(), "3 selected");
        s.pick(0);
        assert_eq!(s.selected_values(), vec!["feature", "perf"]);
        s.pop_char();
        assert_eq!(s.selected_values(), vec!["feature"]);
    }

    #[test]
    fn disabled_cannot_be_picked() {
        let mut s = sample_tags();
        assert!(!s.pick(3));
        assert!(!s.pick(99));
        assert_eq!(s.display_text(), "Add tags");
    }

    #[test]
    fn empty_filter_has_no_highlight() {
        let mut s = sample_countries();
        s.set_query("zzz");
        assert!(s.filtered().is_empty());
        assert_eq!(s.highlighted(), None);
        s.highlight_next();
        assert!(!s.commit());
    }
}
