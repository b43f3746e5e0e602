//! Data grid: typed columns, click-to-sort, pagination and row selection.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::Write;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Text,
    Number,
    Date,
    Status,
}

/// Account status, ordered by how "alive" the account is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Invited,
    Suspended,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Invited => "invited",
            Status::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Status(Status),
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format!("{n:.2}"),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Status(s) => s.label().to_string(),
        }
    }

    fn is_nan(&self) -> bool {
        matches!(self, Cell::Number(n) if n.is_nan())
    }

    fn compare(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Text(a), Cell::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Date(a), Cell::Date(b)) => a.cmp(b),
            (Cell::Status(a), Cell::Status(b)) => a.cmp(b),
            // Mixed kinds in one column: fall back to the rendered text.
            (a, b) => a.display().cmp(&b.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub kind: CellKind,
    pub width: u16,
}

impl Column {
    pub fn new(key: &str, title: &str, kind: CellKind, width: u16) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            kind,
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct DataGrid {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    /// Row indices in display order.
    order: Vec<usize>,
    sort: Option<SortState>,
    page: usize,
    page_size: usize,
    /// Cursor within the current page.
    cursor: usize,
    selected: BTreeSet<usize>,
}

impl DataGrid {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Cell>>, page_size: usize) -> Self {
        let order = (0..rows.len()).collect();
        Self {
            columns,
            rows,
            order,
            sort: None,
            page: 0,
            page_size: page_size.max(1),
            cursor: 0,
            selected: BTreeSet::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key.eq_ignore_ascii_case(key))
    }

    /// Header click: `None → Ascending → Descending → None` on the same
    /// column, `Ascending` when switching columns.
    pub fn toggle_sort(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        self.sort = match self.sort {
            Some(SortState {
                column: c,
                direction: SortDirection::Ascending,
            }) if c == column => Some(SortState {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortState {
                column: c,
                direction: SortDirection::Descending,
            }) if c == column => None,
            _ => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.apply_sort();
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort.filter(|s| s.column < self.columns.len());
        self.apply_sort();
    }

    /// Stable, type-aware; `NaN` numbers always sort last.
    fn apply_sort(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if let Some(SortState { column, direction }) = self.sort {
            let rows = &self.rows;
            order.sort_by(|&a, &b| {
                let (ca, cb) = (&rows[a][column], &rows[b][column]);
                match (ca.is_nan(), cb.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => match direction {
                        SortDirection::Ascending => ca.compare(cb),
                        SortDirection::Descending => cb.compare(ca),
                    },
                }
            });
        }
        self.order = order;
        self.page = 0;
        self.cursor = 0;
    }

    /// All rows in display order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.order.iter().map(move |&i| (i, self.rows[i].as_slice()))
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// At least one page, even when empty.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// `(row id, cells)` for the visible page.
    pub fn page_rows(&self) -> Vec<(usize, &[Cell])> {
        self.sorted_rows()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    fn page_len(&self) -> usize {
        self.rows
            .len()
            .saturating_sub(self.page * self.page_size)
            .min(self.page_size)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.page_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn set_cursor(&mut self, row_on_page: usize) {
        if row_on_page < self.page_len() {
            self.cursor = row_on_page;
        }
    }

    fn cursor_row_id(&self) -> Option<usize> {
        self.order.get(self.page * self.page_size + self.cursor).copied()
    }

    pub fn is_selected(&self, row_id: usize) -> bool {
        self.selected.contains(&row_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.cursor_row_id() {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        }
    }

    pub fn select_page(&mut self) {
        let ids: Vec<usize> = self.page_rows().into_iter().map(|(id, _)| id).collect();
        self.selected.extend(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Write header plus every row in display order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.columns.iter().map(|c| c.key.as_str()))?;
        for (_, cells) in self.sorted_rows() {
            wtr.write_record(cells.iter().map(Cell::display))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

const FIRST_NAMES: [&str; 14] = [
    "Ada", "Brian", "Chloe", "Dmitri", "Elena", "Farah", "Gustavo", "Hana", "Ivan", "Julia",
    "Kofi", "Lena", "Mateo", "Noor",
];
const LAST_NAMES: [&str; 3] = ["Okafor", "Lindqvist", "Moreau"];
const ROLES: [&str; 4] = ["admin", "editor", "viewer", "billing"];
const STATUSES: [Status; 4] = [
    Status::Active,
    Status::Active,
    Status::Invited,
    Status::Suspended,
];

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", CellKind::Text, 18),
        Column::new("email", "Email", CellKind::Text, 26),
        Column::new("role", "Role", CellKind::Text, 8),
        Column::new("status", "Status", CellKind::Status, 10),
        Column::new("joined", "Joined", CellKind::Date, 10),
        Column::new("revenue", "Revenue", CellKind::Number, 10),
    ]
}

/// 42 deterministic users for the grid page and CSV export.
pub fn sample_users() -> DataGrid {
    let epoch = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();
    let rows = (0..42usize)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[i / FIRST_NAMES.len()];
            vec![
                Cell::Text(format!("{first} {last}")),
                Cell::Text(format!(
                    "{}.{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                )),
                Cell::Text(ROLES[i % ROLES.len()].to_string()),
                Cell::Status(STATUSES[(i * 7) % STATUSES.len()]),
                Cell::Date(epoch + Duration::days(((i * 37) % 900) as i64)),
                Cell::Number(((i * 7919) % 50_000) as f64 / 10.0),
            ]
        })
        .collect();
    DataGrid::new(user_columns(), rows, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> DataGrid {
        let columns = vec![
            Column::new("name", "Name", CellKind::Text, 10),
            Column::new("score", "Score", CellKind::Number, 6),
        ];
        let rows = vec![
            vec![Cell::Text("bravo".into()), Cell::Number(2.0)],
            vec![Cell::Text("Alpha".into()), Cell::Number(f64::NAN)],
            vec![Cell::Text("charlie".into()), Cell::Number(1.0)],
            vec![Cell::Text("alpha".into()), Cell::Number(3.0)],
        ];
        DataGrid::new(columns, rows, 3)
    }

    fn names(grid: &DataGrid) -> Vec<String> {
        grid.sorted_rows().map(|(_, cells)| cells[0].display()).collect()
    }

    #[test]
    fn sort_cycles_through_three_states() {
        let mut grid = small_grid();
        grid.toggle_sort(0);
        assert_eq!(grid.sort().unwrap().direction, SortDirection::Ascending);
        // Case-insensitive and stable: "Alpha" came before "alpha".
        assert_eq!(names(&grid), vec!["Alpha", "alpha", "bravo", "charlie"]);

        grid.toggle_sort(0);
        assert_eq!(grid.sort().unwrap().direction, SortDirection::Descending);
        assert_eq!(names(&grid)[0], "charlie");

        grid.toggle_sort(0);
        assert_eq!(grid.sort(), None);
        assert_eq!(names(&grid), vec!["bravo", "Alpha", "charlie", "alpha"]);
    }

    #[test]
    fn switching_column_starts_ascending() {
        let mut grid = small_grid();
        grid.toggle_sort(0);
        grid.toggle_sort(1);
        assert_eq!(
            grid.sort(),
            Some(SortState {
                column: 1,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn nan_sorts_last_both_ways() {
        let mut grid = small_grid();
        grid.toggle_sort(1);
        assert_eq!(names(&grid), vec!["charlie", "bravo", "alpha", "Alpha"]);
        grid.toggle_sort(1);
        assert_eq!(names(&grid), vec!["alpha", "bravo", "charlie", "Alpha"]);
    }

    #[test]
    fn pagination_is_clamped() {
        let mut grid = small_grid();
        assert_eq!(grid.page_count(), 2);
        assert_eq!(grid.page_rows().len(), 3);
        grid.next_page();
        assert_eq!(grid.page_rows().len(), 1);
        grid.next_page();
        assert_eq!(grid.page(), 1);
        grid.prev_page();
        grid.prev_page();
        assert_eq!(grid.page(), 0);

        let empty = DataGrid::new(user_columns(), Vec::new(), 10);
        assert_eq!(empty.page_count(), 1);
        assert!(empty.page_rows().is_empty());
    }

    #[test]
    fn cursor_stays_on_page() {
        let mut grid = small_grid();
        for _ in 0..10 {
            grid.cursor_down();
        }
        assert_eq!(grid.cursor(), 2);
        grid.next_page();
        assert_eq!(grid.cursor(), 0);
    }

    #[test]
    fn selection() {
        let mut grid = small_grid();
        grid.toggle_selected();
        assert!(grid.is_selected(0));
        grid.toggle_selected();
        assert!(!grid.is_selected(0));
        grid.select_page();
        assert_eq!(grid.selected_count(), 3);
        grid.clear_selection();
        assert_eq!(grid.selected_count(), 0);
    }

    #[test]
    fn csv_follows_sort_order() {
        let mut grid = small_grid();
        grid.toggle_sort(0);
        grid.toggle_sort(0);
        let mut out = Vec::new();
        grid.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,score"));
        assert_eq!(lines.next(), Some("charlie,1.00"));
    }

    #[test]
    fn sample_users_shape() {
        let grid = sample_users();
        assert_eq!(grid.row_count(), 42);
        assert_eq!(grid.page_count(), 5);
        assert_eq!(grid.column_index("Revenue"), Some(5));
        assert_eq!(grid.columns().len(), 6);
    }
}
