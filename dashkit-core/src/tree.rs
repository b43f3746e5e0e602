//! Expandable tree view with a flattened, cursor-addressable row list.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(id: &str, label: &str, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One rendered line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TreeView {
    roots: Vec<TreeNode>,
    expanded: HashSet<String>,
    cursor: usize,
    selected: Option<String>,
}

impl TreeView {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots,
            ..Self::default()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Depth-first rows, descending only into expanded branches.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.push_rows(root, 0, None, &mut rows);
        }
        rows
    }

    fn push_rows(
        &self,
        node: &TreeNode,
        depth: usize,
        parent: Option<&str>,
        rows: &mut Vec<VisibleRow>,
    ) {
        let expanded = node.has_children() && self.expanded.contains(&node.id);
        rows.push(VisibleRow {
            id: node.id.clone(),
            label: node.label.clone(),
            depth,
            has_children: node.has_children(),
            expanded,
            parent: parent.map(str::to_string),
        });
        if expanded {
            for child in &node.children {
                self.push_rows(child, depth + 1, Some(&node.id), rows);
            }
        }
    }

    fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
        for node in nodes {
            if node.id == id {
                return Some(node);
            }
            if let Some(found) = Self::find(&node.children, id) {
                return Some(found);
            }
        }
        None
    }

    /// Leaves and unknown ids are ignored.
    pub fn expand(&mut self, id: &str) {
        if Self::find(&self.roots, id).is_some_and(TreeNode::has_children) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn collapse(&mut self, id: &str) {
        let cursor_id = self.cursor_row().map(|r| r.id);
        self.expanded.remove(id);
        self.restore_cursor(cursor_id, id);
    }

    pub fn toggle(&mut self, id: &str) {
        if self.expanded.contains(id) {
            self.collapse(id);
        } else {
            self.expand(id);
        }
    }

    pub fn expand_all(&mut self) {
        fn walk(nodes: &[TreeNode], out: &mut HashSet<String>) {
            for n in nodes {
                if n.has_children() {
                    out.insert(n.id.clone());
                    walk(&n.children, out);
                }
            }
        }
        walk(&self.roots, &mut self.expanded);
    }

    pub fn collapse_all(&mut self) {
        let cursor_id = self.cursor_row().map(|r| r.id);
        self.expanded.clear();
        // Fall back to the cursor's root.
        let rows = self.visible_rows();
        self.cursor = cursor_id
            .and_then(|id| {
                self.roots
                    .iter()
                    .position(|r| r.id == id || Self::find(&r.children, &id).is_some())
            })
            .and_then(|root_idx| rows.iter().position(|r| r.id == self.roots[root_idx].id))
            .unwrap_or(0);
    }

    /// After a collapse, keep the cursor on the same node, or on the
    /// collapsed node when its row disappeared.
    fn restore_cursor(&mut self, cursor_id: Option<String>, collapsed: &str) {
        let rows = self.visible_rows();
        let target = cursor_id
            .and_then(|id| rows.iter().position(|r| r.id == id))
            .or_else(|| rows.iter().position(|r| r.id == collapsed));
        self.cursor = target.unwrap_or(0).min(rows.len().saturating_sub(1));
    }

    pub fn cursor_row(&self) -> Option<VisibleRow> {
        self.visible_rows().into_iter().nth(self.cursor)
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible_rows().len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn set_cursor(&mut self, row: usize) {
        if row < self.visible_rows().len() {
            self.cursor = row;
        }
    }

    /// Right arrow: expand, or step into the first child when already open.
    pub fn cursor_right(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if !row.has_children {
            return;
        }
        if row.expanded {
            self.cursor_down();
        } else {
            self.expand(&row.id);
        }
    }

    /// Left arrow: collapse, or jump to the parent.
    pub fn cursor_left(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if row.expanded {
            self.collapse(&row.id);
        } else if let Some(parent) = row.parent {
            if let Some(pos) = self.visible_rows().iter().position(|r| r.id == parent) {
                self.cursor = pos;
            }
        }
    }

    /// Enter: toggle branches, select leaves.
    pub fn activate(&mut self) {
        let Some(row) = self.cursor_row() else {
            return;
        };
        if row.has_children {
            self.toggle(&row.id);
        } else {
            self.selected = Some(row.id);
        }
    }
}

pub fn sample_tree() -> TreeView {
    TreeView::new(vec![
        TreeNode::branch(
            "src",
            "src",
            vec![
                TreeNode::branch(
                    "src/components",
                    "components",
                    vec![
                        TreeNode::leaf("src/components/slider.rs", "slider.rs"),
                        TreeNode::leaf("src/components/select.rs", "select.rs"),
                        TreeNode::leaf("src/components/grid.rs", "grid.rs"),
                    ],
                ),
                TreeNode::branch(
                    "src/pages",
                    "pages",
                    vec![
                        TreeNode::leaf("src/pages/overview.rs", "overview.rs"),
                        TreeNode::leaf("src/pages/settings.rs", "settings.rs"),
                    ],
                ),
                TreeNode::leaf("src/main.rs", "main.rs"),
            ],
        ),
        TreeNode::branch(
            "assets",
            "assets",
            vec![
                TreeNode::leaf("assets/logo.svg", "logo.svg"),
                TreeNode::leaf("assets/theme.css", "theme.css"),
            ],
        ),
        TreeNode::leaf("README.md", "README.md"),
    ])
}
