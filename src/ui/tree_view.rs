use crate::tree::DisplayRow;
use std::collections::HashSet;

/// Position of a row in the tree: child indices from the top level down.
pub type RowPath = Vec<usize>;

/// A row currently on screen, i.e. all of its ancestors are expanded.
#[derive(Debug)]
pub struct VisibleRow<'a> {
    pub path: RowPath,
    pub row: &'a DisplayRow,
    pub expanded: bool,
}

impl VisibleRow<'_> {
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Expansion, cursor and selection state of one three-column tree table.
///
/// Moving the cursor selects the row under it; `toggle_selected` adds or
/// removes the cursor row without touching the rest of the selection.
#[derive(Debug)]
pub struct TreeView {
    pub title: &'static str,
    pub headers: [&'static str; 3],
    roots: Vec<DisplayRow>,
    expanded: HashSet<RowPath>,
    cursor: Option<RowPath>,
    selection: Vec<RowPath>,
}

impl TreeView {
    #[must_use]
    pub fn new(title: &'static str, headers: [&'static str; 3]) -> Self {
        Self {
            title,
            headers,
            roots: Vec::new(),
            expanded: HashSet::new(),
            cursor: None,
            selection: Vec::new(),
        }
    }

    /// Replaces all rows and resets expansion, cursor and selection.
    pub fn set_rows(&mut self, rows: Vec<DisplayRow>) {
        self.cursor = if rows.is_empty() { None } else { Some(vec![0]) };
        self.roots = rows;
        self.expanded.clear();
        self.selection.clear();
    }

    pub fn clear(&mut self) {
        self.set_rows(Vec::new());
    }

    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Expands every row whose depth is at most `depth` (top level is 0).
    pub fn expand_to_depth(&mut self, depth: usize) {
        let paths: Vec<RowPath> = self
            .all_rows()
            .into_iter()
            .filter(|(path, row)| path.len() <= depth + 1 && !row.children.is_empty())
            .map(|(path, _)| path)
            .collect();
        self.expanded.extend(paths);
    }

    pub fn expand_all(&mut self) {
        self.expand_to_depth(usize::MAX - 1);
    }

    #[must_use]
    pub fn row_at(&self, path: &[usize]) -> Option<&DisplayRow> {
        let (first, rest) = path.split_first()?;
        let mut row = self.roots.get(*first)?;
        for &index in rest {
            row = row.children.get(index)?;
        }
        Some(row)
    }

    fn all_rows(&self) -> Vec<(RowPath, &DisplayRow)> {
        let mut out = Vec::new();
        let mut stack: Vec<(RowPath, &DisplayRow)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, row)| (vec![i], row))
            .collect();

        while let Some((path, row)) = stack.pop() {
            for (i, child) in row.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
            out.push((path, row));
        }

        out
    }

    /// Rows on screen, in display order.
    #[must_use]
    pub fn visible(&self) -> Vec<VisibleRow<'_>> {
        let mut out = Vec::new();
        let mut stack: Vec<(RowPath, &DisplayRow)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, row)| (vec![i], row))
            .collect();

        while let Some((path, row)) = stack.pop() {
            let expanded = self.expanded.contains(&path);
            if expanded {
                for (i, child) in row.children.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    stack.push((child_path, child));
                }
            }
            out.push(VisibleRow {
                path,
                row,
                expanded,
            });
        }

        out
    }

    /// Index of the cursor among the visible rows.
    #[must_use]
    pub fn cursor_index(&self) -> Option<usize> {
        let cursor = self.cursor.as_ref()?;
        self.visible().iter().position(|v| &v.path == cursor)
    }

    #[must_use]
    pub fn cursor_row(&self) -> Option<&DisplayRow> {
        self.cursor.as_deref().and_then(|path| self.row_at(path))
    }

    #[must_use]
    pub fn is_selected(&self, path: &[usize]) -> bool {
        self.selection.iter().any(|p| p == path)
    }

    /// Selected rows in the order they were selected.
    #[must_use]
    pub fn selected_rows(&self) -> Vec<&DisplayRow> {
        self.selection
            .iter()
            .filter_map(|path| self.row_at(path))
            .collect()
    }

    /// Moves the cursor by `delta` visible rows and selects the row it lands
    /// on. Returns true when the selection changed.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        match self.step(delta) {
            Some(path) => self.select_only(path),
            None => false,
        }
    }

    /// Moves the cursor without touching the selection.
    pub fn move_focus(&mut self, delta: isize) {
        if let Some(path) = self.step(delta) {
            self.cursor = Some(path);
        }
    }

    fn step(&self, delta: isize) -> Option<RowPath> {
        let visible = self.visible();
        if visible.is_empty() {
            return None;
        }

        let current = self
            .cursor
            .as_ref()
            .and_then(|c| visible.iter().position(|v| &v.path == c));
        let target = match current {
            Some(index) => index.saturating_add_signed(delta).min(visible.len() - 1),
            None => 0,
        };
        Some(visible[target].path.clone())
    }

    fn select_only(&mut self, path: RowPath) -> bool {
        let changed = self.selection != [path.clone()];
        self.cursor = Some(path.clone());
        self.selection = vec![path];
        changed
    }

    /// Adds the cursor row to the selection, or removes it if already
    /// selected. Returns true when the selection changed.
    pub fn toggle_selected(&mut self) -> bool {
        let Some(cursor) = self.cursor.clone() else {
            return false;
        };
        if let Some(pos) = self.selection.iter().position(|p| *p == cursor) {
            self.selection.remove(pos);
        } else {
            self.selection.push(cursor);
        }
        true
    }

    /// Expands the cursor row. Returns false if it has no children or is
    /// already open.
    pub fn expand(&mut self) -> bool {
        let Some(cursor) = self.cursor.clone() else {
            return false;
        };
        let has_children = self.row_at(&cursor).is_some_and(|r| !r.children.is_empty());
        has_children && self.expanded.insert(cursor)
    }

    /// Collapses the cursor row, or moves to its parent when it is already
    /// collapsed. Returns true when the selection changed.
    pub fn collapse(&mut self) -> bool {
        let Some(cursor) = self.cursor.clone() else {
            return false;
        };
        if self.expanded.remove(&cursor) {
            return false;
        }
        if cursor.len() > 1 {
            let parent = cursor[..cursor.len() - 1].to_vec();
            return self.select_only(parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeView {
        let tree = DisplayRow::new("file", "", "").with_children(vec![
            DisplayRow::new("Project", "IfcProject", "p").with_children(vec![
                DisplayRow::new("Site", "IfcSite", "s")
                    .with_children(vec![DisplayRow::new("Building", "IfcBuilding", "b")]),
            ]),
        ]);
        let mut view = TreeView::new(" Objects ", ["Name", "Class", "GlobalId"]);
        view.set_rows(vec![tree]);
        view
    }

    fn labels(view: &TreeView) -> Vec<&str> {
        view.visible().iter().map(|v| v.row.label.as_str()).collect()
    }

    #[test]
    fn expands_to_depth() {
        let mut view = sample();
        assert_eq!(labels(&view), vec!["file"]);
        view.expand_to_depth(1);
        assert_eq!(labels(&view), vec!["file", "Project", "Site"]);
        view.expand_all();
        assert_eq!(labels(&view), vec!["file", "Project", "Site", "Building"]);
    }

    #[test]
    fn cursor_moves_select_single_row() {
        let mut view = sample();
        view.expand_all();
        assert!(view.selected_rows().is_empty());

        assert!(view.move_cursor(1));
        assert_eq!(view.selected_rows()[0].label, "Project");
        assert!(view.move_cursor(10));
        assert_eq!(view.cursor_index(), Some(3));
        assert!(!view.move_cursor(1));
        assert!(view.move_cursor(-10));
        assert_eq!(view.selected_rows().len(), 1);
        assert_eq!(view.selected_rows()[0].label, "file");
    }

    #[test]
    fn toggling_builds_ordered_selection() {
        let mut view = sample();
        view.expand_all();
        view.move_cursor(2);
        view.move_focus(1);
        assert!(view.toggle_selected());
        let selected: Vec<&str> = view
            .selected_rows()
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(selected, vec!["Site", "Building"]);

        assert!(view.toggle_selected());
        assert_eq!(view.selected_rows().len(), 1);
        assert_eq!(view.selected_rows()[0].label, "Site");
    }

    #[test]
    fn collapse_moves_to_parent() {
        let mut view = sample();
        view.expand_all();
        view.move_cursor(2);
        assert!(!view.collapse());
        assert_eq!(labels(&view), vec!["file", "Project", "Site"]);
        assert!(view.collapse());
        assert_eq!(view.cursor_row().map(|r| r.label.as_str()), Some("Project"));
        assert!(!view.collapse());
        assert_eq!(labels(&view), vec!["file", "Project"]);
        assert!(view.expand());
        assert!(!view.expand());
    }

    #[test]
    fn set_rows_resets_state() {
        let mut view = sample();
        view.expand_all();
        view.move_cursor(1);
        view.clear();
        assert!(view.is_empty());
        assert!(view.visible().is_empty());
        assert!(view.selected_rows().is_empty());
        assert!(!view.move_cursor(1));
    }
}
