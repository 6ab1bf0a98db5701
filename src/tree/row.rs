use serde::Serialize;

/// One line of a three-column tree table.
///
/// Rows are rebuilt from the model whenever the view changes and are never
/// stored anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
    /// GlobalId for object rows, unit for property and quantity rows.
    pub id: String,
    pub children: Vec<DisplayRow>,
}

impl DisplayRow {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            id: id.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<DisplayRow>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: DisplayRow) {
        self.children.push(child);
    }

    /// Third column when non-empty.
    #[must_use]
    pub fn global_id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    /// The three columns as a tuple, handy for comparisons.
    #[must_use]
    pub fn columns(&self) -> (&str, &str, &str) {
        (&self.label, &self.value, &self.id)
    }

    /// Depth-first walk over this row and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &DisplayRow> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let row = stack.pop()?;
            stack.extend(row.children.iter().rev());
            Some(row)
        })
    }
}
