use std::collections::HashMap;

use crate::syntax::{Document, Node, NodeId};

/// Cell matrix of the table currently being inline-parsed.
///
/// `None` slots are colspan placeholders. A continuation cell (`|^`) is
/// recorded against its origin and its content is moved there once the
/// whole table has been seen.
#[derive(Debug, Default)]
pub(super) struct TableState {
    rows: Vec<Vec<Option<NodeId>>>,
    origins: HashMap<NodeId, NodeId>,
}

impl TableState {
    pub(super) fn start_row(&mut self) {
        self.rows.push(Vec::new());
    }

    /// Column the next cell of the current row lands in.
    pub(super) fn column(&self) -> usize {
        self.rows.last().map_or(0, Vec::len)
    }

    pub(super) fn push_cell(&mut self, cell: NodeId, colspan: usize) {
        if self.rows.is_empty() {
            self.start_row();
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(Some(cell));
            row.extend(std::iter::repeat_n(None, colspan.saturating_sub(1)));
        }
    }

    /// The cell a continuation in `column` extends: the nearest cell above,
    /// followed back to the start of its rowspan chain.
    pub(super) fn rowspan_origin(&self, column: usize) -> Option<NodeId> {
        let above = self
            .rows
            .iter()
            .rev()
            .skip(1)
            .find_map(|row| row.get(column).copied().flatten())?;
        Some(self.origins.get(&above).copied().unwrap_or(above))
    }

    pub(super) fn mark_continuation(&mut self, cell: NodeId, origin: NodeId) {
        self.origins.insert(cell, origin);
    }

    /// Move every continuation cell's content into its origin, separated by
    /// a newline.
    pub(super) fn reconcile(self, doc: &mut Document) {
        for cell in self.rows.into_iter().flatten().flatten() {
            let Some(&origin) = self.origins.get(&cell) else {
                continue;
            };
            let moved = std::mem::take(&mut doc.node_mut(cell).children);
            let separator = doc.alloc(Node::text("\n"));
            let target = &mut doc.node_mut(origin).children;
            target.push(separator);
            target.extend(moved);
        }
    }
}
