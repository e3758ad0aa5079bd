/// Body indentation of every open node on the path from the root.
///
/// Entry `d` belongs to the node at tree depth `d + 1`; the node itself is
/// found by walking last children from the root, so the stack never owns
/// anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct IndentStack {
    levels: Vec<usize>,
}

impl IndentStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub(crate) fn top(&self) -> Option<usize> {
        self.levels.last().copied()
    }

    pub(crate) fn push(&mut self, indent: usize) {
        self.levels.push(indent);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.levels.pop()
    }

    pub(crate) fn truncate(&mut self, depth: usize) {
        self.levels.truncate(depth);
    }

    pub(crate) fn clear(&mut self) {
        self.levels.clear();
    }

    /// Close everything deeper than `indent`.
    ///
    /// Keeps entries up to and including the first one at or beyond
    /// `indent`, plus the run of entries directly after it that sit at
    /// exactly `indent` (a list nested in an item shares the item's body
    /// indentation).
    pub(crate) fn dedent(&mut self, indent: usize) {
        let Some(first) = self.levels.iter().position(|&level| level >= indent) else {
            return;
        };
        let mut keep = first + 1;
        while self.levels.get(keep) == Some(&indent) {
            keep += 1;
        }
        self.levels.truncate(keep);
    }
}
