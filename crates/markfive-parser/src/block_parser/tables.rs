use super::{BlockParser, Body};
use crate::lexer::LineToken;
use crate::syntax::attributes::parse_optional;
use crate::syntax::{BlockKind, Node};

impl BlockParser<'_> {
    /// `|| a | b` or `|! a | b`: one compact row, split into cells later by
    /// the inline parser.
    pub(super) fn parse_table_row(&mut self, token: &LineToken) -> bool {
        self.prepare(token.indent);
        self.leave_row();
        self.ensure_table(token.indent);
        let row = self.append(
            Node::block(BlockKind::TableRow)
                .with_attributes(parse_optional(token.attributes.as_deref())),
            Body::Leaf,
        );
        self.doc.append(
            row,
            Node::block(BlockKind::TableCells).with_optional_content(token.text.clone()),
        );
        false
    }

    /// `|-` starts a row whose cells follow on their own lines.
    pub(super) fn parse_row_separator(&mut self, token: &LineToken) -> bool {
        self.prepare(token.indent);
        self.leave_row();
        self.ensure_table(token.indent);
        self.append(
            Node::block(BlockKind::TableRow)
                .with_attributes(parse_optional(token.attributes.as_deref())),
            Body::Indent(token.indent),
        );
        false
    }

    pub(super) fn parse_table_cell(&mut self, token: &LineToken) -> bool {
        self.prepare(token.indent);
        if !self.active_is(&BlockKind::TableRow) {
            self.ensure_table(token.indent);
            self.append(Node::block(BlockKind::TableRow), Body::Indent(token.indent));
        }

        let header = token.marker.as_deref() == Some("!");
        let cell = Node::block(BlockKind::TableCell { header })
            .with_attributes(parse_optional(token.attributes.as_deref()));
        match self.deeper_next(token.indent) {
            Some(body_indent) => {
                let id = self.append(cell, Body::Indent(body_indent));
                if let Some(text) = &token.text {
                    self.doc
                        .append(id, Node::block(BlockKind::Line).with_content(text.as_str()));
                }
                token.text.is_none()
            }
            None => {
                self.append(cell.with_optional_content(token.text.clone()), Body::Leaf);
                false
            }
        }
    }

    fn leave_row(&mut self) {
        if self.active_is(&BlockKind::TableRow) {
            self.stack.pop();
        }
    }

    fn ensure_table(&mut self, indent: usize) {
        if !self.active_is(&BlockKind::Table) {
            self.append(Node::block(BlockKind::Table), Body::Indent(indent));
        }
    }

    /// A blank line ends the outermost open table.
    pub(super) fn close_tables(&mut self) {
        let path = self.path();
        let table_depth = path
            .iter()
            .position(|&id| self.block_kind(id) == Some(&BlockKind::Table));
        if let Some(depth) = table_depth {
            // Stack entry `d` belongs to the node at path index `d + 1`.
            self.stack.truncate(depth - 1);
        }
    }
}
