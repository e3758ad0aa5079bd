//! Inline pass: turns the raw `content` of block nodes into inline children.
//!
//! Every block that still carries text is tokenized ([`tokenizer`]) and the
//! tokens are matched into nested inline nodes ([`matcher`]). Compact table
//! rows are split into cells here too, which is why this pass also owns the
//! rowspan bookkeeping in [`tables`].

mod matcher;
mod tables;
pub mod tokenizer;


use crate::math::{MathError, MathRenderer};
use crate::options::ParserOptions;
use crate::syntax::{BlockKind, Document, Node, NodeId};
use tables::TableState;
use tokenizer::{TokenContext, tokenize};

pub struct InlineParser<'a> {
    options: &'a ParserOptions,
    math: &'a dyn MathRenderer,
    table: TableState,
}

impl<'a> InlineParser<'a> {
    pub fn new(options: &'a ParserOptions, math: &'a dyn MathRenderer) -> Self {
        Self {
            options,
            math,
            table: TableState::default(),
        }
    }

    pub fn parse(mut self, doc: &mut Document) -> Result<(), MathError> {
        log::debug!("Inline parsing {} nodes", doc.len());
        let root = doc.root();
        self.parse_block(doc, root, false)
    }

    fn parse_block(
        &mut self,
        doc: &mut Document,
        id: NodeId,
        literal_parent: bool,
    ) -> Result<(), MathError> {
        let Some(kind) = doc.kind(id).as_block().cloned() else {
            // Inline nodes are complete once built.
            return Ok(());
        };

        let outer_table = if kind == BlockKind::Table {
            Some(std::mem::take(&mut self.table))
        } else {
            None
        };
        if kind == BlockKind::TableRow {
            self.table.start_row();
            let cells: Vec<NodeId> = doc
                .children(id)
                .iter()
                .copied()
                .filter(|&child| matches!(doc.kind(child).as_block(), Some(BlockKind::TableCell { .. })))
                .collect();
            for cell in cells {
                self.table.push_cell(cell, 1);
            }
        }

        if kind == BlockKind::Line && literal_parent {
            self.keep_literal(doc, id);
        } else {
            self.parse_content(doc, id, &kind)?;
        }

        let literal = kind.is_literal();
        for child in doc.children(id).to_vec() {
            self.parse_block(doc, child, literal)?;
        }

        if let Some(outer) = outer_table {
            let finished = std::mem::replace(&mut self.table, outer);
            finished.reconcile(doc);
        }
        Ok(())
    }

    fn parse_content(
        &mut self,
        doc: &mut Document,
        id: NodeId,
        kind: &BlockKind,
    ) -> Result<(), MathError> {
        let Some(content) = doc.node(id).content.clone() else {
            return Ok(());
        };
        let context = match kind {
            BlockKind::TableCells => TokenContext::TableCells,
            BlockKind::BlockMath => TokenContext::Math,
            _ => TokenContext::Flow,
        };
        let tokens = tokenize(&content, context, &self.options.data);
        let children = self.build(doc, &tokens)?;

        let node = doc.node_mut(id);
        let has_children = !children.is_empty();
        node.children.extend(children);
        if self.options.debug_tokens {
            node.tokens = Some(tokens);
        } else if has_children {
            node.content = None;
        }
        Ok(())
    }

    /// Code, comment and `@pre` lines become a single TEXT child.
    fn keep_literal(&mut self, doc: &mut Document, id: NodeId) {
        let Some(content) = doc.node(id).content.clone() else {
            return;
        };
        if content.is_empty() {
            return;
        }
        doc.append(id, Node::text(content));
        if !self.options.debug_tokens {
            doc.node_mut(id).content = None;
        }
    }
}
