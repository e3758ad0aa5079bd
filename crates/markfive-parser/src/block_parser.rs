//! Block parser: folds the line token stream into a tree of block nodes.
//!
//! The parser keeps an [`IndentStack`] describing the path from the root to
//! the node that currently receives lines. Every decision is local to the
//! current token plus one token of lookahead.

use crate::lexer::{LineKind, LineToken};
use crate::math::{MathError, MathRenderer};
use crate::syntax::attributes::parse_optional;
use crate::syntax::{Attributes, BlockKind, Document, Node, NodeId};

mod indent_stack;
mod lists;
mod nesting;
mod tables;
mod verbatim;

use indent_stack::IndentStack;
use verbatim::Verbatim;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// How an appended node takes part in the indent stack.
#[derive(Debug, Clone, Copy)]
enum Body {
    /// Nothing attaches below the node through the stack.
    Leaf,
    /// Following lines at this indentation continue inside the node.
    Indent(usize),
}

pub struct BlockParser<'a> {
    tokens: &'a [LineToken],
    pos: usize,
    doc: Document,
    stack: IndentStack,
    pending_attributes: Option<Attributes>,
    verbatim: Option<Verbatim>,
    math: &'a dyn MathRenderer,
    /// Start of a new block run: markers here are structural.
    open: bool,
}

impl<'a> BlockParser<'a> {
    pub fn new(tokens: &'a [LineToken], math: &'a dyn MathRenderer) -> Self {
        Self {
            tokens,
            pos: 0,
            doc: Document::new(),
            stack: IndentStack::new(),
            pending_attributes: None,
            verbatim: None,
            math,
            open: true,
        }
    }

    pub fn parse(mut self) -> Result<Document, MathError> {
        #[cfg(debug_assertions)]
        {
            init_logger();
        }

        let tokens = self.tokens;
        while self.pos < tokens.len() {
            let token = &tokens[self.pos];
            if !self.continue_verbatim(token) {
                self.open = self.parse_token(token)?;
            }
            self.pos += 1;
        }

        log::debug!("Block parser produced {} nodes", self.doc.len());
        Ok(self.doc)
    }

    /// Handle one token and report whether the next position is open.
    fn parse_token(&mut self, token: &LineToken) -> Result<bool, MathError> {
        log::trace!(
            "{:?} at line {} (indent {}, stack {:?})",
            token.kind,
            self.pos + 1,
            token.indent,
            self.stack
        );

        let open = match token.kind {
            LineKind::EmptyLine => {
                self.close_tables();
                true
            }
            LineKind::AttributesLine => self.parse_attributes_line(token),
            LineKind::TextLine => {
                self.add_text_line(token.indent, token.text.as_deref().unwrap_or_default());
                false
            }
            LineKind::HeadingMark => {
                self.parse_heading(token);
                false
            }
            LineKind::SeparatorMark => {
                self.parse_separator(token);
                false
            }
            LineKind::FinalColonLine => self.parse_final_colon(token),
            _ if !self.open && self.swallowed_by_paragraph(token.indent) => {
                self.continue_text(token.indent, token.line.trim_start());
                false
            }
            LineKind::ListItemMark => self.parse_list_item(token),
            LineKind::DescriptionListItemMark => self.parse_description_item(token),
            LineKind::BlockQuoteMark => self.parse_container(token, BlockKind::BlockQuote),
            LineKind::DivMark => self.parse_container(token, BlockKind::Div),
            LineKind::BlockOtherMark => {
                let tag = token.marker.clone().unwrap_or_default();
                let kind = BlockKind::BlockOther { tag };
                if kind.is_verbatim() {
                    self.parse_verbatim_marker(token, kind)
                } else {
                    self.parse_container(token, kind)
                }
            }
            LineKind::BlockCodeMark => self.parse_verbatim_marker(token, BlockKind::BlockCode),
            LineKind::BlockKbdMark => self.parse_verbatim_marker(token, BlockKind::BlockKbd),
            LineKind::BlockSampMark => self.parse_verbatim_marker(token, BlockKind::BlockSamp),
            LineKind::CommentMark => self.parse_verbatim_marker(token, BlockKind::Comment),
            LineKind::TableRowMark => self.parse_table_row(token),
            LineKind::TableRowSeparatorMark => self.parse_row_separator(token),
            LineKind::TableCellMark => self.parse_table_cell(token),
            LineKind::MathMark => {
                self.parse_math(token)?;
                false
            }
        };
        Ok(open)
    }

    // --- indent stack -----------------------------------------------------

    /// The node that currently receives children.
    fn active(&self) -> NodeId {
        let mut node = self.doc.root();
        for _ in 0..self.stack.depth() {
            match self.doc.last_child(node) {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Root first, active node last.
    fn path(&self) -> Vec<NodeId> {
        let mut path = vec![self.doc.root()];
        let mut node = self.doc.root();
        for _ in 0..self.stack.depth() {
            match self.doc.last_child(node) {
                Some(child) => {
                    path.push(child);
                    node = child;
                }
                None => break,
            }
        }
        path
    }

    fn block_kind(&self, id: NodeId) -> Option<&BlockKind> {
        self.doc.kind(id).as_block()
    }

    fn active_is(&self, kind: &BlockKind) -> bool {
        self.block_kind(self.active()) == Some(kind)
    }

    fn adapt(&mut self, indent: usize) {
        let Some(top) = self.stack.top() else {
            return;
        };
        if indent >= top {
            return;
        }
        self.stack.dedent(indent);

        // A quote or div whose body sat deeper than the new line is over.
        let single_line_body = matches!(
            self.block_kind(self.active()),
            Some(
                BlockKind::BlockQuote
                    | BlockKind::Div
                    | BlockKind::DescriptionList
                    | BlockKind::BlockOther { .. }
            )
        );
        if single_line_body && self.stack.top().is_some_and(|top| top > indent) {
            self.stack.pop();
        }
    }

    /// A deeper line under a list or row continues its last item or cell.
    fn descend(&mut self, indent: usize) {
        if !self.stack.top().is_some_and(|top| indent > top) {
            return;
        }
        let active = self.active();
        let holds_items = matches!(
            self.block_kind(active),
            Some(
                BlockKind::OrderedList
                    | BlockKind::UnorderedList
                    | BlockKind::DescriptionList
                    | BlockKind::TableRow
            )
        );
        if !holds_items {
            return;
        }
        let Some(last) = self.doc.last_child(active) else {
            return;
        };
        if matches!(
            self.block_kind(last),
            Some(
                BlockKind::ListItem { .. }
                    | BlockKind::DescriptionListItem { .. }
                    | BlockKind::TableCell { .. }
            )
        ) {
            self.promote(last);
            self.stack.push(indent);
        }
    }

    /// Move single-line `content` into a LINE child so more blocks can follow.
    fn promote(&mut self, id: NodeId) {
        if let Some(content) = self.doc.node_mut(id).content.take() {
            self.doc
                .append(id, Node::block(BlockKind::Line).with_content(content));
        }
    }

    fn prepare(&mut self, indent: usize) {
        self.adapt(indent);
        self.descend(indent);
    }

    /// Append under the active node, closing levels that cannot hold it.
    fn append(&mut self, mut node: Node, body: Body) -> NodeId {
        if !node.is_block(&BlockKind::Line)
            && let Some(mut pending) = self.pending_attributes.take()
        {
            pending.extend(std::mem::take(&mut node.attributes));
            node.attributes = pending;
        }

        let mut parent = self.active();
        while !self.stack.is_empty() {
            let admitted = match (self.block_kind(parent), node.block_kind()) {
                (Some(parent_kind), Some(child_kind)) => nesting::admits(parent_kind, child_kind),
                _ => false,
            };
            if admitted {
                break;
            }
            self.stack.pop();
            parent = self.active();
        }

        let id = self.doc.append(parent, node);
        if let Body::Indent(indent) = body {
            self.stack.push(indent);
        }
        id
    }

    // --- lookahead --------------------------------------------------------

    fn next_token(&self) -> Option<&'a LineToken> {
        self.tokens.get(self.pos + 1)
    }

    fn next_is_blank(&self) -> bool {
        self.next_token().is_none_or(LineToken::is_empty_line)
    }

    /// Indentation of the next line when it belongs to the current one.
    fn deeper_next(&self, indent: usize) -> Option<usize> {
        self.next_token()
            .filter(|next| !next.is_empty_line() && next.indent > indent)
            .map(|next| next.indent)
    }

    // --- paragraphs and text ---------------------------------------------

    fn swallowed_by_paragraph(&mut self, indent: usize) -> bool {
        self.adapt(indent);
        self.active_is(&BlockKind::Paragraph)
    }

    fn add_text_line(&mut self, indent: usize, text: &str) {
        if self.open {
            self.start_paragraph(indent, text);
        } else {
            self.continue_text(indent, text);
        }
    }

    fn start_paragraph(&mut self, indent: usize, text: &str) {
        self.prepare(indent);
        let paragraph = self.append(Node::block(BlockKind::Paragraph), Body::Indent(indent));
        self.doc
            .append(paragraph, Node::block(BlockKind::Line).with_content(text));
    }

    /// Attach a line to the nearest open node that takes lines, starting a
    /// paragraph at the root if there is none.
    fn continue_text(&mut self, indent: usize, text: &str) {
        self.adapt(indent);
        loop {
            let active = self.active();
            if self
                .block_kind(active)
                .is_some_and(|kind| nesting::admits(kind, &BlockKind::Line))
            {
                self.doc
                    .append(active, Node::block(BlockKind::Line).with_content(text));
                return;
            }
            if self.stack.pop().is_none() {
                self.start_paragraph(indent, text);
                return;
            }
        }
    }

    fn parse_attributes_line(&mut self, token: &LineToken) -> bool {
        let next_has_content = self.next_token().is_some_and(|next| !next.is_empty_line());
        if self.open && next_has_content {
            self.pending_attributes = Some(parse_optional(token.attributes.as_deref()));
            true
        } else {
            self.add_text_line(token.indent, token.line.trim_start());
            false
        }
    }

    // --- headings and separators -----------------------------------------

    fn parse_heading(&mut self, token: &LineToken) {
        let title = token.text.as_deref().unwrap_or_default();
        let mut lines = vec![title];
        lines.extend(token.subtext.as_deref());
        lines.extend(token.marker.as_deref());

        if !self.open {
            for line in lines {
                self.continue_text(token.indent, line);
            }
            return;
        }

        if self.next_is_blank() {
            self.stack.clear();
            let heading = Node::block(BlockKind::Heading {
                level: token.level.unwrap_or(1),
                subtitle: token.subtext.clone(),
            })
            .with_content(title);
            self.append(heading, Body::Leaf);
            return;
        }

        // Not followed by a blank line: the underline is ordinary text.
        self.start_paragraph(token.indent, title);
        for line in &lines[1..] {
            self.continue_text(token.indent, line);
        }
    }

    fn parse_separator(&mut self, token: &LineToken) {
        if self.open && self.next_is_blank() {
            self.prepare(token.indent);
            self.append(Node::block(BlockKind::Separator), Body::Leaf);
        } else {
            self.add_text_line(token.indent, &token.line);
        }
    }

    // --- generic containers ----------------------------------------------

    /// Block quote, div and non-verbatim `@tag` blocks.
    fn parse_container(&mut self, token: &LineToken, kind: BlockKind) -> bool {
        self.prepare(token.indent);
        let node = Node::block(kind).with_attributes(parse_optional(token.attributes.as_deref()));
        let body = match self.deeper_next(token.indent) {
            Some(indent) => Body::Indent(indent),
            None => Body::Leaf,
        };
        let id = self.append(node, body);
        match &token.text {
            Some(text) => {
                self.doc
                    .append(id, Node::block(BlockKind::Line).with_content(text.as_str()));
                false
            }
            None => true,
        }
    }

    // --- math --------------------------------------------------------------

    fn parse_math(&mut self, token: &LineToken) -> Result<(), MathError> {
        self.prepare(token.indent);
        let first = token.text.as_deref().unwrap_or_default().trim();

        let source = if token.marker.is_some() {
            first.to_string()
        } else {
            let mut lines: Vec<&str> = Vec::new();
            if !first.is_empty() {
                lines.push(first);
            }
            while let Some(next) = self.next_token() {
                self.pos += 1;
                let line = next.line.trim();
                if let Some(last) = line.strip_suffix("$$") {
                    let last = last.trim_end();
                    if !last.is_empty() {
                        lines.push(last);
                    }
                    break;
                }
                lines.push(line);
            }
            lines.join("\n")
        };

        log::trace!("Rendering display math: {source:?}");
        let markup = self.math.render(&source, true)?;
        self.append(
            Node::block(BlockKind::BlockMath).with_content(markup),
            Body::Leaf,
        );
        Ok(())
    }
}
