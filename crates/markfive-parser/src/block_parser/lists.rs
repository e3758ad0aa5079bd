use super::{BlockParser, Body};
use crate::lexer::LineToken;
use crate::syntax::attributes::parse_optional;
use crate::syntax::{BlockKind, Node};

impl BlockParser<'_> {
    pub(super) fn parse_list_item(&mut self, token: &LineToken) -> bool {
        let marker = token.marker.clone().unwrap_or_default();
        let list_kind = if marker == "-" {
            BlockKind::UnorderedList
        } else {
            BlockKind::OrderedList
        };
        self.enter_list(token.indent, list_kind);
        let item = Node::block(BlockKind::ListItem { marker })
            .with_attributes(parse_optional(token.attributes.as_deref()));
        self.add_item(item, token)
    }

    pub(super) fn parse_description_item(&mut self, token: &LineToken) -> bool {
        let marker = token.marker.clone().unwrap_or_default();
        self.enter_list(token.indent, BlockKind::DescriptionList);
        let item = Node::block(BlockKind::DescriptionListItem { marker })
            .with_attributes(parse_optional(token.attributes.as_deref()));
        self.add_item(item, token)
    }

    /// `Term:` followed by a deeper body becomes a term and its description.
    pub(super) fn parse_final_colon(&mut self, token: &LineToken) -> bool {
        let text = token.text.as_deref().unwrap_or_default();
        let Some(body_indent) = self.deeper_next(token.indent) else {
            self.add_text_line(token.indent, text);
            return false;
        };
        if !self.open && self.swallowed_by_paragraph(token.indent) {
            self.continue_text(token.indent, text);
            return false;
        }

        self.prepare(token.indent);
        let same_list = !self.open
            && self.active_is(&BlockKind::DescriptionList)
            && self.stack.top() == Some(token.indent);
        if !same_list {
            self.append(
                Node::block(BlockKind::DescriptionList),
                Body::Indent(token.indent),
            );
        }

        let term = text.strip_suffix(':').unwrap_or(text);
        log::trace!("Promoting {term:?} to a description term");
        self.append(
            Node::block(BlockKind::DescriptionListItem {
                marker: ":".to_string(),
            })
            .with_content(term),
            Body::Leaf,
        );
        self.append(
            Node::block(BlockKind::DescriptionListItem {
                marker: "=".to_string(),
            }),
            Body::Indent(body_indent),
        );
        true
    }

    /// Reuse the active list when it has the same kind and indentation.
    fn enter_list(&mut self, indent: usize, kind: BlockKind) {
        self.prepare(indent);
        let reuse = self.active_is(&kind) && self.stack.top() == Some(indent);
        if !reuse {
            self.append(Node::block(kind), Body::Indent(indent));
        }
    }

    /// Single-line items keep their text as `content`; items with a deeper
    /// body start with a LINE child instead.
    fn add_item(&mut self, item: Node, token: &LineToken) -> bool {
        match self.deeper_next(token.indent) {
            Some(body_indent) => {
                let id = self.append(item, Body::Indent(body_indent));
                if let Some(text) = &token.text {
                    self.doc
                        .append(id, Node::block(BlockKind::Line).with_content(text.as_str()));
                }
            }
            None => {
                self.append(item.with_optional_content(token.text.clone()), Body::Leaf);
            }
        }
        token.text.is_none()
    }
}
