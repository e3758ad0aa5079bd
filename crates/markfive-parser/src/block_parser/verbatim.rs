use super::{BlockParser, Body};
use crate::lexer::LineToken;
use crate::syntax::attributes::parse_optional;
use crate::syntax::{BlockKind, Node, NodeId};
use crate::utils::strip_indent;

/// An open code, kbd, samp, comment or `@pre` body.
///
/// Every line indented past the marker belongs to the body, whatever it
/// looks like. Blank lines are held back until another body line arrives
/// so trailing blanks never reach the tree.
#[derive(Debug)]
pub(super) struct Verbatim {
    node: NodeId,
    marker_indent: usize,
    /// Indentation of the first body line, removed from every line.
    trim: Option<usize>,
    pending_blank: usize,
}

impl BlockParser<'_> {
    pub(super) fn parse_verbatim_marker(&mut self, token: &LineToken, kind: BlockKind) -> bool {
        self.prepare(token.indent);
        let node = Node::block(kind).with_attributes(parse_optional(token.attributes.as_deref()));
        let id = self.append(node, Body::Leaf);
        if let Some(text) = &token.text {
            self.doc
                .append(id, Node::block(BlockKind::Line).with_content(text.as_str()));
        }

        let has_body = self.tokens[self.pos + 1..]
            .iter()
            .find(|next| !next.is_empty_line())
            .is_some_and(|next| next.indent > token.indent);
        if has_body {
            self.verbatim = Some(Verbatim {
                node: id,
                marker_indent: token.indent,
                trim: None,
                pending_blank: 0,
            });
        }
        false
    }

    /// Feed a token to the open verbatim body. Returns `false` once the
    /// token closes the body and must be parsed normally.
    pub(super) fn continue_verbatim(&mut self, token: &LineToken) -> bool {
        let Some(verbatim) = self.verbatim.as_mut() else {
            return false;
        };

        if token.is_empty_line() {
            verbatim.pending_blank += 1;
            return true;
        }

        if token.indent <= verbatim.marker_indent {
            let saw_blank = verbatim.pending_blank > 0;
            self.verbatim = None;
            self.open = saw_blank;
            if saw_blank {
                self.close_tables();
            }
            return false;
        }

        let trim = *verbatim.trim.get_or_insert(token.indent);
        let node = verbatim.node;
        for _ in 0..std::mem::take(&mut verbatim.pending_blank) {
            self.doc
                .append(node, Node::block(BlockKind::Line).with_content(""));
        }
        let content = strip_indent(&token.line, trim);
        self.doc
            .append(node, Node::block(BlockKind::Line).with_content(content));
        true
    }
}
