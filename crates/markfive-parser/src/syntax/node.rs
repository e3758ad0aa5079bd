use std::fmt::Write;

use super::attributes::Attributes;
use super::kind::{BlockKind, InlineKind, NodeKind};
use super::tokens::InlineToken;

/// Stable handle to a node stored in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub attributes: Attributes,
    /// Raw text before inline parsing, final text for TEXT nodes.
    pub content: Option<String>,
    pub children: Vec<NodeId>,
    /// Inline token buffer, only kept when debug tokens are requested.
    pub tokens: Option<Vec<InlineToken>>,
}

impl Node {
    pub fn block(kind: BlockKind) -> Self {
        Self::new(NodeKind::Block(kind))
    }

    pub fn inline(kind: InlineKind) -> Self {
        Self::new(NodeKind::Inline(kind))
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::inline(InlineKind::Text).with_content(content)
    }

    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            content: None,
            children: Vec::new(),
            tokens: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_optional_content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn block_kind(&self) -> Option<&BlockKind> {
        self.kind.as_block()
    }

    pub fn is_block(&self, kind: &BlockKind) -> bool {
        self.block_kind() == Some(kind)
    }
}

/// Arena-backed document tree. The root is always a DOCUMENT block.
///
/// Nodes reference their children by [`NodeId`]; every node except the root
/// appears in exactly one `children` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::block(BlockKind::Document)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].children.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Store a node without attaching it. The caller must link it into
    /// exactly one parent.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Pre-order traversal starting at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Concatenated content of all TEXT nodes below `id`.
    pub fn text(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.kind(n).is_text())
            .filter_map(|n| self.node(n).content.as_deref())
            .collect()
    }

    /// Indented one-line-per-node dump used by tests and the CLI.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.root(), 0, &mut out);
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        let _ = write!(out, "{}{}", "  ".repeat(depth), node.kind.type_name());
        if let Some(subtype) = node.kind.subtype() {
            let _ = write!(out, "({subtype})");
        }
        if let NodeKind::Inline(InlineKind::Note { id: Some(note_id), .. }) = &node.kind {
            let _ = write!(out, " #{note_id}");
        }
        if !node.attributes.is_empty() {
            let attrs: Vec<String> = node
                .attributes
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            let _ = write!(out, " {{{}}}", attrs.join(" "));
        }
        if let Some(content) = &node.content {
            let _ = write!(out, " {content:?}");
        }
        if let NodeKind::Block(BlockKind::Heading {
            subtitle: Some(subtitle),
            ..
        }) = &node.kind
        {
            let _ = write!(out, " subtitle={subtitle:?}");
        }
        out.push('\n');
        for &child in &node.children {
            self.write_outline(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::attributes::parse_attributes;

    #[test]
    fn append_and_walk() {
        let mut doc = Document::new();
        let para = doc.append(
            doc.root(),
            Node::block(BlockKind::Paragraph).with_attributes(parse_attributes("#p")),
        );
        let line = doc.append(para, Node::block(BlockKind::Line));
        doc.append(line, Node::text("hello "));
        doc.append(line, Node::text("world"));

        assert_eq!(doc.last_child(doc.root()), Some(para));
        assert_eq!(doc.descendants(doc.root()).len(), 5);
        assert_eq!(doc.text(para), "hello world");
        assert_eq!(
            doc.outline(),
            "DOCUMENT\n  PARAGRAPH {id=\"p\"}\n    LINE\n      TEXT \"hello \"\n      TEXT \"world\"\n"
        );
    }

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.outline(), "DOCUMENT\n");
    }
}
