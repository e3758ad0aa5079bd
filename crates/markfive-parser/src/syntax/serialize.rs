use serde::ser::{Serialize, SerializeMap, Serializer};

use super::attributes::Attributes;
use super::kind::{BlockKind, InlineKind, NodeKind};
use super::node::{Document, NodeId};

struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

struct ChildrenRef<'a> {
    doc: &'a Document,
    children: &'a [NodeId],
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef {
            doc: self,
            id: self.root(),
        }
        .serialize(serializer)
    }
}

impl Serialize for ChildrenRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.children.iter().map(|&id| NodeRef { doc: self.doc, id }))
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.doc.node(self.id);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", node.kind.type_name())?;
        if let Some(subtype) = node.kind.subtype() {
            map.serialize_entry("subtype", &subtype)?;
        }
        if let NodeKind::Inline(InlineKind::Note { id: Some(id), .. }) = &node.kind {
            map.serialize_entry("id", id)?;
        }
        if !node.attributes.is_empty() {
            map.serialize_entry("attributes", &node.attributes)?;
        }
        if let Some(content) = &node.content {
            map.serialize_entry("content", content)?;
        }
        if let NodeKind::Block(BlockKind::Heading {
            subtitle: Some(subtitle),
            ..
        }) = &node.kind
        {
            map.serialize_entry("subcontent", subtitle)?;
        }
        if !node.children.is_empty() {
            map.serialize_entry(
                "children",
                &ChildrenRef {
                    doc: self.doc,
                    children: &node.children,
                },
            )?;
        }
        if let Some(tokens) = &node.tokens {
            map.serialize_entry("tokens", tokens)?;
        }
        map.end()
    }
}
