use crate::block_parser::BlockParser;
use crate::lexer::tokenize;
use crate::math::PlainMathRenderer;
use crate::syntax::{Document, NodeId};

pub fn parse_blocks(input: &str) -> Document {
    let tokens = tokenize(input);
    BlockParser::new(&tokens, &PlainMathRenderer)
        .parse()
        .expect("block parsing failed")
}

pub fn outline(input: &str) -> String {
    parse_blocks(input).outline()
}

pub fn top_level(input: &str) -> Vec<&'static str> {
    let doc = parse_blocks(input);
    doc.children(doc.root())
        .iter()
        .map(|&id| doc.kind(id).type_name())
        .collect()
}

/// Compact nesting signature, e.g. `TABLE(TABLE_ROW(TABLE_CELLS))`.
pub fn shape(input: &str) -> String {
    let doc = parse_blocks(input);
    let parts: Vec<String> = doc
        .children(doc.root())
        .iter()
        .map(|&id| shape_of(&doc, id))
        .collect();
    parts.join(" ")
}

fn shape_of(doc: &Document, id: NodeId) -> String {
    let name = doc.kind(id).type_name();
    let children = doc.children(id);
    if children.is_empty() {
        return name.to_string();
    }
    let inner: Vec<String> = children.iter().map(|&c| shape_of(doc, c)).collect();
    format!("{name}({})", inner.join(" "))
}
