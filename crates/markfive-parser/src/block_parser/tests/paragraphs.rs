use super::helpers::{outline, parse_blocks, top_level};
use crate::block_parser::BlockParser;
use crate::lexer::tokenize;
use crate::math::{MathError, PlainMathRenderer};
use crate::syntax::BlockKind;

#[test]
fn consecutive_lines_share_a_paragraph() {
    assert_eq!(
        outline("hello\nworld\n\nnext"),
        "DOCUMENT\n  PARAGRAPH\n    LINE \"hello\"\n    LINE \"world\"\n  PARAGRAPH\n    LINE \"next\"\n"
    );
}

#[test]
fn markers_inside_paragraph_are_text() {
    assert_eq!(
        outline("Intro text\n- not a list\n> nor kbd"),
        "DOCUMENT\n  PARAGRAPH\n    LINE \"Intro text\"\n    LINE \"- not a list\"\n    LINE \"> nor kbd\"\n"
    );
}

#[test]
fn pending_attributes_apply_to_next_block() {
    assert_eq!(
        outline("{#intro .lead}\nSome text"),
        "DOCUMENT\n  PARAGRAPH {id=\"intro\" class=[lead]}\n    LINE \"Some text\"\n"
    );
}

#[test]
fn attributes_before_blank_line_are_text() {
    let doc = parse_blocks("{.x}\n\npara");
    let first = doc.children(doc.root())[0];
    assert_eq!(doc.node(first).attributes.len(), 0);
    let line = doc.children(first)[0];
    assert_eq!(doc.node(line).content.as_deref(), Some("{.x}"));
    assert_eq!(top_level("{.x}\n\npara"), vec!["PARAGRAPH", "PARAGRAPH"]);
}

#[test]
fn escaped_marker_starts_paragraph() {
    assert_eq!(
        outline("\\- literal"),
        "DOCUMENT\n  PARAGRAPH\n    LINE \"- literal\"\n"
    );
}

#[test]
fn separator_needs_blank_line_after() {
    assert_eq!(
        top_level("a\n\n* * *\n\nb"),
        vec!["PARAGRAPH", "SEPARATOR", "PARAGRAPH"]
    );
    assert_eq!(
        outline("* * *\ntext"),
        "DOCUMENT\n  PARAGRAPH\n    LINE \"* * *\"\n    LINE \"text\"\n"
    );
}

#[test]
fn dedented_text_after_list_starts_paragraph() {
    assert_eq!(top_level("- a\ntext"), vec!["UNORDERED_LIST", "PARAGRAPH"]);
}

#[test]
fn display_math_single_line() {
    let doc = parse_blocks("$$x^2$$");
    let math = doc.children(doc.root())[0];
    assert!(doc.node(math).is_block(&BlockKind::BlockMath));
    assert_eq!(
        doc.node(math).content.as_deref(),
        Some("<math display=\"block\"><mtext>x^2</mtext></math>")
    );
}

#[test]
fn display_math_spans_lines_until_closing_delimiter() {
    let doc = parse_blocks("$$\na + b\n= c$$\nafter");
    let children = doc.children(doc.root());
    assert_eq!(children.len(), 2);
    assert_eq!(
        doc.node(children[0]).content.as_deref(),
        Some("<math display=\"block\"><mtext>a + b\n= c</mtext></math>")
    );
    assert_eq!(top_level("$$\na + b\n= c$$\nafter"), vec!["BLOCK_MATH", "PARAGRAPH"]);
}

#[test]
fn math_errors_propagate() {
    let tokens = tokenize("$$\\frac{1$$");
    let err = BlockParser::new(&tokens, &PlainMathRenderer)
        .parse()
        .unwrap_err();
    assert_eq!(
        err,
        MathError::UnbalancedBraces {
            source: "\\frac{1".to_string()
        }
    );
}
