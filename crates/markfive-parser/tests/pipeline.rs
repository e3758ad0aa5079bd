use markfive_parser::{
    Document, MathError, ParserOptions, PlainMathRenderer, compile, lexer::tokenize,
};
use similar_asserts::assert_eq;

fn outline(input: &str) -> String {
    compile(input, &ParserOptions::default(), &PlainMathRenderer)
        .expect("compile failed")
        .outline()
}

fn compile_default(input: &str) -> Result<Document, MathError> {
    compile(input, &ParserOptions::default(), &PlainMathRenderer)
}

#[test]
fn unmatched_delimiter_is_literal_text() {
    assert_eq!(
        outline("*bold"),
        "DOCUMENT\n  PARAGRAPH\n    LINE\n      TEXT \"*bold\"\n"
    );
}

#[test]
fn list_ends_before_paragraph() {
    insta::assert_snapshot!(outline("- a\n- b\n\ntext"), @r#"
    DOCUMENT
      UNORDERED_LIST
        LIST_ITEM(-)
          TEXT "a"
        LIST_ITEM(-)
          TEXT "b"
      PARAGRAPH
        LINE
          TEXT "text"
    "#);
}

#[test]
fn nested_list_under_item() {
    insta::assert_snapshot!(outline("- a\n  - b"), @r#"
    DOCUMENT
      UNORDERED_LIST
        LIST_ITEM(-)
          LINE
            TEXT "a"
          UNORDERED_LIST
            LIST_ITEM(-)
              TEXT "b"
    "#);
}

#[test]
fn self_nested_emphasis() {
    insta::assert_snapshot!(outline("~a ~b~ c~"), @r#"
    DOCUMENT
      PARAGRAPH
        LINE
          EM
            TEXT "a "
            EM
              TEXT "b"
            TEXT " c"
    "#);
}

#[test]
fn quotes_pair_within_paragraph() {
    assert_eq!(
        outline("\"a 'b' c\""),
        "DOCUMENT\n  PARAGRAPH\n    LINE\n      TEXT \"“a ‘b’ c”\"\n"
    );
}

#[test]
fn unmatched_quote_closes_optimistically() {
    assert_eq!(
        outline("\"a"),
        "DOCUMENT\n  PARAGRAPH\n    LINE\n      TEXT \"”a\"\n"
    );
}

#[test]
fn quote_scope_resets_per_list_item() {
    let doc = compile_default("- \"open\n- close\"").unwrap();
    assert_eq!(doc.text(doc.root()), "”openclose”");
}

#[test]
fn quotes_pair_across_inline_nodes() {
    let doc = compile_default("\"a *b*\"").unwrap();
    assert_eq!(doc.text(doc.root()), "“a b”");
}

#[test]
fn rowspan_content_moves_to_origin() {
    let doc = compile_default("|| a | b\n|| c |^ d").unwrap();
    let cells: Vec<_> = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| doc.kind(id).type_name() == "TABLE_CELL")
        .collect();
    assert_eq!(cells.len(), 4);
    assert_eq!(doc.text(cells[1]), "b\nd");
    assert_eq!(doc.node(cells[1]).attributes.get_integer("rowspan"), Some(2));
    assert_eq!(
        doc.node(cells[3]).attributes.get_text("data-in-rowspan"),
        Some("true")
    );
    assert!(doc.children(cells[3]).is_empty());
}

#[test]
fn heading_content_is_inline_parsed() {
    insta::assert_snapshot!(outline("A *big* title\n=====\n\nBody"), @r#"
    DOCUMENT
      HEADING(2)
        TEXT "A "
        STRONG
          TEXT "big"
        TEXT " title"
      PARAGRAPH
        LINE
          TEXT "Body"
    "#);
}

#[test]
fn code_blocks_skip_inline_and_typography() {
    assert_eq!(
        outline("``\n  \"quoted\" -- *x*"),
        "DOCUMENT\n  BLOCK_CODE\n    LINE\n      TEXT \"\\\"quoted\\\" -- *x*\"\n"
    );
}

#[test]
fn math_renderer_errors_propagate() {
    let err = compile_default("$$\\frac{a$$").unwrap_err();
    assert_eq!(
        err,
        MathError::UnbalancedBraces {
            source: "\\frac{a".to_string()
        }
    );
}

#[test]
fn custom_renderer_output_is_stored_verbatim() {
    let renderer = |source: &str, display: bool| -> Result<String, MathError> {
        Ok(format!("[{}:{source}]", if display { "block" } else { "inline" }))
    };
    let doc = compile("$$E = mc^2$$\n\nand $x^2$", &ParserOptions::default(), &renderer).unwrap();
    let contents: Vec<String> = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| matches!(doc.kind(id).type_name(), "BLOCK_MATH" | "INLINE_MATH"))
        .filter_map(|id| doc.node(id).content.clone())
        .collect();
    assert_eq!(contents, vec!["[block:E = mc^2]", "[inline:x^2]"]);
}

#[test]
fn typography_can_be_disabled() {
    let options = ParserOptions {
        typography: false,
        ..ParserOptions::default()
    };
    let doc = compile("\"a\" -- b", &options, &PlainMathRenderer).unwrap();
    assert_eq!(doc.text(doc.root()), "\"a\" -- b");
}

#[test]
fn data_substitution() {
    let mut options = ParserOptions::default();
    options.data.insert("name".to_string(), "markfive".to_string());
    let doc = compile("Hello {{name}}", &options, &PlainMathRenderer).unwrap();
    assert_eq!(doc.text(doc.root()), "Hello markfive");
}

#[test]
fn crlf_is_normalized() {
    assert_eq!(outline("a\r\nb"), outline("a\nb"));
}

#[test]
fn debug_tokens_do_not_change_text() {
    let input = "Some *strong* and [a link](x) \"quoted\".";
    let plain = compile_default(input).unwrap();
    let options = ParserOptions {
        debug_tokens: true,
        ..ParserOptions::default()
    };
    let debug = compile(input, &options, &PlainMathRenderer).unwrap();
    assert_eq!(plain.text(plain.root()), debug.text(debug.root()));
}

#[test]
fn malformed_input_never_fails() {
    let inputs = [
        "",
        "\n\n\n",
        "*",
        "[",
        "]",
        "|",
        "||",
        "|-",
        "|^ x",
        "$$",
        "``",
        ":",
        "a:\n",
        "a:\n  b\n c:",
        "@",
        "{{",
        "[*]",
        "[*][",
        "&[",
        "@abbr[",
        "-\n",
        "\t\t- x\n- y\n    - z\n  w",
        "\"\"\n  - a\n\t| b\n! c",
        "{.x}\n\n{#y}",
        "Title\n===",
        "===",
        "\\",
        "\\\\*a*",
        "''a''",
        "[|a|b",
        "?[x]?",
        "|| a |> b |>> c\n|| d |^ e |^ f",
    ];
    for input in inputs {
        assert!(compile_default(input).is_ok(), "failed on {input:?}");
    }
}

#[test]
fn tokenize_is_public() {
    let tokens = tokenize("- a\n\ntext");
    assert_eq!(tokens.len(), 3);
}
