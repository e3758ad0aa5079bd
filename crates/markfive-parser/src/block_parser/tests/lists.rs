use super::helpers::{outline, top_level};

#[test]
fn flat_list_then_paragraph() {
    assert_eq!(
        outline("- a\n- b\n\ntext"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-) \"a\"\n    LIST_ITEM(-) \"b\"\n  PARAGRAPH\n    LINE \"text\"\n"
    );
}

#[test]
fn nested_list_under_item() {
    assert_eq!(
        outline("- a\n  - b"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-)\n      LINE \"a\"\n      UNORDERED_LIST\n        LIST_ITEM(-) \"b\"\n"
    );
}

#[test]
fn dedent_returns_to_outer_list() {
    assert_eq!(
        outline("- a\n  - b\n- c"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-)\n      LINE \"a\"\n      UNORDERED_LIST\n        LIST_ITEM(-) \"b\"\n    LIST_ITEM(-) \"c\"\n"
    );
}

#[test]
fn three_levels_back_to_middle() {
    let expected = "\
DOCUMENT
  UNORDERED_LIST
    LIST_ITEM(-)
      LINE \"a\"
      UNORDERED_LIST
        LIST_ITEM(-)
          LINE \"b\"
          UNORDERED_LIST
            LIST_ITEM(-) \"c\"
        LIST_ITEM(-) \"d\"
";
    assert_eq!(outline("- a\n  - b\n    - c\n  - d"), expected);
}

#[test]
fn ordered_items_keep_their_marker() {
    assert_eq!(
        outline("1. one\n2. two"),
        "DOCUMENT\n  ORDERED_LIST\n    LIST_ITEM(1.) \"one\"\n    LIST_ITEM(2.) \"two\"\n"
    );
}

#[test]
fn marker_kind_change_starts_new_list() {
    assert_eq!(top_level("- a\n1. b"), vec!["UNORDERED_LIST", "ORDERED_LIST"]);
}

#[test]
fn bare_marker_holds_paragraphs() {
    assert_eq!(
        outline("-\n  para one\n\n  para two"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-)\n      PARAGRAPH\n        LINE \"para one\"\n      PARAGRAPH\n        LINE \"para two\"\n"
    );
}

#[test]
fn indented_paragraph_after_blank_joins_item() {
    assert_eq!(
        outline("- a\n\n  more"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-)\n      LINE \"a\"\n      PARAGRAPH\n        LINE \"more\"\n"
    );
}

#[test]
fn item_attributes() {
    assert_eq!(
        outline("-{.done} milk"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-) {class=[done]} \"milk\"\n"
    );
}

#[test]
fn multi_line_item_collects_lines() {
    assert_eq!(
        outline("- first\n  second\n- third"),
        "DOCUMENT\n  UNORDERED_LIST\n    LIST_ITEM(-)\n      LINE \"first\"\n      LINE \"second\"\n    LIST_ITEM(-) \"third\"\n"
    );
}
