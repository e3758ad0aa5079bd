use super::helpers::outline;

#[test]
fn block_quote_with_indented_body() {
    assert_eq!(
        outline("\"\"\n  quoted line\n  second\n\nafter"),
        "DOCUMENT\n  BLOCK_QUOTE\n    PARAGRAPH\n      LINE \"quoted line\"\n      LINE \"second\"\n  PARAGRAPH\n    LINE \"after\"\n"
    );
}

#[test]
fn single_line_quote() {
    assert_eq!(
        outline("\"\" short quote"),
        "DOCUMENT\n  BLOCK_QUOTE\n    LINE \"short quote\"\n"
    );
}

#[test]
fn div_with_attributes_and_text() {
    assert_eq!(
        outline("??{.warning} Careful\n  more detail"),
        "DOCUMENT\n  DIV {class=[warning]}\n    LINE \"Careful\"\n    LINE \"more detail\"\n"
    );
}

#[test]
fn block_other_element() {
    assert_eq!(
        outline("@aside{.note}\n  side text"),
        "DOCUMENT\n  BLOCK_OTHER(aside) {class=[note]}\n    PARAGRAPH\n      LINE \"side text\"\n"
    );
}

#[test]
fn quote_holds_nested_list() {
    assert_eq!(
        outline("\"\" Shopping\n  - milk\n  - bread"),
        "DOCUMENT\n  BLOCK_QUOTE\n    LINE \"Shopping\"\n    UNORDERED_LIST\n      LIST_ITEM(-) \"milk\"\n      LIST_ITEM(-) \"bread\"\n"
    );
}
