use super::helpers::{outline, top_level};

#[test]
fn underlined_heading() {
    assert_eq!(
        outline("Title\n=====\n\nBody"),
        "DOCUMENT\n  HEADING(2) \"Title\"\n  PARAGRAPH\n    LINE \"Body\"\n"
    );
}

#[test]
fn heading_with_subtitle() {
    assert_eq!(
        outline("Main\nSub\n***\n\ntext"),
        "DOCUMENT\n  HEADING(1) \"Main\" subtitle=\"Sub\"\n  PARAGRAPH\n    LINE \"text\"\n"
    );
}

#[test]
fn heading_without_blank_line_degrades_to_paragraph() {
    assert_eq!(
        outline("Title\n---\nmore"),
        "DOCUMENT\n  PARAGRAPH\n    LINE \"Title\"\n    LINE \"---\"\n    LINE \"more\"\n"
    );
}

#[test]
fn heading_closes_open_containers() {
    assert_eq!(
        top_level("- item\n\n  nested\n\nTitle\n===\n"),
        vec!["UNORDERED_LIST", "HEADING"]
    );
}

#[test]
fn heading_takes_pending_attributes() {
    assert_eq!(
        outline("{#top}\nTitle\n***\n"),
        "DOCUMENT\n  HEADING(1) {id=\"top\"} \"Title\"\n"
    );
}
