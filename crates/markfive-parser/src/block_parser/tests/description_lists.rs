use super::helpers::shape;

/// Colon-terminated lines, description markers and verbatim bodies compete
/// for the same lines; the outcome depends on indentation and on whether
/// the line sits at the start of a block.
#[test]
fn term_and_colon_precedence() {
    let cases: &[(&str, &str, &str)] = &[
        (
            "explicit markers",
            ": term\n= desc",
            "DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM)",
        ),
        (
            "colon with deeper body",
            "Term:\n  definition",
            "DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE)))",
        ),
        (
            "colon without deeper body",
            "Term:\nnot deeper",
            "PARAGRAPH(LINE LINE)",
        ),
        (
            "same indent continues the list",
            "A:\n  x\nB:\n  y",
            "DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE)) \
             DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE)))",
        ),
        (
            "open position starts a new list",
            "A:\n  x\n\nB:\n  y",
            "DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE))) \
             DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE)))",
        ),
        (
            "paragraph swallows the colon line",
            "Intro\nA:\n  x",
            "PARAGRAPH(LINE LINE LINE)",
        ),
        (
            "code body wins",
            "``\n  A:\n    x",
            "BLOCK_CODE(LINE LINE)",
        ),
        (
            "deeper term nests a new list",
            "A:\n  B:\n    x",
            "DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(\
             DESCRIPTION_LIST(DESCRIPTION_LIST_ITEM DESCRIPTION_LIST_ITEM(PARAGRAPH(LINE)))))",
        ),
    ];

    for (name, input, expected) in cases {
        assert_eq!(&shape(input), expected, "case: {name}");
    }
}
