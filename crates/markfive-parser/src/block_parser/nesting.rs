use crate::syntax::BlockKind;

/// Blocks that may stand on their own in a document or container body.
fn is_flow(kind: &BlockKind) -> bool {
    use BlockKind::*;
    match kind {
        Heading { .. } | Paragraph | OrderedList | UnorderedList | DescriptionList | Separator
        | BlockCode | BlockQuote | BlockKbd | BlockSamp | Div | Table | BlockMath
        | BlockOther { .. } | Comment => true,
        Document | Line | ListItem { .. } | DescriptionListItem { .. } | TableRow | TableCells
        | TableCell { .. } => false,
    }
}

fn is_container_body(kind: &BlockKind) -> bool {
    matches!(kind, BlockKind::Line) || (is_flow(kind) && !matches!(kind, BlockKind::Heading { .. }))
}

/// Whether `child` may be appended directly under `parent`.
pub(super) fn admits(parent: &BlockKind, child: &BlockKind) -> bool {
    use BlockKind::*;
    match parent {
        Document => is_flow(child),
        Paragraph | BlockCode | BlockKbd | BlockSamp | Comment => matches!(child, Line),
        OrderedList | UnorderedList => matches!(child, ListItem { .. }),
        DescriptionList => matches!(child, DescriptionListItem { .. }),
        Table => matches!(child, TableRow),
        TableRow => matches!(child, TableCell { .. } | TableCells),
        TableCells => matches!(child, TableCell { .. }),
        BlockOther { tag } if tag == "pre" => matches!(child, Line),
        ListItem { .. } | DescriptionListItem { .. } | BlockQuote | Div | BlockOther { .. }
        | TableCell { .. } => is_container_body(child),
        Heading { .. } | Line | Separator | BlockMath => false,
    }
}
