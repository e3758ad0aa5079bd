/// Block-level node kinds produced by the block parser.
///
/// Variant payloads carry what would otherwise be an untyped subtype string:
/// heading level, list marker, cell header flag, allow-listed tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Document,
    Heading { level: u8, subtitle: Option<String> },
    Paragraph,
    Line,
    OrderedList,
    UnorderedList,
    ListItem { marker: String },
    DescriptionList,
    /// `:` marks a term, `=` marks a description.
    DescriptionListItem { marker: String },
    Separator,
    BlockCode,
    BlockQuote,
    BlockKbd,
    BlockSamp,
    Div,
    Table,
    TableRow,
    TableCells,
    TableCell { header: bool },
    BlockMath,
    BlockOther { tag: String },
    Comment,
}

/// Inline node kinds produced by the inline parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineKind {
    Text,
    Em,
    Strong,
    Mark,
    Dfn,
    Var,
    Sup,
    Sub,
    Code,
    Kbd,
    Key,
    KeyJoiner,
    Button,
    ButtonSeparator,
    Samp,
    Cite,
    B,
    I,
    U,
    S,
    A,
    Img,
    Object,
    InlineMath,
    /// `stars` is the run of `*` that keys the note family, `id` an explicit target.
    Note { stars: String, id: Option<String> },
    Br,
    Wbr,
    Span,
    InlineOther { tag: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Block(BlockKind),
    Inline(InlineKind),
}

impl BlockKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            BlockKind::Document => "DOCUMENT",
            BlockKind::Heading { .. } => "HEADING",
            BlockKind::Paragraph => "PARAGRAPH",
            BlockKind::Line => "LINE",
            BlockKind::OrderedList => "ORDERED_LIST",
            BlockKind::UnorderedList => "UNORDERED_LIST",
            BlockKind::ListItem { .. } => "LIST_ITEM",
            BlockKind::DescriptionList => "DESCRIPTION_LIST",
            BlockKind::DescriptionListItem { .. } => "DESCRIPTION_LIST_ITEM",
            BlockKind::Separator => "SEPARATOR",
            BlockKind::BlockCode => "BLOCK_CODE",
            BlockKind::BlockQuote => "BLOCK_QUOTE",
            BlockKind::BlockKbd => "BLOCK_KBD",
            BlockKind::BlockSamp => "BLOCK_SAMP",
            BlockKind::Div => "DIV",
            BlockKind::Table => "TABLE",
            BlockKind::TableRow => "TABLE_ROW",
            BlockKind::TableCells => "TABLE_CELLS",
            BlockKind::TableCell { .. } => "TABLE_CELL",
            BlockKind::BlockMath => "BLOCK_MATH",
            BlockKind::BlockOther { .. } => "BLOCK_OTHER",
            BlockKind::Comment => "COMMENT",
        }
    }

    pub fn subtype(&self) -> Option<String> {
        match self {
            BlockKind::Heading { level, .. } => Some(level.to_string()),
            BlockKind::ListItem { marker } | BlockKind::DescriptionListItem { marker } => {
                Some(marker.clone())
            }
            BlockKind::TableCell { header } => Some(if *header { "!" } else { "|" }.to_string()),
            BlockKind::BlockOther { tag } => Some(tag.clone()),
            _ => None,
        }
    }

    /// Blocks whose lines are kept verbatim by the block parser.
    pub fn is_verbatim(&self) -> bool {
        match self {
            BlockKind::BlockCode | BlockKind::BlockKbd | BlockKind::BlockSamp | BlockKind::Comment => {
                true
            }
            BlockKind::BlockOther { tag } => tag == "pre",
            _ => false,
        }
    }

    /// Blocks whose lines never receive inline markup.
    pub fn is_literal(&self) -> bool {
        match self {
            BlockKind::BlockCode | BlockKind::Comment => true,
            BlockKind::BlockOther { tag } => tag == "pre",
            _ => false,
        }
    }
}

impl InlineKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            InlineKind::Text => "TEXT",
            InlineKind::Em => "EM",
            InlineKind::Strong => "STRONG",
            InlineKind::Mark => "MARK",
            InlineKind::Dfn => "DFN",
            InlineKind::Var => "VAR",
            InlineKind::Sup => "SUP",
            InlineKind::Sub => "SUB",
            InlineKind::Code => "CODE",
            InlineKind::Kbd => "KBD",
            InlineKind::Key => "KEY",
            InlineKind::KeyJoiner => "KEY_JOINER",
            InlineKind::Button => "BUTTON",
            InlineKind::ButtonSeparator => "BUTTON_SEPARATOR",
            InlineKind::Samp => "SAMP",
            InlineKind::Cite => "CITE",
            InlineKind::B => "B",
            InlineKind::I => "I",
            InlineKind::U => "U",
            InlineKind::S => "S",
            InlineKind::A => "A",
            InlineKind::Img => "IMG",
            InlineKind::Object => "OBJECT",
            InlineKind::InlineMath => "INLINE_MATH",
            InlineKind::Note { .. } => "NOTE",
            InlineKind::Br => "BR",
            InlineKind::Wbr => "WBR",
            InlineKind::Span => "SPAN",
            InlineKind::InlineOther { .. } => "INLINE_OTHER",
        }
    }

    pub fn subtype(&self) -> Option<String> {
        match self {
            InlineKind::Note { stars, .. } => Some(stars.clone()),
            InlineKind::InlineOther { tag } => Some(tag.clone()),
            _ => None,
        }
    }
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Block(kind) => kind.type_name(),
            NodeKind::Inline(kind) => kind.type_name(),
        }
    }

    pub fn subtype(&self) -> Option<String> {
        match self {
            NodeKind::Block(kind) => kind.subtype(),
            NodeKind::Inline(kind) => kind.subtype(),
        }
    }

    pub fn as_block(&self) -> Option<&BlockKind> {
        match self {
            NodeKind::Block(kind) => Some(kind),
            NodeKind::Inline(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Inline(InlineKind::Text))
    }
}
