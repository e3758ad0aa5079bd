/// Inline token kinds: one per delimiter plus the structural kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TokenKind {
    Text,
    Bracket,
    Em,
    Strong,
    Mark,
    Dfn,
    Var,
    Sup,
    Sub,
    Code,
    Kbd,
    KeyJoiner,
    Button,
    ButtonSeparator,
    Samp,
    Cite,
    B,
    I,
    U,
    S,
    Td,
    Th,
    Math,
    Image,
    Span,
    Br,
    Wbr,
    Variable,
    InlineOther,
}

impl TokenKind {
    /// Delimiters that may contain another span of the same kind.
    pub fn is_self_nestable(self) -> bool {
        matches!(
            self,
            TokenKind::Em | TokenKind::Strong | TokenKind::Mark | TokenKind::Span
        )
    }
}

/// Which delimiter roles a token may play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Positions {
    pub start: bool,
    pub end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineToken {
    pub kind: TokenKind,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub attributes: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub default_attribute: Option<String>,
    pub positions: Positions,
}

impl InlineToken {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            attributes: None,
            default_attribute: None,
            positions: Positions::default(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, text)
    }

    pub fn is_open_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && self.text.starts_with('[')
    }

    pub fn is_close_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket && self.text.starts_with(']')
    }
}
