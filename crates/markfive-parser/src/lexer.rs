//! Line lexer: classifies every source line into a [`LineToken`].
//!
//! Classification is a strict precedence over anchored regexes. The only
//! backward step is heading promotion: an underline run re-tags the text
//! line(s) above it.

use regex::Regex;
use std::sync::LazyLock;

use crate::syntax::attributes::attribute_block;
use crate::utils::indent_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum LineKind {
    EmptyLine,
    TextLine,
    HeadingMark,
    ListItemMark,
    DescriptionListItemMark,
    BlockQuoteMark,
    BlockCodeMark,
    BlockKbdMark,
    BlockSampMark,
    DivMark,
    SeparatorMark,
    TableRowMark,
    TableRowSeparatorMark,
    TableCellMark,
    MathMark,
    BlockOtherMark,
    CommentMark,
    AttributesLine,
    FinalColonLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineToken {
    pub kind: LineKind,
    /// Raw (right-trimmed) source line.
    pub line: String,
    pub indent: usize,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub marker: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub level: Option<u8>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub attributes: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub text: Option<String>,
    /// Heading subtitle: the second of two lines above an underline.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub subtext: Option<String>,
}

impl LineToken {
    fn new(kind: LineKind, line: &str, indent: usize) -> Self {
        Self {
            kind,
            line: line.to_string(),
            indent,
            marker: None,
            level: None,
            attributes: None,
            text: None,
            subtext: None,
        }
    }

    fn text_line(line: &str, text: String) -> Self {
        let indent = indent_width(line);
        let mut token = Self::new(LineKind::TextLine, line, indent);
        token.text = Some(text);
        token
    }

    pub fn is_empty_line(&self) -> bool {
        self.kind == LineKind::EmptyLine
    }
}

/// Elements allowed behind the `@tag` block marker.
pub const BLOCK_OTHER_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "details",
    "dialog",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "pre",
    "section",
    "summary",
];

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\* \* \*$").unwrap());

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\*{3,}|={3,}|-{3,}|\.{3,})$").unwrap());

static LEADING_BACKSLASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<indent>[ \t]*)(?P<slashes>\\+)(?P<rest>.*)$").unwrap());

/// Marker-bearing line patterns, in precedence order.
static MARKERS: LazyLock<Vec<(LineKind, Regex)>> = LazyLock::new(|| {
    let attrs = format!("(?:{})?", attribute_block());
    let text = r"(?: (?P<text>.+))?";
    let tags = BLOCK_OTHER_TAGS.join("|");
    let patterns = [
        (
            LineKind::AttributesLine,
            format!(r"^(?P<indent>[ \t]*){}$", attribute_block()),
        ),
        (
            LineKind::ListItemMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>-|\d+\.){attrs}{text}$"),
        ),
        (
            LineKind::DescriptionListItemMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>:|=){attrs}{text}$"),
        ),
        (
            LineKind::BlockQuoteMark,
            format!(r#"^(?P<indent>[ \t]*)(?P<marker>""){attrs}{text}$"#),
        ),
        (
            LineKind::BlockCodeMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>``){attrs}{text}$"),
        ),
        (
            LineKind::BlockKbdMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>>){attrs}{text}$"),
        ),
        (
            LineKind::BlockSampMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker><){attrs}{text}$"),
        ),
        (
            LineKind::DivMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>\?\?){attrs}{text}$"),
        ),
        (
            LineKind::TableRowMark,
            format!(r"^(?P<indent>[ \t]*)\|{attrs}(?P<marker>\||!){text}$"),
        ),
        (
            LineKind::TableRowSeparatorMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>\|-){attrs}$"),
        ),
        (
            LineKind::TableCellMark,
            format!(r"^(?P<indent>[ \t]*)(?P<marker>\||!){attrs}{text}$"),
        ),
        (
            LineKind::MathMark,
            r"^(?P<indent>[ \t]*)\$\$(?P<text>.*?)(?P<marker>\$\$)?$".to_string(),
        ),
        (
            LineKind::CommentMark,
            r"^(?P<indent>[ \t]*)(?P<marker>//)(?: (?P<text>.*))?$".to_string(),
        ),
        (
            LineKind::FinalColonLine,
            r"^(?P<indent>[ \t]*)(?P<text>.+:)$".to_string(),
        ),
        (
            LineKind::BlockOtherMark,
            format!(r"^(?P<indent>[ \t]*)@(?P<marker>{tags}){attrs}{text}$"),
        ),
    ];
    patterns
        .into_iter()
        .map(|(kind, pattern)| (kind, Regex::new(&pattern).unwrap()))
        .collect()
});

/// Split `source` into lines and classify each one.
pub fn tokenize(source: &str) -> Vec<LineToken> {
    let mut lexer = LineLexer {
        tokens: Vec::new(),
    };
    for line in source.split('\n').map(str::trim_end) {
        lexer.push_line(line);
    }
    log::debug!("Line lexer produced {} tokens", lexer.tokens.len());
    lexer.tokens
}

struct LineLexer {
    tokens: Vec<LineToken>,
}

impl LineLexer {
    fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            self.tokens
                .push(LineToken::new(LineKind::EmptyLine, line, 0));
            return;
        }

        if SEPARATOR.is_match(line) {
            self.tokens
                .push(LineToken::new(LineKind::SeparatorMark, line, 0));
            return;
        }

        if UNDERLINE.is_match(line) {
            let token = self.promote_heading(line);
            self.tokens.push(token);
            return;
        }

        if let Some(token) = escaped_line(line) {
            log::trace!("Escaped marker line: {line:?}");
            self.tokens.push(token);
            return;
        }

        let token = classify_marker(line)
            .unwrap_or_else(|| LineToken::text_line(line, line.trim_start().to_string()));
        log::trace!("{:?} <- {line:?}", token.kind);
        self.tokens.push(token);
    }

    /// Re-tag the text line above an underline as a heading.
    fn promote_heading(&mut self, underline: &str) -> LineToken {
        let promotable = self.tokens.last().is_some_and(|t| {
            matches!(t.kind, LineKind::TextLine | LineKind::FinalColonLine)
        });
        if !promotable {
            return LineToken::text_line(underline, underline.to_string());
        }
        let Some(mut title) = self.tokens.pop() else {
            return LineToken::text_line(underline, underline.to_string());
        };

        let mut subtext = None;
        let two_line_title = self.tokens.last().is_some_and(|t| t.kind == LineKind::TextLine)
            && self
                .tokens
                .len()
                .checked_sub(2)
                .is_none_or(|i| self.tokens[i].is_empty_line());
        if two_line_title && let Some(first) = self.tokens.pop() {
            subtext = Some(title.line.trim_start().to_string());
            title = first;
        }

        let level = match underline.chars().next() {
            Some('*') => 1,
            Some('=') => 2,
            Some('-') => 3,
            _ => 4,
        };
        let mut token = LineToken::new(LineKind::HeadingMark, &title.line, title.indent);
        token.marker = Some(underline.to_string());
        token.level = Some(level);
        token.text = Some(title.line.trim_start().to_string());
        token.subtext = subtext;
        token
    }
}

fn classify_marker(line: &str) -> Option<LineToken> {
    for (kind, re) in MARKERS.iter() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let indent = indent_width(caps.name("indent").map_or("", |m| m.as_str()));
        let mut token = LineToken::new(*kind, line, indent);
        token.marker = caps.name("marker").map(|m| m.as_str().to_string());
        token.attributes = caps.name("attrs").map(|m| m.as_str().to_string());
        token.text = caps
            .name("text")
            .map(|m| m.as_str().to_string())
            .filter(|t| !t.is_empty() || *kind == LineKind::MathMark);

        match kind {
            LineKind::TableRowMark => {
                // The row's sentinel doubles as the first cell marker.
                let sentinel = token.marker.take().unwrap_or_default();
                token.text = Some(match token.text.take() {
                    Some(rest) => format!("{sentinel} {rest}"),
                    None => sentinel,
                });
            }
            LineKind::FinalColonLine if line.trim_start().len() < 2 => continue,
            _ => {}
        }
        return Some(token);
    }
    None
}

/// An odd run of backslashes directly before a marker turns the line into
/// text, dropping the escaping backslash and halving the rest.
fn escaped_line(line: &str) -> Option<LineToken> {
    let caps = LEADING_BACKSLASHES.captures(line)?;
    let slashes = caps["slashes"].len();
    let rest = &caps["rest"];
    let unescaped = format!("{}{}", &caps["indent"], rest);

    let structural = SEPARATOR.is_match(&unescaped)
        || UNDERLINE.is_match(&unescaped)
        || classify_marker(&unescaped).is_some_and(|t| t.kind != LineKind::FinalColonLine);
    if !structural || slashes % 2 == 0 {
        return None;
    }

    let text = format!("{}{}", "\\".repeat(slashes / 2), rest);
    Some(LineToken::text_line(line, text))
}
