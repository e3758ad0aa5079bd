//! Inline tokenizer: splits raw node content into delimiter and text tokens.
//!
//! Scanning jumps from one special character to the next. At each stop the
//! candidate table is tried in order (longest delimiters first); the word
//! boundary rules then decide whether the match is a delimiter or just text.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::syntax::attributes::attribute_block;
use crate::syntax::{InlineToken, Positions, TokenKind};
use crate::utils::{is_alphanumeric, is_whitespace};

/// Which vocabulary applies to a node's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenContext {
    Flow,
    /// Compact table rows: `|` and `!` separate cells.
    TableCells,
    /// Formula source, kept as a single token.
    Math,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

struct Candidate {
    chars: &'static str,
    kind: TokenKind,
    side: Option<Side>,
}

const fn candidate(chars: &'static str, kind: TokenKind, side: Option<Side>) -> Candidate {
    Candidate { chars, kind, side }
}

/// Longest first. The trailing `|` is swapped for the cell markers inside
/// compact table rows.
const CANDIDATES: &[Candidate] = &[
    candidate("{/?}", TokenKind::Wbr, None),
    candidate("{/}", TokenKind::Br, None),
    candidate("]+[", TokenKind::KeyJoiner, None),
    candidate("''", TokenKind::Cite, None),
    candidate("__", TokenKind::U, None),
    candidate("--", TokenKind::S, None),
    candidate("[|", TokenKind::Button, Some(Side::Start)),
    candidate("|]", TokenKind::Button, Some(Side::End)),
    candidate("?[", TokenKind::Span, Some(Side::Start)),
    candidate("]?", TokenKind::Span, Some(Side::End)),
    candidate("{{", TokenKind::Variable, Some(Side::Start)),
    candidate("#", TokenKind::B, None),
    candidate("/", TokenKind::I, None),
    candidate("~", TokenKind::Em, None),
    candidate("*", TokenKind::Strong, None),
    candidate("=", TokenKind::Mark, None),
    candidate(":", TokenKind::Dfn, None),
    candidate("^", TokenKind::Sup, None),
    candidate("_", TokenKind::Sub, None),
    candidate("$", TokenKind::Var, None),
    candidate("`", TokenKind::Code, None),
    candidate(">", TokenKind::Kbd, None),
    candidate("<", TokenKind::Samp, None),
    candidate("&", TokenKind::Image, None),
    candidate("@", TokenKind::InlineOther, None),
    candidate("[", TokenKind::Bracket, Some(Side::Start)),
    candidate("]", TokenKind::Bracket, Some(Side::End)),
    candidate("|", TokenKind::ButtonSeparator, None),
];

const CELL_CANDIDATES: &[Candidate] = &[
    candidate("|", TokenKind::Td, None),
    candidate("!", TokenKind::Th, None),
];

/// Elements reachable through `@tag[...]`.
pub const INLINE_OTHER_TAGS: &[&str] = &[
    "abbr", "bdi", "bdo", "data", "del", "ins", "rt", "ruby", "small", "time",
];

fn is_special(c: char) -> bool {
    matches!(
        c,
        '#' | '*'
            | '['
            | ']'
            | '{'
            | '}'
            | '"'
            | '\''
            | '`'
            | ':'
            | '~'
            | '^'
            | '!'
            | '|'
            | '/'
            | '_'
            | '='
            | '$'
            | '<'
            | '>'
            | '&'
            | '?'
            | '@'
            | '-'
    )
}

static ATTRIBUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}", attribute_block())).unwrap());

/// `(default)` and/or `{attrs}` after a closing bracket or definition.
static DEFAULT_AND_ATTRIBUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:\((?P<default>[^()]*(?:\([^()]+\))?[^()]*)\))?(?:{})?",
        attribute_block()
    ))
    .unwrap()
});

static VARIABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]+)\}\}").unwrap());

fn push_text(tokens: &mut Vec<InlineToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(last) if last.kind == TokenKind::Text => last.text.push_str(text),
        _ => tokens.push(InlineToken::text(text)),
    }
}

fn candidate_applies(candidate: &Candidate, rest: &str) -> bool {
    if !rest.starts_with(candidate.chars) {
        return false;
    }
    let after = &rest[candidate.chars.len()..];
    match candidate.kind {
        TokenKind::Image => after.starts_with('['),
        TokenKind::InlineOther => INLINE_OTHER_TAGS
            .iter()
            .any(|tag| after.strip_prefix(tag).is_some_and(|r| r.starts_with('['))),
        _ => true,
    }
}

/// Split `content` into inline tokens. `data` resolves `{{name}}`.
pub fn tokenize(
    content: &str,
    context: TokenContext,
    data: &BTreeMap<String, String>,
) -> Vec<InlineToken> {
    let mut tokens = Vec::new();
    if context == TokenContext::Math {
        tokens.push(InlineToken::new(TokenKind::Math, content));
        return tokens;
    }

    let candidates: Vec<&Candidate> = match context {
        TokenContext::TableCells => CANDIDATES[..CANDIDATES.len() - 1]
            .iter()
            .chain(CELL_CANDIDATES)
            .collect(),
        _ => CANDIDATES.iter().collect(),
    };

    // `index` is the start of text not yet emitted.
    let mut index = 0;
    while index < content.len() {
        let Some(offset) = content[index..].find(is_special) else {
            push_text(&mut tokens, &content[index..]);
            break;
        };
        let start = index + offset;
        let rest = &content[start..];

        let Some(candidate) = candidates.iter().find(|c| candidate_applies(c, rest)) else {
            // Special character without a delimiter meaning here.
            let width = rest.chars().next().map_or(1, char::len_utf8);
            push_text(&mut tokens, &content[index..start + width]);
            index = start + width;
            continue;
        };
        let chars = candidate.chars;

        let backslashes = content[index..start]
            .chars()
            .rev()
            .take_while(|&c| c == '\\')
            .count();
        if backslashes % 2 == 1 {
            // Escaped: drop the escaping backslash, keep half of the rest.
            push_text(&mut tokens, &content[index..start - 1 - backslashes / 2]);
            push_text(&mut tokens, chars);
            index = start + chars.len();
            continue;
        }
        push_text(&mut tokens, &content[index..start - backslashes / 2]);

        let (consumed, token) = read_delimiter(content, start, candidate, data);
        index = start + consumed;
        match token {
            Some(token) if token.kind == TokenKind::Text => push_text(&mut tokens, &token.text),
            Some(token) => {
                log::trace!("Inline token {:?} {:?}", token.kind, token.text);
                tokens.push(token);
            }
            None => push_text(&mut tokens, chars),
        }
    }
    tokens
}

/// Classify the delimiter at `start`. Returns the consumed byte length and
/// the token, or `None` when the delimiter folds into text.
fn read_delimiter(
    content: &str,
    start: usize,
    candidate: &Candidate,
    data: &BTreeMap<String, String>,
) -> (usize, Option<InlineToken>) {
    let chars = candidate.chars;
    let mut kind = candidate.kind;
    let after = &content[start + chars.len()..];

    let prev = content[..start].chars().next_back();
    let next = after.chars().next();
    let prev_alnum = is_alphanumeric(prev);
    let next_alnum = is_alphanumeric(next);
    let prev_ws = is_whitespace(prev);
    let next_ws = is_whitespace(next);

    let binds_inside_words = matches!(
        kind,
        TokenKind::Sup
            | TokenKind::Sub
            | TokenKind::KeyJoiner
            | TokenKind::ButtonSeparator
            | TokenKind::Br
            | TokenKind::Wbr
            | TokenKind::Bracket
            | TokenKind::Variable
    );
    let is_cell = matches!(kind, TokenKind::Td | TokenKind::Th);
    if (prev_alnum && next_alnum && !binds_inside_words)
        || (prev_ws && next_ws && !is_cell)
        || (kind == TokenKind::Th && (prev_alnum || next_alnum))
    {
        return (chars.len(), None);
    }
    if kind == TokenKind::Td && (prev_alnum || next_alnum) {
        kind = TokenKind::ButtonSeparator;
    }

    let mut positions = Positions::default();
    if !prev_alnum && !next_ws && candidate.side != Some(Side::End) {
        positions.start = true;
    }
    if !next_alnum && !prev_ws && candidate.side != Some(Side::Start) {
        positions.end = true;
    }
    if next == Some('[') {
        positions.start = true;
    }
    if prev == Some(']') {
        positions.end = true;
    }
    if matches!(kind, TokenKind::Sup | TokenKind::Sub) {
        positions.start |= !prev_ws;
        positions.end |= !next_ws;
    }
    if kind == TokenKind::Bracket {
        match candidate.side {
            Some(Side::Start) => positions.start = true,
            Some(Side::End) => positions.end = true,
            None => {}
        }
    }

    let mut token = InlineToken::new(kind, chars);
    token.positions = positions;
    let mut consumed = chars.len();

    if (!positions.start || matches!(kind, TokenKind::Td | TokenKind::Th))
        && let Some(caps) = ATTRIBUTES.captures(after)
    {
        token.attributes = caps.name("attrs").map(|m| m.as_str().to_string());
        consumed += caps[0].len();
    }

    if matches!(kind, TokenKind::Bracket | TokenKind::Dfn)
        && positions.end
        && let Some(caps) = DEFAULT_AND_ATTRIBUTES.captures(after)
    {
        let default = caps.name("default");
        let attrs = caps.name("attrs");
        if default.is_some() || attrs.is_some() {
            token.default_attribute = default.map(|m| m.as_str().to_string());
            token.attributes = attrs.map(|m| m.as_str().to_string());
            token.text.push_str(&caps[0]);
            consumed = chars.len() + caps[0].len();
        }
    }

    if kind == TokenKind::Variable {
        let value = VARIABLE_NAME
            .captures(after)
            .and_then(|caps| Some((caps[0].len(), data.get(&caps[1])?)));
        return match value {
            Some((len, value)) => (chars.len() + len, Some(InlineToken::text(value.as_str()))),
            None => (chars.len(), Some(InlineToken::text(chars))),
        };
    }

    (consumed, Some(token))
}
