//! Typography pass: rewrites TEXT content with typographic punctuation.
//!
//! Quotes are paired with a stack of open sites per paragraph-like scope.
//! Every quote first emits the closing glyph; when a later quote closes the
//! pair, the recorded site is patched to the opening glyph, even when it
//! sits in an earlier TEXT node.

pub mod locale;

use crate::options::ParserOptions;
use crate::syntax::{BlockKind, Document, InlineKind, NodeId, NodeKind};
pub use locale::Locale;

const NARROW_NBSP: char = '\u{202f}';

/// A previously emitted closing quote that may become an opening one.
#[derive(Debug, Clone, Copy)]
struct Site {
    node: NodeId,
    offset: usize,
    len: usize,
}

#[derive(Debug, Default)]
struct Scope {
    /// Last input character seen, `None` at the start of a scope.
    prev: Option<char>,
    doubles: Vec<Site>,
    singles: Vec<Site>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Double,
    Single,
}

fn skips_subtree(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Block(block) => {
            matches!(
                block,
                BlockKind::BlockCode
                    | BlockKind::BlockKbd
                    | BlockKind::BlockSamp
                    | BlockKind::BlockMath
                    | BlockKind::Comment
            ) || block.is_literal()
        }
        NodeKind::Inline(inline) => matches!(
            inline,
            InlineKind::Code | InlineKind::Kbd | InlineKind::Samp | InlineKind::InlineMath
        ),
    }
}

fn starts_scope(kind: &NodeKind) -> bool {
    matches!(
        kind.as_block(),
        Some(
            BlockKind::Paragraph
                | BlockKind::Heading { .. }
                | BlockKind::ListItem { .. }
                | BlockKind::TableCell { .. }
        )
    )
}

fn is_opening_context(prev: Option<char>) -> bool {
    prev.is_none_or(|c| c.is_whitespace() || matches!(c, '(' | '[' | '{'))
}

/// `3x4` or `3 x 4`.
fn is_times(chars: &[char], i: usize) -> bool {
    let digit = |at: Option<usize>| at.and_then(|at| chars.get(at)).is_some_and(char::is_ascii_digit);
    let space = |at: Option<usize>| at.and_then(|at| chars.get(at)) == Some(&' ');
    let before = |n: usize| i.checked_sub(n);
    let after = |n: usize| Some(i + n);
    (digit(before(1)) && digit(after(1)))
        || (space(before(1)) && digit(before(2)) && space(after(1)) && digit(after(2)))
}

pub struct Typography<'a> {
    options: &'a ParserOptions,
    scope: Scope,
}

impl<'a> Typography<'a> {
    pub fn new(options: &'a ParserOptions) -> Self {
        Self {
            options,
            scope: Scope::default(),
        }
    }

    pub fn process(mut self, doc: &mut Document) {
        log::debug!("Typography with default language {:?}", self.options.default_lang);
        let root = doc.root();
        let lang = self.options.default_lang.clone();
        self.visit(doc, root, &lang);
    }

    fn visit(&mut self, doc: &mut Document, id: NodeId, inherited: &str) {
        let node = doc.node(id);
        if skips_subtree(&node.kind) {
            return;
        }
        if starts_scope(&node.kind) {
            self.scope = Scope::default();
        } else if node.kind.as_block() == Some(&BlockKind::Line) {
            // A line break reads as whitespace; open quotes stay open.
            self.scope.prev = Some('\n');
        }
        let own = node.attributes.get_text("lang").map(str::to_owned);
        let lang = own.as_deref().unwrap_or(inherited);

        if node.kind.is_text() {
            self.rewrite_text(doc, id, Locale::resolve(lang));
        }
        for child in doc.children(id).to_vec() {
            self.visit(doc, child, lang);
        }
    }

    fn rewrite_text(&mut self, doc: &mut Document, id: NodeId, locale: &Locale) {
        let Some(content) = doc.node(id).content.clone() else {
            return;
        };
        let chars: Vec<char> = content.chars().collect();
        let mut out = String::with_capacity(content.len());

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let prev = if i > 0 { Some(chars[i - 1]) } else { self.scope.prev };
            let next = chars.get(i + 1).copied();
            let after_next = chars.get(i + 2).copied();
            let opening = is_opening_context(prev);
            let mut consumed = 1;

            match c {
                '"' => self.quote(doc, id, &mut out, Quote::Double, opening, locale),
                '\'' if prev.is_some_and(|p| p.is_ascii_digit()) => {
                    if next == Some('\'') {
                        out.push('″');
                        consumed = 2;
                    } else {
                        out.push('′');
                    }
                }
                '\'' if prev.is_some_and(char::is_alphabetic)
                    && next.is_some_and(char::is_alphabetic) =>
                {
                    out.push('’');
                }
                '\'' => self.quote(doc, id, &mut out, Quote::Single, opening, locale),
                '.' if next == Some('.') && after_next == Some('.') => {
                    out.push('…');
                    consumed = 3;
                }
                '-' if next == Some('-') && after_next == Some('-') => {
                    out.push('—');
                    consumed = 3;
                }
                '-' if next == Some('-') => {
                    out.push('–');
                    consumed = 2;
                }
                '-' if opening && next.is_some_and(|n| n.is_ascii_digit()) => out.push('−'),
                '[' if next == Some('<') => {
                    out.push('⟨');
                    consumed = 2;
                }
                '>' if next == Some(']') => {
                    out.push('⟩');
                    consumed = 2;
                }
                '<' if next == Some('<') => {
                    out.push_str(&locale.pad(locale.guillemets[0], true));
                    consumed = 2;
                }
                '>' if next == Some('>') => {
                    out.push_str(&locale.pad(locale.guillemets[1], false));
                    consumed = 2;
                }
                '<' if opening && next.is_some_and(|n| !n.is_whitespace()) => {
                    out.push_str(&locale.pad(locale.single_guillemets[0], true));
                }
                '>' if prev.is_some_and(|p| !p.is_whitespace())
                    && next.is_none_or(|n| n.is_whitespace() || n.is_ascii_punctuation()) =>
                {
                    out.push_str(&locale.pad(locale.single_guillemets[1], false));
                }
                '?' | '!' if locale.spaced && prev.is_some_and(|p| !p.is_whitespace() && p != '?' && p != '!') => {
                    out.push(NARROW_NBSP);
                    out.push(c);
                }
                ':' if locale.spaced
                    && prev.is_some_and(|p| !p.is_whitespace())
                    && next.is_none_or(char::is_whitespace) =>
                {
                    out.push(NARROW_NBSP);
                    out.push(c);
                }
                'x' if is_times(&chars, i) => out.push('×'),
                _ => out.push(c),
            }

            self.scope.prev = Some(chars[i + consumed - 1]);
            i += consumed;
        }

        doc.node_mut(id).content = Some(out);
    }

    /// Emit a closing quote, then either remember it as a possible opening
    /// or pair it with the innermost open site.
    fn quote(
        &mut self,
        doc: &mut Document,
        current: NodeId,
        out: &mut String,
        quote: Quote,
        opening: bool,
        locale: &Locale,
    ) {
        let [open, close] = match quote {
            Quote::Double => locale.double,
            Quote::Single => locale.single,
        };
        let close = locale.pad(close, false);
        let offset = out.len();
        out.push_str(&close);

        let stack = match quote {
            Quote::Double => &mut self.scope.doubles,
            Quote::Single => &mut self.scope.singles,
        };
        if opening {
            stack.push(Site {
                node: current,
                offset,
                len: close.len(),
            });
            return;
        }
        let Some(site) = stack.pop() else {
            return;
        };

        let open = locale.pad(open, true);
        let range = site.offset..site.offset + site.len;
        if site.node == current {
            out.replace_range(range, &open);
        } else if let Some(content) = doc.node_mut(site.node).content.as_mut() {
            content.replace_range(range, &open);
        }
        log::trace!("Paired {quote:?} quote in node {}", site.node.index());

        if open.len() != site.len {
            for other in self.scope.doubles.iter_mut().chain(self.scope.singles.iter_mut()) {
                if other.node == site.node && other.offset > site.offset {
                    other.offset = other.offset + open.len() - site.len;
                }
            }
        }
    }
}
