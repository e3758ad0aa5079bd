use regex::Regex;
use std::sync::LazyLock;

use super::InlineParser;
use crate::math::MathError;
use crate::syntax::attributes::{AttributeValue, Attributes, parse_optional};
use crate::syntax::{BlockKind, Document, InlineKind, InlineToken, Node, NodeId, TokenKind};

static LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{L}+$").unwrap());

/// A `[*]` marker waiting for the bracket that carries its note body.
struct PendingNote {
    stars: String,
    /// Position in the output list where the marker stood.
    at: usize,
    /// Byte offset into the preceding TEXT node, when there was one.
    offset: Option<usize>,
    raw: String,
}

/// What an opening bracket turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketRole {
    KeyCombo,
    NoteMarker,
    NoteBody,
    NoteReference,
    Linked,
    Literal,
}

fn span_kind(kind: TokenKind) -> Option<InlineKind> {
    let kind = match kind {
        TokenKind::Em => InlineKind::Em,
        TokenKind::Strong => InlineKind::Strong,
        TokenKind::Mark => InlineKind::Mark,
        TokenKind::Dfn => InlineKind::Dfn,
        TokenKind::Var => InlineKind::Var,
        TokenKind::Sup => InlineKind::Sup,
        TokenKind::Sub => InlineKind::Sub,
        TokenKind::Code => InlineKind::Code,
        TokenKind::Kbd => InlineKind::Kbd,
        TokenKind::Samp => InlineKind::Samp,
        TokenKind::Cite => InlineKind::Cite,
        TokenKind::B => InlineKind::B,
        TokenKind::I => InlineKind::I,
        TokenKind::U => InlineKind::U,
        TokenKind::S => InlineKind::S,
        TokenKind::Button => InlineKind::Button,
        TokenKind::Span => InlineKind::Span,
        _ => return None,
    };
    Some(kind)
}

fn raw_text(tokens: &[InlineToken]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn find_close_bracket(tokens: &[InlineToken], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (j, token) in tokens.iter().enumerate().skip(open) {
        if token.is_open_bracket() {
            depth += 1;
        } else if token.is_close_bracket() {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(j);
            }
        }
    }
    None
}

fn is_plain_close(token: &InlineToken) -> bool {
    token.is_close_bracket() && token.default_attribute.is_none() && token.attributes.is_none()
}

fn is_note_marker(inner: &[InlineToken]) -> bool {
    !inner.is_empty() && inner.iter().all(|t| t.text == "*")
}

fn classify_bracket(
    tokens: &[InlineToken],
    open: usize,
    close: usize,
    note_pending: bool,
) -> BracketRole {
    let inner = &tokens[open + 1..close];
    let closing = &tokens[close];

    if inner.len() >= 2
        && is_plain_close(closing)
        && inner[0].is_open_bracket()
        && inner.last().is_some_and(is_plain_close)
        && find_close_bracket(tokens, open + 1) == Some(close - 1)
    {
        return BracketRole::KeyCombo;
    }
    if is_note_marker(inner) {
        if closing.default_attribute.is_some() {
            return BracketRole::NoteReference;
        }
        if !note_pending {
            return BracketRole::NoteMarker;
        }
    }
    if note_pending && !inner.is_empty() {
        return BracketRole::NoteBody;
    }
    if closing.default_attribute.is_some() {
        return BracketRole::Linked;
    }
    BracketRole::Literal
}

fn push_text(doc: &mut Document, out: &mut Vec<NodeId>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(&last) = out.last()
        && doc.kind(last).is_text()
    {
        doc.node_mut(last)
            .content
            .get_or_insert_with(String::new)
            .push_str(text);
        return;
    }
    out.push(doc.alloc(Node::text(text)));
}

/// Put an unused note marker back as literal text where it stood.
fn restore_note_marker(doc: &mut Document, out: &mut Vec<NodeId>, note: PendingNote) {
    if let Some(offset) = note.offset {
        let content = doc
            .node_mut(out[note.at - 1])
            .content
            .get_or_insert_with(String::new);
        content.insert_str(offset, &note.raw);
    } else if let Some(&next) = out.get(note.at)
        && doc.kind(next).is_text()
    {
        let content = doc.node_mut(next).content.get_or_insert_with(String::new);
        content.insert_str(0, &note.raw);
    } else {
        let id = doc.alloc(Node::text(note.raw));
        out.insert(note.at, id);
    }
}

impl InlineParser<'_> {
    /// Match delimiters in `tokens` and build the resulting nodes. The nodes
    /// are allocated but not yet linked to a parent.
    pub(super) fn build(
        &mut self,
        doc: &mut Document,
        tokens: &[InlineToken],
    ) -> Result<Vec<NodeId>, MathError> {
        let mut out = Vec::new();
        let mut pending: Option<PendingNote> = None;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            i = match token.kind {
                TokenKind::Math => i + 1,
                TokenKind::Br => {
                    out.push(doc.alloc(Node::inline(InlineKind::Br)));
                    i + 1
                }
                TokenKind::Wbr => {
                    out.push(doc.alloc(Node::inline(InlineKind::Wbr)));
                    i + 1
                }
                TokenKind::Td | TokenKind::Th => self.build_cell(doc, tokens, i, &mut out)?,
                TokenKind::Image => {
                    let linked = tokens.get(i + 1).is_some_and(InlineToken::is_open_bracket)
                        && find_close_bracket(tokens, i + 1).is_some_and(|close| {
                            classify_bracket(tokens, i + 1, close, pending.is_some())
                                == BracketRole::Linked
                        });
                    if !linked {
                        push_text(doc, &mut out, &token.text);
                    }
                    i + 1
                }
                TokenKind::InlineOther => self.build_inline_other(doc, tokens, i, &mut out)?,
                TokenKind::Bracket if token.is_open_bracket() => {
                    self.build_bracket(doc, tokens, i, &mut out, &mut pending)?
                }
                kind if token.positions.start && span_kind(kind).is_some() => {
                    self.build_span(doc, tokens, i, &mut out)?
                }
                _ => {
                    push_text(doc, &mut out, &token.text);
                    i + 1
                }
            };
        }

        if let Some(note) = pending {
            restore_note_marker(doc, &mut out, note);
        }
        Ok(out)
    }

    /// Allocate an inline node whose children come from `inner`.
    fn build_node(
        &mut self,
        doc: &mut Document,
        kind: InlineKind,
        attributes: Attributes,
        inner: &[InlineToken],
    ) -> Result<NodeId, MathError> {
        let children = self.build(doc, inner)?;
        let mut node = Node::inline(kind).with_attributes(attributes);
        node.children = children;
        if self.options.debug_tokens {
            node.tokens = Some(inner.to_vec());
        }
        Ok(doc.alloc(node))
    }

    fn build_bracket(
        &mut self,
        doc: &mut Document,
        tokens: &[InlineToken],
        open: usize,
        out: &mut Vec<NodeId>,
        pending: &mut Option<PendingNote>,
    ) -> Result<usize, MathError> {
        let Some(close) = find_close_bracket(tokens, open) else {
            push_text(doc, out, &tokens[open].text);
            return Ok(open + 1);
        };
        let inner = &tokens[open + 1..close];
        let closing = &tokens[close];
        let attributes = parse_optional(closing.attributes.as_deref());

        match classify_bracket(tokens, open, close, pending.is_some()) {
            BracketRole::KeyCombo => {
                let keys = &tokens[open + 2..close - 1];
                let id = self.build_key_combo(doc, keys)?;
                out.push(id);
            }
            BracketRole::NoteMarker => {
                let offset = out
                    .last()
                    .filter(|&&last| doc.kind(last).is_text())
                    .and_then(|&last| doc.node(last).content.as_ref().map(String::len));
                *pending = Some(PendingNote {
                    stars: "*".repeat(inner.len()),
                    at: out.len(),
                    offset,
                    raw: raw_text(&tokens[open..=close]),
                });
            }
            BracketRole::NoteBody => {
                let stars = pending.take().map(|note| note.stars).unwrap_or_default();
                let id = self.build_node(doc, InlineKind::Note { stars, id: None }, attributes, inner)?;
                out.push(id);
            }
            BracketRole::NoteReference => {
                let target = parse_optional(closing.default_attribute.as_deref());
                let kind = InlineKind::Note {
                    stars: "*".repeat(inner.len()),
                    id: target.get_text("id").map(str::to_string),
                };
                out.push(doc.alloc(Node::inline(kind).with_attributes(attributes)));
            }
            BracketRole::Linked => {
                let target = closing.default_attribute.clone().unwrap_or_default();
                let after_image = open > 0 && tokens[open - 1].kind == TokenKind::Image;
                let id = if after_image && inner.len() > 1 {
                    let mut attrs = Attributes::new();
                    attrs.set_text("data", target);
                    attrs.set_text("role", "img");
                    attrs.extend(attributes);
                    self.build_node(doc, InlineKind::Object, attrs, inner)?
                } else if after_image {
                    let mut attrs = Attributes::new();
                    attrs.set_text("src", target);
                    attrs.set_text("alt", raw_text(inner));
                    attrs.extend(attributes);
                    doc.alloc(Node::inline(InlineKind::Img).with_attributes(attrs))
                } else {
                    let mut attrs = Attributes::new();
                    attrs.set_text("href", target);
                    attrs.extend(attributes);
                    self.build_node(doc, InlineKind::A, attrs, inner)?
                };
                out.push(id);
            }
            BracketRole::Literal => {
                push_text(doc, out, &tokens[open].text);
                return Ok(open + 1);
            }
        }
        Ok(close + 1)
    }

    /// `[[Ctrl]+[C]]`: keys split on the `]+[` joiners.
    fn build_key_combo(
        &mut self,
        doc: &mut Document,
        keys: &[InlineToken],
    ) -> Result<NodeId, MathError> {
        let groups: Vec<&[InlineToken]> = keys
            .split(|t| t.kind == TokenKind::KeyJoiner)
            .collect();
        if let [single] = groups.as_slice() {
            return self.build_node(doc, InlineKind::Key, Attributes::new(), single);
        }

        let mut kbd = Node::inline(InlineKind::Kbd);
        for (n, group) in groups.iter().enumerate() {
            if n > 0 {
                let joiner = doc.alloc(Node::inline(InlineKind::KeyJoiner));
                kbd.children.push(joiner);
            }
            let key = self.build_node(doc, InlineKind::Key, Attributes::new(), group)?;
            kbd.children.push(key);
        }
        if self.options.debug_tokens {
            kbd.tokens = Some(keys.to_vec());
        }
        Ok(doc.alloc(kbd))
    }

    /// `@tag[content](default){attrs}`
    fn build_inline_other(
        &mut self,
        doc: &mut Document,
        tokens: &[InlineToken],
        at: usize,
        out: &mut Vec<NodeId>,
    ) -> Result<usize, MathError> {
        let tag = tokens
            .get(at + 1)
            .filter(|t| t.kind == TokenKind::Text)
            .map(|t| t.text.clone());
        let close = tokens
            .get(at + 2)
            .filter(|t| t.is_open_bracket())
            .and_then(|_| find_close_bracket(tokens, at + 2));
        let (Some(tag), Some(close)) = (tag, close) else {
            push_text(doc, out, &tokens[at].text);
            return Ok(at + 1);
        };

        let closing = &tokens[close];
        let mut attributes = Attributes::new();
        let default_name = match tag.as_str() {
            "abbr" => Some("title"),
            "bdo" => Some("dir"),
            "data" => Some("value"),
            "time" => Some("datetime"),
            _ => None,
        };
        if let (Some(name), Some(value)) = (default_name, &closing.default_attribute) {
            attributes.set_text(name, value.as_str());
        }
        attributes.extend(parse_optional(closing.attributes.as_deref()));

        let inner = &tokens[at + 3..close];
        let id = self.build_node(doc, InlineKind::InlineOther { tag }, attributes, inner)?;
        out.push(id);
        Ok(close + 1)
    }

    fn find_span_close(tokens: &[InlineToken], open: usize) -> Option<usize> {
        let kind = tokens[open].kind;
        if kind.is_self_nestable() {
            let mut depth = 1usize;
            for (j, token) in tokens.iter().enumerate().skip(open + 1) {
                if token.kind != kind {
                    continue;
                }
                if token.positions.end {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j);
                    }
                } else if token.positions.start {
                    depth += 1;
                }
            }
            None
        } else {
            tokens
                .iter()
                .enumerate()
                .skip(open + 1)
                .find(|(_, t)| t.kind == kind && t.positions.end)
                .map(|(j, _)| j)
        }
    }

    fn build_span(
        &mut self,
        doc: &mut Document,
        tokens: &[InlineToken],
        open: usize,
        out: &mut Vec<NodeId>,
    ) -> Result<usize, MathError> {
        let token = &tokens[open];
        let close = Self::find_span_close(tokens, open).filter(|&close| close - open > 1);
        let (Some(close), Some(kind)) = (close, span_kind(token.kind)) else {
            push_text(doc, out, &token.text);
            return Ok(open + 1);
        };
        let closing = &tokens[close];

        let mut attributes = Attributes::new();
        if kind == InlineKind::Dfn
            && let Some(title) = &closing.default_attribute
        {
            attributes.set_text("title", title.as_str());
        }
        attributes.extend(parse_optional(closing.attributes.as_deref()));

        let raw = &tokens[open + 1..close];
        let bracketed = raw.len() >= 2
            && raw[0].is_open_bracket()
            && raw.last().is_some_and(InlineToken::is_close_bracket);
        let inner = if bracketed {
            &raw[1..raw.len() - 1]
        } else {
            raw
        };

        match kind {
            InlineKind::Button => {
                let id = self.build_button(doc, attributes, inner)?;
                out.push(id);
            }
            InlineKind::Var if !LETTERS.is_match(&raw_text(inner)) => {
                let markup = self.math.render(&raw_text(inner), false)?;
                let node = Node::inline(InlineKind::InlineMath)
                    .with_attributes(attributes)
                    .with_content(markup);
                out.push(doc.alloc(node));
            }
            InlineKind::Sup | InlineKind::Sub => {
                // Closing delimiters of neighbouring spans count as text.
                let padded_before = open == 0 || tokens[open - 1].text.ends_with(char::is_whitespace);
                let padded_after = tokens
                    .get(close + 1)
                    .is_none_or(|next| next.text.starts_with(char::is_whitespace));
                let spaced = raw_text(raw).contains(' ');
                if (padded_before && padded_after) || spaced {
                    if !bracketed {
                        let literal = format!("{}{}{}", token.text, raw_text(raw), closing.text);
                        push_text(doc, out, &literal);
                        return Ok(close + 1);
                    }
                }
                let id = self.build_node(doc, kind, attributes, inner)?;
                out.push(id);
            }
            _ => {
                let id = self.build_node(doc, kind, attributes, inner)?;
                out.push(id);
            }
        }
        Ok(close + 1)
    }

    /// `[|Save|Cancel|]` groups its buttons under a KBD.
    fn build_button(
        &mut self,
        doc: &mut Document,
        attributes: Attributes,
        inner: &[InlineToken],
    ) -> Result<NodeId, MathError> {
        if !inner.iter().any(|t| t.kind == TokenKind::ButtonSeparator) {
            return self.build_node(doc, InlineKind::Button, attributes, inner);
        }
        let mut kbd = Node::inline(InlineKind::Kbd).with_attributes(attributes);
        for (n, group) in inner
            .split(|t| t.kind == TokenKind::ButtonSeparator)
            .enumerate()
        {
            if n > 0 {
                let separator = doc.alloc(Node::inline(InlineKind::ButtonSeparator));
                kbd.children.push(separator);
            }
            let button = self.build_node(doc, InlineKind::Button, Attributes::new(), group)?;
            kbd.children.push(button);
        }
        if self.options.debug_tokens {
            kbd.tokens = Some(inner.to_vec());
        }
        Ok(doc.alloc(kbd))
    }

    /// One compact-row cell: `|` or `!`, an optional `^` joining the cell
    /// to the one above, then one `>` per extra column spanned.
    fn build_cell(
        &mut self,
        doc: &mut Document,
        tokens: &[InlineToken],
        at: usize,
        out: &mut Vec<NodeId>,
    ) -> Result<usize, MathError> {
        let marker = &tokens[at];
        let next_cell = tokens[at + 1..]
            .iter()
            .position(|t| matches!(t.kind, TokenKind::Td | TokenKind::Th))
            .map_or(tokens.len(), |p| at + 1 + p);

        let continues_above = tokens
            .get(at + 1)
            .is_some_and(|t| t.kind == TokenKind::Sup && at + 1 < next_cell);
        let mut body_start = at + 1 + usize::from(continues_above);
        let mut colspan = 1usize;
        while body_start < next_cell && tokens[body_start].kind == TokenKind::Kbd {
            colspan += 1;
            body_start += 1;
        }

        let mut body: Vec<InlineToken> = tokens[body_start..next_cell].to_vec();
        if let Some(first) = body.first_mut()
            && first.kind == TokenKind::Text
        {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = body.last_mut()
            && last.kind == TokenKind::Text
        {
            last.text = last.text.trim_end().to_string();
        }
        body.retain(|t| t.kind != TokenKind::Text || !t.text.is_empty());

        // A closing `|` at the end of the row is not a cell.
        if body.is_empty() && next_cell == tokens.len() && !continues_above && colspan == 1 {
            return Ok(next_cell);
        }

        let mut attributes = Attributes::new();
        if colspan > 1 {
            attributes.set("colspan", AttributeValue::Integer(colspan as i64));
        }
        attributes.extend(parse_optional(marker.attributes.as_deref()));

        let origin = if continues_above {
            self.table.rowspan_origin(self.table.column())
        } else {
            None
        };
        if let Some(origin) = origin {
            let spans = &mut doc.node_mut(origin).attributes;
            let rows = spans.get_integer("rowspan").unwrap_or(1);
            spans.set("rowspan", AttributeValue::Integer(rows + 1));
            attributes.set_text("data-in-rowspan", "true");
        }

        let header = marker.kind == TokenKind::Th;
        let children = self.build(doc, &body)?;
        let mut cell = Node::block(BlockKind::TableCell { header }).with_attributes(attributes);
        cell.children = children;
        if self.options.debug_tokens {
            cell.tokens = Some(body);
        }
        let id = doc.alloc(cell);

        if let Some(origin) = origin {
            self.table.mark_continuation(id, origin);
        }
        self.table.push_cell(id, colspan);
        out.push(id);
        Ok(next_cell)
    }
}
