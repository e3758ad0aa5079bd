//! Attribute blocks: `{#id .class1 .class2 key=value key="quoted value"}`.
//!
//! Attribute blocks follow block markers, closing inline delimiters and
//! closing brackets. The lexers only recognize the raw block (see
//! [`attribute_block`]); parsing into [`Attributes`] happens lazily when a
//! node is built.
//!
//! Rules:
//! - Identifier: `#id` (the last one wins)
//! - Classes: `.class` (can repeat, `.a.b` is two classes)
//! - Key-value pairs: `key=value`, `key="value"`, `key='value'`
//! - A bare key is stored with an empty value

use std::fmt;

/// Pattern matching one attribute inside a block.
const ATTRIBUTE: &str =
    r#"(?:(?:data-)?[a-z]+(?:=(?:\w+|"[^"]*"|'[^']*'))?|\.[^ \t{}]+|#[^ \t{}]+)"#;

/// Pattern matching a whole `{...}` block, capturing its inside as `attrs`.
pub(crate) fn attribute_block() -> String {
    format!(r"\{{(?P<attrs>{ATTRIBUTE}(?: {ATTRIBUTE})*)\}}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum AttributeValue {
    Text(String),
    Classes(Vec<String>),
    Integer(i64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => write!(f, "{text:?}"),
            AttributeValue::Classes(classes) => write!(f, "[{}]", classes.join(" ")),
            AttributeValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// Ordered attribute map. Insertion order is preserved for renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, AttributeValue)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(AttributeValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(AttributeValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Sets `name`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) {
        let name = name.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, AttributeValue::Text(value.into()));
    }

    /// Merges `other` into `self`; values from `other` win.
    pub fn extend(&mut self, other: Attributes) {
        for (name, value) in other.0 {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parse the inside of an attribute block (without the braces).
///
/// Malformed fragments are skipped rather than rejected.
pub fn parse_attributes(content: &str) -> Attributes {
    let mut attributes = Attributes::new();
    let mut classes: Vec<String> = Vec::new();

    let content = content.trim();
    let bytes = content.as_bytes();
    let mut pos = 0;

    let word_end = |mut pos: usize| {
        while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'}' {
            pos += 1;
        }
        pos
    };

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        if bytes[pos] == b'#' {
            let start = pos + 1;
            pos = word_end(start);
            if pos > start {
                attributes.set_text("id", &content[start..pos]);
            }
        } else if bytes[pos] == b'.' {
            let start = pos + 1;
            pos = word_end(start);
            classes.extend(
                content[start..pos]
                    .split('.')
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
            );
        } else {
            let key_start = pos;
            while pos < bytes.len() && bytes[pos] != b'=' && !bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            let key = &content[key_start..pos];

            if pos >= bytes.len() || bytes[pos] != b'=' {
                if !key.is_empty() {
                    attributes.set_text(key, "");
                }
                continue;
            }
            pos += 1;

            let value = if pos < bytes.len() && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                pos += 1;
                let start = pos;
                while pos < bytes.len() && bytes[pos] != quote {
                    pos += 1;
                }
                let value = &content[start..pos];
                if pos < bytes.len() {
                    pos += 1;
                }
                value
            } else {
                let start = pos;
                pos = word_end(start);
                &content[start..pos]
            };

            if !key.is_empty() {
                attributes.set_text(key, value);
            }
        }
    }

    if !classes.is_empty() {
        attributes.set("class", AttributeValue::Classes(classes));
    }
    attributes
}

/// Parse an optional raw attribute string, as carried by tokens.
pub fn parse_optional(raw: Option<&str>) -> Attributes {
    raw.map(parse_attributes).unwrap_or_default()
}
