use regex::Regex;
use std::sync::LazyLock;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\p{N}]$").unwrap());

/// Indentation depth of a leading whitespace run.
///
/// Tabs and spaces are never mixed: if the run starts with a tab only the
/// leading tabs count, otherwise only the leading spaces.
pub(crate) fn indent_width(prefix: &str) -> usize {
    match prefix.chars().next() {
        Some('\t') => prefix.chars().take_while(|&c| c == '\t').count(),
        Some(' ') => prefix.chars().take_while(|&c| c == ' ').count(),
        _ => 0,
    }
}

/// Letters, combining marks and numbers count as word characters.
pub(crate) fn is_alphanumeric(c: Option<char>) -> bool {
    c.is_some_and(|c| {
        let mut buf = [0u8; 4];
        ALPHANUMERIC.is_match(c.encode_utf8(&mut buf))
    })
}

pub(crate) fn is_whitespace(c: Option<char>) -> bool {
    c.is_some_and(char::is_whitespace)
}

/// Remove up to `width` leading whitespace characters.
pub(crate) fn strip_indent(line: &str, width: usize) -> &str {
    let mut rest = line;
    for _ in 0..width {
        match rest.strip_prefix([' ', '\t']) {
            Some(stripped) => rest = stripped,
            None => break,
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_counts_tabs_xor_spaces() {
        assert_eq!(indent_width(""), 0);
        assert_eq!(indent_width("    "), 4);
        assert_eq!(indent_width("\t\t"), 2);
        assert_eq!(indent_width("\t  "), 1);
        assert_eq!(indent_width("  \t"), 2);
    }

    #[test]
    fn unicode_word_characters() {
        assert!(is_alphanumeric(Some('ä')));
        assert!(is_alphanumeric(Some('٣')));
        assert!(is_alphanumeric(Some('\u{301}')));
        assert!(!is_alphanumeric(Some('_')));
        assert!(!is_alphanumeric(None));
        assert!(is_whitespace(Some('\u{a0}')));
        assert!(!is_whitespace(None));
    }

    #[test]
    fn strip_indent_stops_at_text() {
        assert_eq!(strip_indent("    code", 2), "  code");
        assert_eq!(strip_indent(" x", 4), "x");
    }
}
