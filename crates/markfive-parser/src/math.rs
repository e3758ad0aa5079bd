//! Seam to the formula renderer.
//!
//! The parser never interprets formula syntax itself. BLOCK_MATH and
//! INLINE_MATH content is handed to a [`MathRenderer`] and whatever markup
//! it returns is stored verbatim. Renderer errors are not masked.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// `{` and `}` do not balance in the formula source.
    UnbalancedBraces { source: String },
    /// Failure reported by a custom renderer.
    Renderer(String),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::UnbalancedBraces { source } => {
                write!(f, "unbalanced braces in formula: {source}")
            }
            MathError::Renderer(message) => write!(f, "math renderer failed: {message}"),
        }
    }
}

impl std::error::Error for MathError {}

pub trait MathRenderer {
    /// Convert a formula to markup. `display` is true for block math.
    fn render(&self, source: &str, display: bool) -> Result<String, MathError>;
}

impl<F> MathRenderer for F
where
    F: Fn(&str, bool) -> Result<String, MathError>,
{
    fn render(&self, source: &str, display: bool) -> Result<String, MathError> {
        self(source, display)
    }
}

/// Wraps the escaped formula source in a `<math>` element without
/// interpreting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMathRenderer;

impl MathRenderer for PlainMathRenderer {
    fn render(&self, source: &str, display: bool) -> Result<String, MathError> {
        if !braces_balance(source) {
            return Err(MathError::UnbalancedBraces {
                source: source.to_string(),
            });
        }
        let mode = if display { "block" } else { "inline" };
        Ok(format!(
            "<math display=\"{mode}\"><mtext>{}</mtext></math>",
            html_escape::encode_text(source)
        ))
    }
}

/// Escaped `\{` and `\}` do not count.
fn braces_balance(source: &str) -> bool {
    let mut depth: i64 = 0;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
