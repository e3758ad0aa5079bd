//! Compiler from markfive source text to an annotated document tree.
//!
//! The pipeline runs four passes over one [`Document`]:
//!
//! 1. [`lexer::tokenize`] classifies every line;
//! 2. [`BlockParser`] nests the lines by indentation;
//! 3. [`InlineParser`] turns raw block content into inline nodes;
//! 4. [`Typography`] rewrites punctuation in TEXT nodes.
//!
//! Formula rendering is delegated to a [`MathRenderer`].

pub mod block_parser;
pub mod inline_parser;
pub mod lexer;
pub mod math;
pub mod options;
pub mod syntax;
pub mod typography;
mod utils;

pub use block_parser::BlockParser;
pub use inline_parser::InlineParser;
pub use lexer::{LineKind, LineToken};
pub use math::{MathError, MathRenderer, PlainMathRenderer};
pub use options::ParserOptions;
pub use syntax::{
    AttributeValue, Attributes, BlockKind, Document, InlineKind, InlineToken, Node, NodeId,
    NodeKind, TokenKind,
};
pub use typography::Typography;

#[allow(dead_code)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Compiles markfive `source` into a document tree.
///
/// # Examples
///
/// ```rust
/// use markfive_parser::{ParserOptions, PlainMathRenderer, compile};
///
/// let doc = compile("Some *strong* words.", &ParserOptions::default(), &PlainMathRenderer)
///     .unwrap();
/// assert_eq!(doc.text(doc.root()), "Some strong words.");
/// ```
///
/// # Errors
///
/// Fails only when the math renderer rejects a formula.
pub fn compile(
    source: &str,
    options: &ParserOptions,
    math: &dyn MathRenderer,
) -> Result<Document, MathError> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let normalized = source.replace("\r\n", "\n");
    let tokens = lexer::tokenize(&normalized);
    log::debug!("Lexed {} lines", tokens.len());

    let mut doc = BlockParser::new(&tokens, math).parse()?;
    log::debug!("Block tree has {} nodes", doc.len());

    InlineParser::new(options, math).parse(&mut doc)?;
    log::debug!("Inline tree has {} nodes", doc.len());

    if options.typography {
        Typography::new(options).process(&mut doc);
    }
    Ok(doc)
}
