pub mod config;

pub use config::Config;
pub use config::ConfigBuilder;
pub use markfive_parser::{
    BlockKind, Document, InlineKind, LineToken, MathError, MathRenderer, NodeId, NodeKind,
    PlainMathRenderer,
};

/// Compiles a markfive document into its annotated tree.
///
/// Formulas are rendered with [`PlainMathRenderer`]; use [`parse_with`] to
/// plug in another renderer.
///
/// # Examples
///
/// ```rust
/// use markfive::parse;
///
/// let input = "Title\n=====\n\nSome \"quoted\" text.";
/// let tree = parse(input, None).unwrap();
/// println!("{}", tree.outline());
/// ```
///
/// # Arguments
///
/// * `input` - The markfive source text
/// * `config` - Optional configuration. If None, uses default config.
pub fn parse(input: &str, config: Option<Config>) -> Result<Document, MathError> {
    parse_with(input, config, &PlainMathRenderer)
}

/// Like [`parse`], with a caller-supplied math renderer.
pub fn parse_with(
    input: &str,
    config: Option<Config>,
    renderer: &dyn MathRenderer,
) -> Result<Document, MathError> {
    let config = config.unwrap_or_default();
    markfive_parser::compile(input, &config.to_parser_options(), renderer)
}

/// Line tokens as classified by the lexer.
pub fn line_tokens(input: &str) -> Vec<LineToken> {
    markfive_parser::lexer::tokenize(&input.replace("\r\n", "\n"))
}

/// Block tree before inline parsing; block content is still raw.
pub fn blocks(input: &str) -> Result<Document, MathError> {
    let tokens = line_tokens(input);
    markfive_parser::BlockParser::new(&tokens, &PlainMathRenderer).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reaches_the_pipeline() {
        let cfg = ConfigBuilder::default().lang("de").build();
        let doc = parse("\"Hallo\"", Some(cfg)).unwrap();
        assert_eq!(doc.text(doc.root()), "„Hallo“");
    }

    #[test]
    fn blocks_keep_raw_content() {
        let doc = blocks("a *b*").unwrap();
        assert_eq!(doc.outline(), "DOCUMENT\n  PARAGRAPH\n    LINE \"a *b*\"\n");
    }

    #[test]
    fn data_table_feeds_variables() {
        let cfg = ConfigBuilder::default().data("version", "1.2").build();
        let doc = parse("Release {{version}}", Some(cfg)).unwrap();
        insta::assert_snapshot!(doc.outline(), @r#"
        DOCUMENT
          PARAGRAPH
            LINE
              TEXT "Release 1.2"
        "#);
    }

    #[test]
    fn custom_renderer() {
        let renderer =
            |source: &str, _: bool| -> Result<String, MathError> { Ok(source.to_uppercase()) };
        let doc = parse_with("$$x$$", None, &renderer).unwrap();
        assert_eq!(doc.outline(), "DOCUMENT\n  BLOCK_MATH \"X\"\n");
    }
}
