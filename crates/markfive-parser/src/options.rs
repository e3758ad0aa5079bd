use std::collections::BTreeMap;

/// Knobs shared by the inline parser and typography pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Locale used by typography when no ancestor carries a `lang` attribute.
    pub default_lang: String,
    pub typography: bool,
    /// Keep token buffers and raw `content` on nodes that gained children.
    pub debug_tokens: bool,
    /// Values for `{{name}}` substitutions.
    pub data: BTreeMap<String, String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_lang: "en".to_string(),
            typography: true,
            debug_tokens: false,
            data: BTreeMap::new(),
        }
    }
}
