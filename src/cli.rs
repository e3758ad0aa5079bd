use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "markfive")]
#[command(author, version)]
#[command(about = "A compiler for markfive documents")]
#[command(
    long_about = "markfive compiles the markfive markup language into an annotated document \
    tree. Documents are structured by indentation and line markers, with a rich inline grammar \
    (emphasis family, links, images, notes, key combinations, buttons, spans, variables and \
    math) and a locale-aware typography pass."
)]
#[command(after_help = "\
EXAMPLES:

    # Compile a file and print the tree as JSON
    markfive parse document.m5

    # Compile from stdin
    cat document.m5 | markfive parse

    # Inspect the line classification
    markfive tokens document.m5

    # Inspect the block tree before inline parsing
    markfive blocks document.m5

CONFIGURATION:

markfive looks for configuration files in this order:
  1. Explicit --config path
  2. markfive.toml or .markfive.toml in current/parent directories
  3. ~/.config/markfive/config.toml (XDG)
  4. Built-in defaults

Example .markfive.toml:

    lang = \"de\"
    typography = true

    [data]
    version = \"1.2\"
")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    #[arg(help = "Path to configuration file")]
    #[arg(
        long_help = "Path to a custom configuration file. If not specified, markfive will \
        search for .markfive.toml or markfive.toml in the input's directory and its parents, \
        then fall back to ~/.config/markfive/config.toml."
    )]
    pub config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the classified line tokens
    #[command(
        long_about = "Run only the line lexer and print one token per input line: its kind, \
        indentation, marker, attributes and text."
    )]
    Tokens {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// Print the block tree before inline parsing
    #[command(
        long_about = "Run the line lexer and block parser and print the resulting tree. Block \
        nodes still carry their raw, unparsed content."
    )]
    Blocks {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,
    },
    /// Compile a document and print the final tree
    #[command(
        long_about = "Run the whole pipeline (line lexer, block parser, inline parser and \
        typography) and print the document tree as JSON."
    )]
    #[command(after_help = "\
EXAMPLES:

    # Compile with German typography
    markfive parse --lang de document.m5

    # Keep inline token buffers for debugging
    markfive parse --debug-tokens document.m5

    # Leave quotes and dashes untouched
    echo '\"quoted\" -- text' | markfive parse --no-typography")]
    Parse {
        /// Input file (stdin if not provided)
        #[arg(help = "Input file path")]
        file: Option<PathBuf>,

        /// Skip the typography pass
        #[arg(long)]
        no_typography: bool,

        /// Keep token buffers and raw content on nodes
        #[arg(long)]
        debug_tokens: bool,

        /// Default typography locale
        #[arg(long, value_name = "LANG")]
        lang: Option<String>,
    },
}
