//! CLI integration tests for markfive.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (tokens, blocks, parse)
//! - Stdin/stdout handling
//! - Exit codes
//! - Config discovery and flag overrides

mod common;
mod dumps;
mod parse;
