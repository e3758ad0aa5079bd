//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("markfive")
        .arg("parse")
        .write_stdin("Heading\n=======\n\nParagraph.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"DOCUMENT\""))
        .stdout(predicate::str::contains("\"HEADING\""));
}

#[test]
fn test_parse_simple_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.m5");
    fs::write(&test_file, "- one\n- two\n\nParagraph with ~emphasis~.").unwrap();

    cargo_bin_cmd!("markfive")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"UNORDERED_LIST\""))
        .stdout(predicate::str::contains("\"PARAGRAPH\""))
        .stdout(predicate::str::contains("\"EM\""));
}

#[test]
fn test_parse_discovers_config_next_to_input() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.m5");
    fs::write(&test_file, "\"Hallo\" from {{name}}").unwrap();
    fs::write(
        temp_dir.path().join(".markfive.toml"),
        "lang = \"de\"\n\n[data]\nname = \"markfive\"",
    )
    .unwrap();

    cargo_bin_cmd!("markfive")
        .args(["parse", "--compact", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("„Hallo“ from markfive"));
}

#[test]
fn test_parse_flags_override_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.m5");
    let config_file = temp_dir.path().join("custom.toml");
    fs::write(&test_file, "\"quoted\"").unwrap();
    fs::write(&config_file, "lang = \"de\"").unwrap();

    cargo_bin_cmd!("markfive")
        .args([
            "parse",
            "--compact",
            "--config",
            config_file.to_str().unwrap(),
            "--lang",
            "en",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("“quoted”"));
}

#[test]
fn test_parse_no_typography() {
    cargo_bin_cmd!("markfive")
        .args(["parse", "--compact", "--no-typography"])
        .write_stdin("a -- b")
        .assert()
        .success()
        .stdout(predicate::str::contains("a -- b"));
}

#[test]
fn test_parse_debug_tokens() {
    cargo_bin_cmd!("markfive")
        .args(["parse", "--compact", "--debug-tokens"])
        .write_stdin("a *b*")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tokens\""))
        .stdout(predicate::str::contains("\"STRONG\""));
}

#[test]
fn test_parse_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    fs::write(&config_file, "lang = [").unwrap();

    cargo_bin_cmd!("markfive")
        .args(["parse", "--config", config_file.to_str().unwrap()])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_parse_math_error_exits_with_failure() {
    cargo_bin_cmd!("markfive")
        .arg("parse")
        .write_stdin("$$\\frac{a$$")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unbalanced braces"));
}

#[test]
fn test_parse_handles_edge_cases() {
    // The pipeline never fails on markup ambiguity
    for input in ["*", "[", "|| a |^ b", "``", "{{x", "@abbr["] {
        cargo_bin_cmd!("markfive")
            .arg("parse")
            .write_stdin(input)
            .assert()
            .success();
    }
}
