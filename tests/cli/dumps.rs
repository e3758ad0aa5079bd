//! `tokens` and `blocks` subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_tokens_from_stdin() {
    cargo_bin_cmd!("markfive")
        .arg("tokens")
        .write_stdin("- item\n\ntext")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"LIST_ITEM_MARK\""))
        .stdout(predicate::str::contains("\"EMPTY_LINE\""))
        .stdout(predicate::str::contains("\"TEXT_LINE\""));
}

#[test]
fn test_tokens_compact_is_one_line() {
    let output = cargo_bin_cmd!("markfive")
        .args(["tokens", "--compact"])
        .write_stdin("a\nb")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn test_blocks_keep_raw_content() {
    cargo_bin_cmd!("markfive")
        .args(["blocks", "--compact"])
        .write_stdin("Some *strong* text")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content\":\"Some *strong* text\""))
        .stdout(predicate::str::contains("STRONG").not());
}
