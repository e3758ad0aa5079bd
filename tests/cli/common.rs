//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("markfive")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("markfive compiles"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("markfive")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("markfive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("markfive")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_parse_help() {
    cargo_bin_cmd!("markfive")
        .args(["parse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-typography"));
}

#[test]
fn test_missing_file() {
    cargo_bin_cmd!("markfive")
        .args(["parse", "does-not-exist.m5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_man_pages_per_subcommand() {
    let man_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("target/man");
    for page in ["markfive", "markfive-tokens", "markfive-blocks", "markfive-parse"] {
        let path = man_dir.join(format!("{page}.1"));
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("missing man page {}: {e}", path.display()));
        assert!(content.contains("markfive"), "{page}.1 does not name the binary");
    }
    assert!(!man_dir.join("markfive-help.1").exists());
}
