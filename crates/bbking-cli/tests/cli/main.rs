//! CLI integration tests for bbking.
//!
//! These tests execute the compiled binary and check subcommand output,
//! stdin/stdout handling and exit codes.

mod parse;
mod render;
mod tags;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("bbking")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bbking compiles bracket-tagged markup"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("bbking")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("bbking")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
