//! Parse subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_parse_prints_json() {
    cargo_bin_cmd!("bbking")
        .arg("parse")
        .write_stdin("[url=http://example.com]home[/url] [ghost]")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tagged\""))
        .stdout(predicate::str::contains("\"name\": \"url\""))
        .stdout(predicate::str::contains("\"arg\": \"http://example.com\""))
        .stdout(predicate::str::contains("\"literal\": \" [ghost]\""));
}

#[test]
fn test_parse_does_not_need_registered_tags() {
    cargo_bin_cmd!("bbking")
        .arg("parse")
        .write_stdin("[ghost]boo[/ghost]")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"ghost\""));
}
