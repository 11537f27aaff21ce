//! Tags subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_tags_lists_builtins() {
    cargo_bin_cmd!("bbking")
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("[b] no arguments"))
        .stdout(predicate::str::contains("[url] positional argument"))
        .stdout(predicate::str::contains("[img] keyword arguments"))
        .stdout(predicate::str::contains("    [quote=Author]Example Text[/quote]"));
}

#[test]
fn test_tags_respects_library_selection() {
    cargo_bin_cmd!("bbking")
        .args(["tags", "--library", "quote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[quote]"))
        .stdout(predicate::str::contains("[b]").not());
}
