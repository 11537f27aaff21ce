//! Render subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_stdin() {
    cargo_bin_cmd!("bbking")
        .arg("render")
        .write_stdin("[b]bold[/b] & [i]italic[/i]")
        .assert()
        .success()
        .stdout("<strong>bold</strong> &amp; <em>italic</em>\n");
}

#[test]
fn test_render_file_with_line_breaks() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("post.bb");
    fs::write(&input, "[quote=Ann]hello\nworld[/quote]").unwrap();

    cargo_bin_cmd!("bbking")
        .args(["render", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<blockquote><cite>Ann</cite>hello<br>world</blockquote>\n");
}

#[test]
fn test_render_empty_input_fails() {
    cargo_bin_cmd!("bbking")
        .arg("render")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("document is empty"));
}

#[test]
fn test_render_unknown_library_fails() {
    cargo_bin_cmd!("bbking")
        .args(["render", "--library", "text", "--library", "nope"])
        .write_stdin("[b]x[/b]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag library 'nope' is not available"));
}

#[test]
fn test_render_library_selection() {
    cargo_bin_cmd!("bbking")
        .args(["render", "--library", "quote"])
        .write_stdin("[b]x[/b]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("b is not a valid tag name"));
}

#[test]
fn test_render_template_dir_override() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("tags")).unwrap();
    fs::write(temp_dir.path().join("tags/b.html"), "<b>{{ contents }}</b>").unwrap();

    cargo_bin_cmd!("bbking")
        .args(["render", "--template-dir", temp_dir.path().to_str().unwrap()])
        .write_stdin("[b]x[/b]")
        .assert()
        .success()
        .stdout("<b>x</b>\n");
}

#[test]
fn test_render_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bbking.yaml");
    fs::write(&config, "tag_libraries: [text]\n").unwrap();

    cargo_bin_cmd!("bbking")
        .args(["render", "--config", config.to_str().unwrap()])
        .write_stdin("[quote]x[/quote]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("quote is not a valid tag name"));
}

#[test]
fn test_render_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("bbking.yaml");
    fs::write(&config, "libraries: [text]\n").unwrap();

    cargo_bin_cmd!("bbking")
        .args(["render", "--config", config.to_str().unwrap()])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
