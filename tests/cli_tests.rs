//! End-to-end tests for the shortcaster CLI.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("shortcodes")).unwrap();
    fs::create_dir(dir.path().join("templates")).unwrap();
    fs::write(
        dir.path().join("shortcodes/quote.json"),
        r#"{"shortcode": "quote", "name": "Quote", "show_ui": true,
            "data": {"author": ""}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("templates/quote.twig"),
        "{{ author }}: {{ content }}",
    )
    .unwrap();
    dir
}

fn shortcaster(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shortcaster").unwrap();
    cmd.arg("--shortcodes-dir")
        .arg(dir.join("shortcodes"))
        .arg("--templates-dir")
        .arg(dir.join("templates"));
    cmd
}

#[test]
fn render_expands_a_document() {
    let dir = site();
    let doc = dir.path().join("post.html");
    fs::write(&doc, r#"<p>[quote author="Ada"]Hello[/quote]</p>"#).unwrap();

    shortcaster(dir.path())
        .arg("render")
        .arg(&doc)
        .assert()
        .success()
        .stdout("<p>Ada: Hello</p>");
}

#[test]
fn render_reads_stdin() {
    let dir = site();
    shortcaster(dir.path())
        .arg("render")
        .arg("-")
        .write_stdin(r#"[quote author="Ada"]Hi[/quote]"#)
        .assert()
        .success()
        .stdout("Ada: Hi");
}

#[test]
fn list_names_registered_shortcodes() {
    let dir = site();
    shortcaster(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("quote.twig"));
}

#[test]
fn snippet_prints_the_insertion_text() {
    let dir = site();
    shortcaster(dir.path())
        .arg("snippet")
        .arg("quote")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"[quote author="" ][/quote]"#));
}

#[test]
fn snippet_for_unknown_shortcode_fails() {
    let dir = site();
    shortcaster(dir.path())
        .arg("snippet")
        .arg("missing")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("not registered"));
}

#[test]
fn validate_reports_the_count() {
    let dir = site();
    shortcaster(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 shortcode(s) registered"));
}

#[test]
fn broken_descriptor_fails_validation() {
    let dir = site();
    fs::write(dir.path().join("shortcodes/broken.json"), "{ nope").unwrap();

    shortcaster(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("broken.json"));
}
