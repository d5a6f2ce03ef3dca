//! Integration tests for descriptor loading and registration.

use std::fs;
use std::path::Path;

use shortcaster::prelude::*;
use tempfile::TempDir;

fn write_descriptor(dir: &Path, file: &str, json: &str) {
    fs::write(dir.join(file), json).unwrap();
}

fn load_dir(dir: &Path) -> Result<(ShortcodeRegistry, usize)> {
    let kinds = KindRegistry::with_builtins();
    let mut registry = ShortcodeRegistry::new();
    let count = shortcaster::loader::register_sources(
        &[Source::Dir(dir.to_path_buf())],
        &kinds,
        &mut registry,
    )?;
    Ok((registry, count))
}

// ============================================================================
// Directory Scanning
// ============================================================================

#[test]
fn scans_json_files_in_a_directory() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "quote.json", r#"{"shortcode": "quote", "name": "Quote"}"#);
    write_descriptor(
        dir.path(),
        "layout.json",
        r#"[{"shortcode": "row"}, {"shortcode": "column"}]"#,
    );

    let (registry, count) = load_dir(dir.path()).unwrap();
    assert_eq!(count, 3);
    assert!(registry.contains("quote"));
    assert!(registry.contains("row"));
    assert!(registry.contains("column"));
}

#[test]
fn non_json_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "quote.json", r#"{"shortcode": "quote"}"#);
    write_descriptor(dir.path(), "notes.txt", "not a descriptor");
    write_descriptor(dir.path(), "README.md", "# docs");

    let (registry, count) = load_dir(dir.path()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn missing_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let (registry, count) = load_dir(&dir.path().join("does-not-exist")).unwrap();
    assert_eq!(count, 0);
    assert!(registry.is_empty());
}

#[test]
fn invalid_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "broken.json", "{ not json");

    let err = load_dir(dir.path()).expect_err("broken descriptor must fail the load");
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn unknown_kind_fails_the_load() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        dir.path(),
        "bad.json",
        r#"{"shortcode": "quote", "class": "nope"}"#,
    );

    let err = load_dir(dir.path()).expect_err("unknown kind must fail the load");
    assert!(matches!(err, Error::UnknownKind(tag) if tag == "nope"));
}

#[test]
fn last_registration_wins() {
    let dir = TempDir::new().unwrap();
    write_descriptor(
        dir.path(),
        "a.json",
        r#"{"shortcode": "quote", "template": "first.twig"}"#,
    );
    write_descriptor(
        dir.path(),
        "b.json",
        r#"{"shortcode": "quote", "template": "second.twig"}"#,
    );

    let (registry, count) = load_dir(dir.path()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(registry.len(), 1);
    let handler = registry.get("quote").unwrap();
    assert_eq!(handler.descriptor().template_name(), "second.twig");
}

// ============================================================================
// Source Resolution through the Engine
// ============================================================================

#[test]
fn source_resolvers_can_append_sources() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "quote.json", r#"{"shortcode": "quote"}"#);

    let mut config = Config::default();
    config.paths.shortcodes = dir.path().to_path_buf();

    let mut engine = Engine::new(config);
    engine.hooks_mut().resolve_sources_with(|mut sources| {
        sources.push(Source::Inline(r#"{"shortcode": "extra"}"#.to_string()));
        sources
    });

    let kinds = KindRegistry::with_builtins();
    let count = engine.load_shortcodes(&kinds).unwrap();
    assert_eq!(count, 2);
    assert!(engine.registry().contains("quote"));
    assert!(engine.registry().contains("extra"));
}

#[test]
fn source_resolvers_can_replace_the_default_directory() {
    let mut engine = Engine::new(Config::default());
    engine.hooks_mut().resolve_sources_with(|_default| {
        vec![Source::Inline(r#"[{"shortcode": "only"}]"#.to_string())]
    });

    let kinds = KindRegistry::with_builtins();
    let count = engine.load_shortcodes(&kinds).unwrap();
    assert_eq!(count, 1);
    assert_eq!(engine.registry().names(), vec!["only"]);
}
