//! Integration tests for the editor-side flattener.
//!
//! The flattener is the inverse of hydration for the underscore form and
//! uses bracket indices for sequences, an asymmetry these tests pin down.

use pretty_assertions::assert_eq;
use serde_json::json;
use shortcaster::prelude::*;

fn flat(json: serde_json::Value) -> FlatMap {
    flatten(&Value::from_json(json))
}

// ============================================================================
// Shape Cases
// ============================================================================

#[test]
fn empty_root_yields_nothing() {
    assert!(flat(json!({})).is_empty());
}

#[test]
fn nested_empty_map_is_recorded() {
    let out = flat(json!({"foo": {}}));
    assert_eq!(out.len(), 1);
    assert_eq!(out.get("foo"), Some(&Value::map()));
}

#[test]
fn scalars_map_directly() {
    let out = flat(json!({"author": "Ada", "year": 1843}));
    assert_eq!(out.get("author"), Some(&Value::from("Ada")));
    assert_eq!(out.get("year"), Some(&Value::from(1843i64)));
}

#[test]
fn maps_flatten_with_underscores() {
    let out = flat(json!({"quotee": {"name": "Ada", "title": "CEO"}}));
    assert_eq!(out.get("quotee_name"), Some(&Value::from("Ada")));
    assert_eq!(out.get("quotee_title"), Some(&Value::from("CEO")));
}

#[test]
fn sequences_flatten_with_bracket_indices() {
    let out = flat(json!({"list": [1, 2]}));
    assert_eq!(out.get("list[0]"), Some(&Value::from(1i64)));
    assert_eq!(out.get("list[1]"), Some(&Value::from(2i64)));
}

#[test]
fn empty_sequence_is_recorded() {
    let out = flat(json!({"list": []}));
    assert_eq!(out.get("list"), Some(&Value::Seq(Vec::new())));
}

#[test]
fn deep_mixed_structure() {
    let out = flat(json!({"a": {"b": [{"c": "x"}, "y"]}, "d": "z"}));
    assert_eq!(out.get("a_b[0]_c"), Some(&Value::from("x")));
    assert_eq!(out.get("a_b[1]"), Some(&Value::from("y")));
    assert_eq!(out.get("d"), Some(&Value::from("z")));
}

#[test]
fn insertion_order_is_preserved() {
    let out = flat(json!({"first": "1", "nested": {"a": "2", "b": "3"}, "last": "4"}));
    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["first", "nested_a", "nested_b", "last"]);
}

// ============================================================================
// Round-Trip Property
// ============================================================================

#[test]
fn underscore_portions_round_trip_through_hydration() {
    // Keyed maps of string leaves (the underscore-delimited portion of the
    // contract) survive flatten → hydrate unchanged.
    let original = json!({
        "author": "Ada",
        "quotee": {"name": "Ada Lovelace", "title": "Countess"},
        "style": {"align": "left", "frame": {"width": "2"}}
    });

    let flat = flatten(&Value::from_json(original.clone()));
    let attrs: AttrMap = flat
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect();

    let hydrated = hydrate_attrs(&attrs).unwrap();
    assert_eq!(Value::Map(hydrated).to_json(), original);
}

#[test]
fn sequences_do_not_round_trip() {
    // The asymmetry: bracket keys come back as flat keys, not sequences.
    let original = json!({"list": ["a", "b"]});
    let flat = flatten(&Value::from_json(original));
    let attrs: AttrMap = flat
        .iter()
        .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
        .collect();

    let hydrated = hydrate_attrs(&attrs).unwrap();
    assert_eq!(
        Value::Map(hydrated).to_json(),
        json!({"list[0]": "a", "list[1]": "b"})
    );
}
