//! Data flattening, the editor-side inverse of hydration.
//!
//! The editor integration serializes a shortcode's nested default data back
//! into flat attribute keys so the insertion snippet can carry it as
//! `key="value"` pairs. Sequence elements flatten under `prefix[index]`
//! (bracket form); map entries flatten under `prefix_key` (underscore
//! form). Empty containers survive as leaves so the shape is not lost:
//! `{list: []}` flattens to `list → []`.
//!
//! The bracket form is deliberately asymmetric with hydration, which only
//! interprets underscore paths; sequence-valued defaults therefore do not
//! round-trip through the editor flow. This mirrors the upstream editor
//! behavior and is pinned by tests.

use crate::value::Value;
use indexmap::IndexMap;

/// A flat `path → value` mapping produced by [`flatten`]. Values are
/// scalar leaves except for the empty-container markers.
pub type FlatMap = IndexMap<String, Value>;

/// Flattens a nested value into a flat mapping.
///
/// The empty map at the root produces an empty mapping; every other empty
/// container is recorded under its prefix.
pub fn flatten(value: &Value) -> FlatMap {
    let mut out = FlatMap::new();
    flatten_into(value, "", &mut out);
    out
}

fn flatten_into(current: &Value, prefix: &str, out: &mut FlatMap) {
    match current {
        Value::Leaf(_) => {
            out.insert(prefix.to_string(), current.clone());
        }
        Value::Seq(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(item, &format!("{prefix}[{index}]"), out);
            }
            if items.is_empty() {
                out.insert(prefix.to_string(), Value::Seq(Vec::new()));
            }
        }
        Value::Map(fields) => {
            for (key, value) in fields {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}_{key}")
                };
                flatten_into(value, &child, out);
            }
            if fields.is_empty() && !prefix.is_empty() {
                out.insert(prefix.to_string(), Value::map());
            }
        }
    }
}
