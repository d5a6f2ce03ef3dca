//! Attribute hydration.
//!
//! Shortcode attributes arrive as a flat `key → value` mapping. Keys may
//! encode a nested path with `_`-joined segments: `quotee_title="CEO"`
//! hydrates to `data.quotee.title = "CEO"`. Attributes sharing a path prefix
//! merge into one subtree instead of replacing each other, so
//! `{foo_a: "1", foo_b: "2"}` hydrates to `{foo: {a: "1", b: "2"}}`.
//!
//! Values are stored exactly as received (strings); hydration performs no
//! type coercion. A nested write that would tunnel through an existing
//! scalar is a [`HydrationConflict`](crate::Error::HydrationConflict)
//! rather than silent corruption.
//!
//! Bracketed segments (`list[0]`) are *not* interpreted here. The editor-side
//! flattener emits them for sequences, but hydration only understands
//! underscore-delimited object paths; a bracketed key passes through as an
//! ordinary flat key. See the flatten module for the other half of the
//! contract.

use crate::dispatch::AttrMap;
use crate::error::{Error, Result};
use crate::value::{DataMap, MergeError, Value};

/// Hydrates a flat attribute mapping into a nested data tree.
///
/// Keys without an interior `_` are stored directly (a direct store
/// replaces any previous value for that key). Keys with interior `_`
/// segments nest under the first segment and merge with whatever partial
/// structure earlier attributes built there.
pub fn hydrate_attrs(attrs: &AttrMap) -> Result<DataMap> {
    let mut data = DataMap::new();
    for (key, value) in attrs {
        hydrate_into(&mut data, key, value)?;
    }
    Ok(data)
}

/// Hydrates a single attribute into an existing data tree.
pub fn hydrate_into(data: &mut DataMap, key: &str, value: &str) -> Result<()> {
    match split_nested(key) {
        None => {
            data.insert(key.to_string(), Value::from(value));
        }
        Some(segments) => {
            let top = segments[0].to_string();
            let chain = build_chain(&segments[1..], value);
            let merged = match data.get(&top) {
                Some(existing) => existing.clone().merge(chain).map_err(|e| {
                    let MergeError::Conflict { path } = e;
                    Error::HydrationConflict {
                        key: key.to_string(),
                        // The merge only sees the subtree; put the
                        // top-level field back on the reported path.
                        path: if path == "." {
                            top.clone()
                        } else {
                            format!("{top}.{path}")
                        },
                    }
                })?,
                None => chain,
            };
            data.insert(top, merged);
        }
    }
    Ok(())
}

/// Splits a key into path segments when it encodes a nested path.
///
/// A key only nests when it has an interior `_`: a leading underscore does
/// not count as a separator, so `_private` is a plain flat key.
fn split_nested(key: &str) -> Option<Vec<&str>> {
    match key.find('_') {
        Some(pos) if pos > 0 => Some(key.split('_').collect()),
        _ => None,
    }
}

/// Builds the single-path tree `{seg0: {seg1: ... value}}`.
fn build_chain(segments: &[&str], value: &str) -> Value {
    let mut node = Value::from(value);
    for segment in segments.iter().rev() {
        let mut map = DataMap::new();
        map.insert((*segment).to_string(), node);
        node = Value::Map(map);
    }
    node
}
