//! The shortcode data tree.
//!
//! Shortcode data is a tree of scalars, sequences, and keyed maps. The
//! [`Value`] type is a closed tagged variant (no dynamic property bags):
//! attribute hydration, descriptor defaults, and template contexts all move
//! through it. Maps are insertion-ordered so rendered output and editor
//! snippets are deterministic.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// An ordered map from field name to [`Value`], the shape of every
/// shortcode's render data.
pub type DataMap = IndexMap<String, Value>;

/// A scalar leaf in the data tree.
///
/// Attribute values always arrive as strings and are stored as received;
/// the other variants occur in descriptor default data, which is arbitrary
/// JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// A node in the shortcode data tree: a scalar leaf, a sequence, or a
/// keyed map.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A scalar leaf.
    Leaf(Scalar),
    /// A sequence of values.
    Seq(Vec<Value>),
    /// An insertion-ordered keyed map.
    Map(DataMap),
}

/// Error raised when two values cannot be merged because their shapes
/// disagree at some path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A leaf met a container (or the container shapes differ) at `path`.
    #[error("conflicting value shapes at '{path}'")]
    Conflict {
        /// Dot-joined path from the merge root to the conflict
        path: String,
    },
}

impl Value {
    /// Creates a leaf value.
    pub fn leaf(scalar: impl Into<Scalar>) -> Self {
        Value::Leaf(scalar.into())
    }

    /// Creates an empty map value.
    pub fn map() -> Self {
        Value::Map(DataMap::new())
    }

    /// Converts a `serde_json::Value` into a data tree. The conversion is
    /// total: objects become maps, arrays become sequences, everything else
    /// becomes a leaf.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Leaf(Scalar::Null),
            serde_json::Value::Bool(b) => Value::Leaf(Scalar::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Leaf(Scalar::Int(i))
                } else {
                    Value::Leaf(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::Leaf(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts the data tree back into a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Leaf(Scalar::Null) => serde_json::Value::Null,
            Value::Leaf(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Leaf(Scalar::Int(i)) => serde_json::Value::from(*i),
            Value::Leaf(Scalar::Float(x)) => serde_json::Value::from(*x),
            Value::Leaf(Scalar::String(s)) => serde_json::Value::String(s.clone()),
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Returns the string slice if this is a string leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the map if this is a map value.
    pub fn as_map(&self) -> Option<&DataMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the sequence if this is a sequence value.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a direct child by key on a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// True for `Seq([])` and `Map({})`.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::Seq(items) => items.is_empty(),
            Value::Map(fields) => fields.is_empty(),
            Value::Leaf(_) => false,
        }
    }

    /// Merges `other` into `self`, returning the combined value.
    ///
    /// Maps merge key-wise and recursively; a leaf replaces a leaf and a
    /// sequence replaces a sequence (last write wins). Any other pairing is
    /// a shape conflict and fails with [`MergeError::Conflict`] naming the
    /// offending path.
    pub fn merge(self, other: Value) -> Result<Value, MergeError> {
        merge_at(self, other, "")
    }
}

fn merge_at(a: Value, b: Value, path: &str) -> Result<Value, MergeError> {
    match (a, b) {
        (Value::Map(mut base), Value::Map(incoming)) => {
            for (key, value) in incoming {
                let child_path = join_path(path, &key);
                let merged = match base.get(&key) {
                    // `insert` on an existing key keeps its original position.
                    Some(existing) => merge_at(existing.clone(), value, &child_path)?,
                    None => value,
                };
                base.insert(key, merged);
            }
            Ok(Value::Map(base))
        }
        (Value::Leaf(_), replacement @ Value::Leaf(_)) => Ok(replacement),
        (Value::Seq(_), replacement @ Value::Seq(_)) => Ok(replacement),
        _ => Err(MergeError::Conflict {
            path: if path.is_empty() {
                ".".to_string()
            } else {
                path.to_string()
            },
        }),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Leaf(Scalar::Null) => serializer.serialize_unit(),
            Value::Leaf(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Value::Leaf(Scalar::Int(i)) => serializer.serialize_i64(*i),
            Value::Leaf(Scalar::Float(x)) => serializer.serialize_f64(*x),
            Value::Leaf(Scalar::String(s)) => serializer.serialize_str(s),
            Value::Seq(items) => items.serialize(serializer),
            Value::Map(fields) => fields.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(raw))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Leaf(scalar)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Leaf(Scalar::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Leaf(Scalar::from(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Leaf(Scalar::from(b))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Leaf(Scalar::from(i))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<DataMap> for Value {
    fn from(fields: DataMap) -> Self {
        Value::Map(fields)
    }
}
