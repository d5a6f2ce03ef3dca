//! The kind registry.
//!
//! A descriptor may carry a `class` tag naming the handler kind to
//! instantiate. Tags resolve against a closed registry of factories built
//! at startup; an unknown tag is a descriptive error raised before any
//! entity is constructed. The built-in tag `"shortcode"` produces the
//! descriptor-driven [`Shortcode`] handler.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::shortcode::{Shortcode, ShortcodeHandler};

/// The kind tag descriptors get when they carry no `class` field.
pub const DEFAULT_KIND: &str = "shortcode";

/// Factory constructing a handler from a parsed descriptor.
pub type KindFactory = Box<dyn Fn(Descriptor) -> Result<Arc<dyn ShortcodeHandler>> + Send + Sync>;

/// Registry mapping kind tags to handler factories.
pub struct KindRegistry {
    factories: HashMap<String, KindFactory>,
}

impl KindRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DEFAULT_KIND, |descriptor| {
            Ok(Arc::new(Shortcode::new(descriptor)))
        });
        registry
    }

    /// Registers a kind factory under a tag. Re-registering a tag replaces
    /// the previous factory.
    pub fn register<F>(&mut self, tag: impl Into<String>, factory: F)
    where
        F: Fn(Descriptor) -> Result<Arc<dyn ShortcodeHandler>> + Send + Sync + 'static,
    {
        self.factories.insert(tag.into(), Box::new(factory));
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// All registered tags.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Builds a handler for the descriptor, resolving its kind tag.
    ///
    /// Fails with [`Error::UnknownKind`] before construction when the tag
    /// is not registered.
    pub fn build(&self, descriptor: Descriptor) -> Result<Arc<dyn ShortcodeHandler>> {
        let tag = descriptor.kind_tag();
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| Error::UnknownKind(tag.to_string()))?;
        factory(descriptor)
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_builds_a_shortcode() {
        let kinds = KindRegistry::with_builtins();
        let descriptor = Descriptor::from_json(r#"{"shortcode": "quote"}"#).unwrap();
        let handler = kinds.build(descriptor).unwrap();
        assert_eq!(handler.name(), "quote");
    }

    #[test]
    fn unknown_tag_fails_before_construction() {
        let kinds = KindRegistry::with_builtins();
        let descriptor =
            Descriptor::from_json(r#"{"shortcode": "quote", "class": "missing"}"#).unwrap();
        match kinds.build(descriptor) {
            Err(Error::UnknownKind(tag)) => assert_eq!(tag, "missing"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected UnknownKind error"),
        }
    }
}
