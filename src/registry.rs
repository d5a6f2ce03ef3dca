//! The shortcode registry.
//!
//! An explicit registry object owned by the engine — there is no global
//! state. The registry maps machine names to shared handlers and is
//! append-only for the lifetime of a process; registering a name again
//! replaces the dispatch entry (last registration wins).

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::shortcode::ShortcodeHandler;

/// Registry of shortcode handlers keyed by machine name.
#[derive(Default)]
pub struct ShortcodeRegistry {
    handlers: HashMap<String, Arc<dyn ShortcodeHandler>>,
}

impl ShortcodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its machine name. A later registration
    /// for the same name replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn ShortcodeHandler>) {
        let name = handler.name().to_string();
        debug!(shortcode = %name, "registering shortcode");
        if self.handlers.insert(name.clone(), handler).is_some() {
            warn!(shortcode = %name, "replaced previously registered shortcode");
        }
    }

    /// Looks up a handler by machine name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ShortcodeHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether a machine name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// All registered machine names.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Number of registered shortcodes.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over the registered handlers.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ShortcodeHandler>> {
        self.handlers.values()
    }
}

impl std::fmt::Debug for ShortcodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcodeRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
