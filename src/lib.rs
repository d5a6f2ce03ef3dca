//! # Shortcaster - A Data-Driven Shortcode Engine
//!
//! Shortcaster lets site authors define content widgets ("shortcodes") via
//! JSON descriptors and embed them in documents as bracket-delimited tags.
//! At render time each tag's flat attributes are hydrated into a nested
//! data tree and compiled through a Jinja2-compatible template.
//!
//! ## Core Concepts
//!
//! - **Descriptors**: JSON-specified configuration for one shortcode
//!   (machine name, display name, template, default data, UI flag)
//! - **Registry**: explicit mapping from machine name to handler, rebuilt
//!   on every process start — no global state
//! - **Hydration**: rebuilding a nested data tree from flat,
//!   underscore-delimited attribute keys
//! - **Flattening**: the inverse transform, used by the editor integration
//!   to serialize default data back into attribute syntax
//! - **Hooks**: explicit subscription seams for before/after fragments,
//!   template resolution, render observers, and descriptor sources
//! - **Kinds**: a closed factory registry resolving a descriptor's `class`
//!   tag to a handler implementation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Document Text                           │
//! │            [quote author="Ada"]Hello[/quote]                 │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                            │
//! │        (tag scanner; unregistered tags pass through)         │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!          ┌────────────────────┼────────────────────┐
//!          ▼                    ▼                    ▼
//! ┌─────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//! │    Registry     │ │  Render Pipeline │ │  Template Host   │
//! │  (descriptors   │ │  (hydrate, hooks │ │  (Jinja2-compat  │
//! │   via loader)   │ │   and observers) │ │  via minijinja)  │
//! └─────────────────┘ └──────────────────┘ └──────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use shortcaster::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut engine = Engine::new(Config::load(None)?);
//!     let kinds = KindRegistry::with_builtins();
//!     engine.load_shortcodes(&kinds)?;
//!
//!     let html = engine.render_content(
//!         r#"[quote author="Ada"]Computers are useless without programs.[/quote]"#,
//!     )?;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::config::Config;
    pub use crate::descriptor::{Descriptor, DescriptorDoc};
    pub use crate::dispatch::AttrMap;
    pub use crate::editor::EditorHandle;
    pub use crate::engine::Engine;
    pub use crate::error::{Error, Result};
    pub use crate::flatten::{flatten, FlatMap};
    pub use crate::hooks::{Hooks, RenderEvent, RenderObserver};
    pub use crate::hydrate::hydrate_attrs;
    pub use crate::kind::{KindRegistry, DEFAULT_KIND};
    pub use crate::loader::Source;
    pub use crate::registry::ShortcodeRegistry;
    pub use crate::shortcode::{Shortcode, ShortcodeHandler};
    pub use crate::template::TemplateHost;
    pub use crate::value::{DataMap, Scalar, Value};
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases for shortcaster operations.
pub mod error;

/// The tagged-variant data tree shortcode data lives in.
pub mod value;

/// Attribute hydration: flat underscore-delimited keys to nested data.
pub mod hydrate;

/// Data flattening: the editor-side inverse of hydration.
pub mod flatten;

// ============================================================================
// Descriptors and Registration
// ============================================================================

/// Typed shortcode descriptors parsed from JSON documents.
pub mod descriptor;

/// The handler trait and the default JSON-defined shortcode entity.
pub mod shortcode;

/// The closed kind registry resolving descriptor `class` tags.
pub mod kind;

/// The shortcode registry: machine name to handler.
pub mod registry;

/// Descriptor loading from directories, files, and inline documents.
pub mod loader;

// ============================================================================
// Rendering
// ============================================================================

/// The tag dispatcher: scans documents for bracket-delimited shortcodes.
pub mod dispatch;

/// Extension points: fragment filters, render observers, source resolvers.
pub mod hooks;

/// Jinja2-compatible template compilation and the fallback include.
pub mod template;

/// The engine: owns the registry and hooks and drives the render pipeline.
pub mod engine;

// ============================================================================
// Integrations
// ============================================================================

/// Editor integration: insert buttons, script objects, insertion snippets.
pub mod editor;

/// Configuration loading and defaults.
pub mod config;

// ============================================================================
// Version Information
// ============================================================================

/// Returns the current version of shortcaster.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
