//! The shortcode entity.
//!
//! [`ShortcodeHandler`] is the behavior seam: the engine talks to every
//! registered shortcode through it. The default implementation,
//! [`Shortcode`], is entirely descriptor-driven; custom kinds implement the
//! trait themselves (usually to override [`prepare`]) and are constructed
//! through the kind registry.
//!
//! [`prepare`]: ShortcodeHandler::prepare

use crate::descriptor::Descriptor;
use crate::error::Result;
use crate::value::DataMap;

/// Behavior of a registered shortcode.
///
/// Handlers are shared (`Arc<dyn ShortcodeHandler>`) and must not carry
/// per-render mutable state: the engine assembles a fresh data map for
/// every invocation, so nothing leaks between consecutive renders.
pub trait ShortcodeHandler: Send + Sync {
    /// The descriptor this handler was built from.
    fn descriptor(&self) -> &Descriptor;

    /// The machine name the handler is dispatched under.
    fn name(&self) -> &str {
        &self.descriptor().shortcode
    }

    /// The human-facing display name.
    fn display_name(&self) -> &str {
        self.descriptor().display_name()
    }

    /// Hook invoked after attribute hydration and before template
    /// resolution. The default does nothing; custom kinds may reshape the
    /// data here.
    fn prepare(&self, _data: &mut DataMap) -> Result<()> {
        Ok(())
    }
}

/// The default JSON-defined shortcode: all behavior comes from the
/// descriptor and the render pipeline.
#[derive(Debug, Clone)]
pub struct Shortcode {
    descriptor: Descriptor,
}

impl Shortcode {
    /// Wraps a parsed descriptor.
    pub fn new(descriptor: Descriptor) -> Self {
        Self { descriptor }
    }
}

impl ShortcodeHandler for Shortcode {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}
