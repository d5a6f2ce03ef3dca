//! Extension points.
//!
//! The engine exposes its pipeline seams as explicit subscription
//! interfaces instead of host-global filter names:
//!
//! - **before / after fragments**: filter chains producing the strings
//!   wrapped around every rendered shortcode. Each filter receives the
//!   accumulated value and the machine name, so one filter can serve many
//!   shortcodes or key off a single one.
//! - **template resolution**: the same chain shape, seeded with the
//!   resolved template identifier.
//! - **render observers**: notified after data assembly, either for every
//!   shortcode or scoped to one machine name.
//! - **source resolution**: lets embedders append to or replace the list of
//!   descriptor sources before the loader runs.

use std::collections::HashMap;

use crate::loader::Source;
use crate::value::DataMap;

/// Snapshot handed to render observers after data assembly.
#[derive(Debug)]
pub struct RenderEvent<'a> {
    /// Machine name of the shortcode being rendered.
    pub shortcode: &'a str,
    /// Human-facing display name.
    pub display_name: &'a str,
    /// The fully assembled render data, content included.
    pub data: &'a DataMap,
}

/// Observer notified after a shortcode's render data is assembled.
pub trait RenderObserver: Send + Sync {
    /// Called once per render invocation.
    fn rendered(&self, event: &RenderEvent<'_>);
}

/// A chained string filter: receives the accumulated value and the
/// machine name, returns the new value.
pub type FragmentFilter = Box<dyn Fn(String, &str) -> String + Send + Sync>;

/// Transforms the descriptor source list before loading.
pub type SourceResolver = Box<dyn Fn(Vec<Source>) -> Vec<Source> + Send + Sync>;

/// Subscription registry for all engine extension points.
#[derive(Default)]
pub struct Hooks {
    before: Vec<FragmentFilter>,
    after: Vec<FragmentFilter>,
    template: Vec<FragmentFilter>,
    observers: Vec<Box<dyn RenderObserver>>,
    scoped_observers: HashMap<String, Vec<Box<dyn RenderObserver>>>,
    source_resolvers: Vec<SourceResolver>,
}

impl Hooks {
    /// Creates an empty subscription registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a filter to the "before" fragment chain.
    pub fn on_before<F>(&mut self, filter: F)
    where
        F: Fn(String, &str) -> String + Send + Sync + 'static,
    {
        self.before.push(Box::new(filter));
    }

    /// Subscribes a filter to the "after" fragment chain.
    pub fn on_after<F>(&mut self, filter: F)
    where
        F: Fn(String, &str) -> String + Send + Sync + 'static,
    {
        self.after.push(Box::new(filter));
    }

    /// Subscribes a filter to template resolution.
    pub fn on_template<F>(&mut self, filter: F)
    where
        F: Fn(String, &str) -> String + Send + Sync + 'static,
    {
        self.template.push(Box::new(filter));
    }

    /// Subscribes an observer to every shortcode render.
    pub fn observe<O: RenderObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Subscribes an observer to renders of one machine name.
    pub fn observe_shortcode<O: RenderObserver + 'static>(
        &mut self,
        shortcode: impl Into<String>,
        observer: O,
    ) {
        self.scoped_observers
            .entry(shortcode.into())
            .or_default()
            .push(Box::new(observer));
    }

    /// Subscribes a source resolver consulted by the loader.
    pub fn resolve_sources_with<F>(&mut self, resolver: F)
    where
        F: Fn(Vec<Source>) -> Vec<Source> + Send + Sync + 'static,
    {
        self.source_resolvers.push(Box::new(resolver));
    }

    /// Folds the "before" chain for a machine name; the seed is empty.
    pub fn apply_before(&self, shortcode: &str) -> String {
        self.before
            .iter()
            .fold(String::new(), |acc, f| f(acc, shortcode))
    }

    /// Folds the "after" chain for a machine name; the seed is empty.
    pub fn apply_after(&self, shortcode: &str) -> String {
        self.after
            .iter()
            .fold(String::new(), |acc, f| f(acc, shortcode))
    }

    /// Folds the template chain, seeded with the resolved identifier.
    pub fn apply_template(&self, template: String, shortcode: &str) -> String {
        self.template
            .iter()
            .fold(template, |acc, f| f(acc, shortcode))
    }

    /// Notifies global observers, then observers scoped to the event's
    /// machine name.
    pub fn notify(&self, event: &RenderEvent<'_>) {
        for observer in &self.observers {
            observer.rendered(event);
        }
        if let Some(scoped) = self.scoped_observers.get(event.shortcode) {
            for observer in scoped {
                observer.rendered(event);
            }
        }
    }

    /// Runs the source list through every registered resolver, in
    /// subscription order.
    pub fn resolve_sources(&self, sources: Vec<Source>) -> Vec<Source> {
        self.source_resolvers
            .iter()
            .fold(sources, |acc, resolver| resolver(acc))
    }
}
