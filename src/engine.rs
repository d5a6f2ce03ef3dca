//! The shortcode engine.
//!
//! [`Engine`] owns the registry, the extension-point subscriptions, and
//! the template host, and drives the render pipeline for each dispatched
//! tag:
//!
//! 1. fold the "before" fragment chain;
//! 2. hydrate the tag's flat attributes into a fresh data tree;
//! 3. run the handler's `prepare` hook;
//! 4. expand nested shortcode syntax in the enclosed content and store it
//!    under `data.content`;
//! 5. notify render observers (global, then machine-name-scoped);
//! 6. fold the "after" fragment chain;
//! 7. resolve the template identifier through the template chain and
//!    compile it — or fall back to the verbatim file include when the
//!    template engine is disabled;
//! 8. return `before + output + after`.
//!
//! Every invocation starts from an empty data map, so nothing leaks
//! between consecutive renders of the same shortcode.

use tracing::debug;

use crate::config::Config;
use crate::dispatch::{self, AttrMap};
use crate::editor::EditorHandle;
use crate::error::{Error, Result};
use crate::hooks::{Hooks, RenderEvent};
use crate::hydrate::hydrate_attrs;
use crate::kind::KindRegistry;
use crate::loader::{self, Source};
use crate::registry::ShortcodeRegistry;
use crate::shortcode::ShortcodeHandler;
use crate::template::{self, TemplateHost};
use crate::value::Value;

/// The shortcode engine: registry + hooks + template host + config.
pub struct Engine {
    config: Config,
    registry: ShortcodeRegistry,
    hooks: Hooks,
    templates: Option<TemplateHost>,
}

impl Engine {
    /// Creates an engine from configuration. The template host is built
    /// from `paths.templates` unless `render.template_engine` is off, in
    /// which case rendering uses the verbatim fallback include.
    pub fn new(config: Config) -> Self {
        let templates = config.render.template_engine.then(|| {
            TemplateHost::with_autoescape(&config.paths.templates, config.render.autoescape)
        });
        Self {
            config,
            registry: ShortcodeRegistry::new(),
            hooks: Hooks::new(),
            templates,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shortcode registry.
    pub fn registry(&self) -> &ShortcodeRegistry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. for programmatic registration.
    pub fn registry_mut(&mut self) -> &mut ShortcodeRegistry {
        &mut self.registry
    }

    /// The extension-point subscriptions.
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Mutable access to the subscriptions; subscribe before rendering.
    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// The template host, when the template engine is enabled.
    pub fn templates_mut(&mut self) -> Option<&mut TemplateHost> {
        self.templates.as_mut()
    }

    /// Loads and registers every descriptor reachable from the configured
    /// shortcode directory, after running the source list through the
    /// subscribed source resolvers. Returns the number registered.
    pub fn load_shortcodes(&mut self, kinds: &KindRegistry) -> Result<usize> {
        let defaults = vec![Source::Dir(self.config.paths.shortcodes.clone())];
        let sources = self.hooks.resolve_sources(defaults);
        loader::register_sources(&sources, kinds, &mut self.registry)
    }

    /// Expands every registered shortcode tag in a document.
    pub fn render_content(&self, input: &str) -> Result<String> {
        dispatch::expand_with(
            input,
            |name| self.registry.contains(name),
            &mut |name, attrs, content| {
                let handler = self
                    .registry
                    .get(name)
                    .ok_or_else(|| Error::ShortcodeNotFound(name.to_string()))?;
                self.render_shortcode(handler.as_ref(), attrs, content)
            },
        )
    }

    /// Renders one shortcode by machine name.
    pub fn render_by_name(&self, name: &str, attrs: &AttrMap, content: &str) -> Result<String> {
        let handler = self
            .registry
            .get(name)
            .ok_or_else(|| Error::ShortcodeNotFound(name.to_string()))?;
        self.render_shortcode(handler.as_ref(), attrs, content)
    }

    /// Runs the render pipeline for one handler invocation.
    pub fn render_shortcode(
        &self,
        handler: &dyn ShortcodeHandler,
        attrs: &AttrMap,
        content: &str,
    ) -> Result<String> {
        let name = handler.name();
        debug!(shortcode = name, "rendering shortcode");

        let before = self.hooks.apply_before(name);

        let mut data = hydrate_attrs(attrs)?;
        handler.prepare(&mut data)?;

        let rendered_content = self.render_content(content)?;
        data.insert("content".to_string(), Value::from(rendered_content));

        self.hooks.notify(&RenderEvent {
            shortcode: name,
            display_name: handler.display_name(),
            data: &data,
        });

        let after = self.hooks.apply_after(name);

        let template = self
            .hooks
            .apply_template(handler.descriptor().template_name(), name);
        let output = match &self.templates {
            Some(host) => host.compile(&template, &data)?,
            None => template::include_raw(&self.config.paths.templates, &template)
                .unwrap_or_default(),
        };

        Ok(format!("{before}{output}{after}"))
    }

    /// Editor handles for every registered shortcode with `show_ui` set,
    /// sorted by machine name.
    pub fn editor_handles(&self) -> Vec<EditorHandle> {
        let mut handles: Vec<EditorHandle> = self
            .registry
            .iter()
            .filter(|handler| handler.descriptor().show_ui)
            .map(|handler| EditorHandle::for_handler(handler.as_ref()))
            .collect();
        handles.sort_by(|a, b| a.shortcode.cmp(&b.shortcode));
        handles
    }
}
