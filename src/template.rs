//! Template compilation.
//!
//! Shortcode templates are Jinja2-compatible files (minijinja) resolved by
//! name against a template root. [`TemplateHost::compile`] renders a
//! template with a shortcode's assembled data and returns the output
//! string.
//!
//! When the engine runs without a template host, rendering falls back to
//! emitting the template file verbatim — no data binding. An unreadable
//! fallback file logs a warning and yields nothing; a missing template is
//! deliberately a low-visibility failure in that mode, so one broken
//! widget does not take down a whole document.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::value::DataMap;

/// Jinja2-compatible template environment over a template root.
pub struct TemplateHost {
    env: Environment<'static>,
    root: PathBuf,
}

impl TemplateHost {
    /// Creates a host loading templates from `root` with auto-escaping
    /// off, the default for trusted document markup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_autoescape(root, false)
    }

    /// Creates a host with explicit control over HTML auto-escaping.
    pub fn with_autoescape(root: impl Into<PathBuf>, autoescape: bool) -> Self {
        let root = root.into();
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&root));
        if autoescape {
            env.set_auto_escape_callback(|name| {
                if name.ends_with(".twig")
                    || name.ends_with(".html")
                    || name.ends_with(".htm")
                    || name.ends_with(".xml")
                {
                    AutoEscape::Html
                } else {
                    AutoEscape::None
                }
            });
        } else {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }
        Self { env, root }
    }

    /// The template root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Exposes the underlying environment, e.g. to register filters.
    pub fn env_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Compiles a template by name with the given data.
    pub fn compile(&self, template: &str, data: &DataMap) -> Result<String> {
        debug!(template, "compiling template");
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| Error::template_render(template, e.to_string()))?;
        tmpl.render(data)
            .map_err(|e| Error::template_render(template, e.to_string()))
    }
}

/// The no-engine fallback: emits the template file verbatim with no data
/// binding. Returns `None` (after a warning) when the file is unreadable.
pub fn include_raw(root: &Path, template: &str) -> Option<String> {
    let path = root.join(template);
    match fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "template fallback include failed");
            None
        }
    }
}
