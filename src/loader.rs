//! Descriptor loading and registration.
//!
//! The loader turns descriptor sources into registered shortcode handlers.
//! A source is a directory (scanned for `*.json` files), a single JSON
//! file, or an inline JSON document. Every descriptor found resolves its
//! kind tag through the [`KindRegistry`] and registers the constructed
//! handler; the first bad descriptor aborts the load with an error naming
//! its origin.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::descriptor::DescriptorDoc;
use crate::error::{Error, Result};
use crate::kind::KindRegistry;
use crate::registry::ShortcodeRegistry;

/// One place descriptors come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A directory scanned (non-recursively) for `*.json` files.
    Dir(PathBuf),
    /// A single descriptor file.
    File(PathBuf),
    /// An inline JSON document.
    Inline(String),
}

/// Registers every descriptor reachable from `sources` into `registry`,
/// returning how many shortcodes were registered.
pub fn register_sources(
    sources: &[Source],
    kinds: &KindRegistry,
    registry: &mut ShortcodeRegistry,
) -> Result<usize> {
    let mut count = 0;
    for source in sources {
        count += match source {
            Source::Dir(dir) => register_dir(dir, kinds, registry)?,
            Source::File(path) => register_file(path, kinds, registry)?,
            Source::Inline(json) => register_document(json, "inline", kinds, registry)?,
        };
    }
    info!(count, "registered shortcodes");
    Ok(count)
}

/// Scans a directory for `*.json` descriptor files. A missing directory is
/// not an error — a site without custom shortcodes simply registers none.
fn register_dir(
    dir: &Path,
    kinds: &KindRegistry,
    registry: &mut ShortcodeRegistry,
) -> Result<usize> {
    let pattern = dir.join("*.json");
    let pattern = pattern.to_string_lossy();
    debug!(%pattern, "scanning descriptor directory");

    let mut count = 0;
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        count += register_file(&path, kinds, registry)?;
    }
    Ok(count)
}

fn register_file(
    path: &Path,
    kinds: &KindRegistry,
    registry: &mut ShortcodeRegistry,
) -> Result<usize> {
    debug!(path = %path.display(), "loading descriptor file");
    let json = fs::read_to_string(path)?;
    register_document(&json, &path.display().to_string(), kinds, registry)
}

fn register_document(
    json: &str,
    origin: &str,
    kinds: &KindRegistry,
    registry: &mut ShortcodeRegistry,
) -> Result<usize> {
    let descriptors =
        DescriptorDoc::parse(json).map_err(|e| Error::descriptor_parse(origin, e.to_string()))?;
    let count = descriptors.len();
    for descriptor in descriptors {
        let handler = kinds.build(descriptor)?;
        registry.register(handler);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_documents_register() {
        let kinds = KindRegistry::with_builtins();
        let mut registry = ShortcodeRegistry::new();
        let source = Source::Inline(r#"[{"shortcode": "a"}, {"shortcode": "b"}]"#.to_string());
        let count = register_sources(&[source], &kinds, &mut registry).unwrap();
        assert_eq!(count, 2);
        assert!(registry.contains("a"));
        assert!(registry.contains("b"));
    }

    #[test]
    fn bad_inline_document_names_its_origin() {
        let kinds = KindRegistry::with_builtins();
        let mut registry = ShortcodeRegistry::new();
        let source = Source::Inline("not json".to_string());
        let err = register_sources(&[source], &kinds, &mut registry).unwrap_err();
        assert!(err.to_string().contains("inline"));
    }

    #[test]
    fn missing_directory_registers_nothing() {
        let kinds = KindRegistry::with_builtins();
        let mut registry = ShortcodeRegistry::new();
        let source = Source::Dir(PathBuf::from("/nonexistent/shortcodes"));
        let count = register_sources(&[source], &kinds, &mut registry).unwrap();
        assert_eq!(count, 0);
    }
}
