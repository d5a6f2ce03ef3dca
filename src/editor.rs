//! Editor integration.
//!
//! Shortcodes with `show_ui` set expose themselves to a rich-text editor:
//! a button in the toolbar, a small script object describing the shortcode
//! and its default data, and an insertion handler that pastes the
//! shortcode's tag syntax into the document. This module produces all
//! three artifacts host-agnostically; embedders decide where the markup
//! and script actually land.
//!
//! Insertion text is built by flattening the default data into flat
//! attribute keys (see the flatten module), so the author starts from a
//! tag that already names every field the template expects:
//!
//! ```text
//! [quote quotee_name="" quotee_title="" ][/quote]
//! ```

use serde::{Deserialize, Serialize};

use crate::flatten::flatten;
use crate::shortcode::ShortcodeHandler;
use crate::value::Value;

/// The script object describing one insertable shortcode: machine name,
/// display name, and default data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorHandle {
    /// Machine name.
    pub shortcode: String,
    /// Display name shown on the button.
    pub name: String,
    /// Default data; omitted when the descriptor declares none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl EditorHandle {
    /// Builds the handle for a handler. Empty default data is dropped,
    /// matching the emitted script object's shape.
    pub fn for_handler(handler: &dyn ShortcodeHandler) -> Self {
        let descriptor = handler.descriptor();
        let data = descriptor
            .data
            .clone()
            .filter(|value| !value.is_empty_container());
        Self {
            shortcode: descriptor.shortcode.clone(),
            name: handler.display_name().to_string(),
            data,
        }
    }

    /// Toolbar button markup for this shortcode.
    pub fn button_markup(&self) -> String {
        format!(
            "<button type=\"button\" class=\"button\" id=\"{id}_button\" \
             title=\"Add {name}\">Add {name}</button>",
            id = self.shortcode,
            name = self.name,
        )
    }

    /// Inline-script payload declaring this handle to the browser-side
    /// insertion handler.
    pub fn handler_script(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!(
            "<script type=\"text/javascript\">var shortcode = {json}; \
             Shortcaster.Editor.addHandler(shortcode);</script>"
        )
    }

    /// The tag text inserted into the document: default data flattened
    /// into `key="value"` pairs inside an open/close tag pair.
    pub fn insertion_text(&self) -> String {
        let mut atts = String::new();
        if let Some(data) = &self.data {
            for (key, value) in flatten(data) {
                atts.push_str(&format!("{key}=\"{}\" ", flat_display(&value)));
            }
        }
        format!(
            "[{shortcode} {atts}][/{shortcode}]",
            shortcode = self.shortcode
        )
    }
}

/// Display form of a flattened value: scalars print directly; the
/// empty-container markers keep their JSON spelling.
fn flat_display(value: &Value) -> String {
    match value {
        Value::Leaf(scalar) => scalar.to_string(),
        Value::Seq(_) => "[]".to_string(),
        Value::Map(_) => "{}".to_string(),
    }
}
