//! Shortcode descriptors.
//!
//! A descriptor is the JSON-specified configuration for one shortcode:
//!
//! ```json
//! {
//!   "shortcode": "quote",
//!   "name": "Quote",
//!   "show_ui": true,
//!   "template": "quote.twig",
//!   "data": { "quotee": { "name": "", "title": "" } }
//! }
//! ```
//!
//! Descriptors are parsed once into a typed struct and are immutable after
//! construction. Unknown JSON fields are ignored, never absorbed into the
//! entity. A descriptor document may hold either a single descriptor or an
//! array of them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::kind::DEFAULT_KIND;
use crate::value::Value;

/// Parsed configuration for one shortcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    /// The machine name the shortcode registers under.
    pub shortcode: String,

    /// Human-facing display name; falls back to the machine name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the editor integration exposes an insert button for this
    /// shortcode.
    #[serde(default)]
    pub show_ui: bool,

    /// Explicit template identifier; defaults to `<shortcode>.twig`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Kind tag resolved against the kind registry; defaults to the
    /// built-in JSON-defined kind.
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Default data, surfaced through the editor integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Descriptor {
    /// Parses a single descriptor from JSON text and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: Descriptor = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// The display name, falling back to the machine name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.shortcode)
    }

    /// The kind tag, falling back to the default kind.
    pub fn kind_tag(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_KIND)
    }

    /// The template identifier: the explicit `template` field when present,
    /// `<machine_name>.twig` otherwise.
    pub fn template_name(&self) -> String {
        self.template
            .clone()
            .unwrap_or_else(|| format!("{}.twig", self.shortcode))
    }

    /// Validates structural invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.shortcode.is_empty() {
            return Err(Error::DescriptorValidation(
                "the 'shortcode' machine name must not be empty".to_string(),
            ));
        }
        if !self
            .shortcode
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::DescriptorValidation(format!(
                "machine name '{}' may only contain alphanumerics, '_' and '-'",
                self.shortcode
            )));
        }
        if let Some(data) = &self.data {
            if data.as_map().is_none() {
                return Err(Error::DescriptorValidation(format!(
                    "default data for '{}' must be a JSON object",
                    self.shortcode
                )));
            }
        }
        Ok(())
    }
}

/// A descriptor document: either one descriptor or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptorDoc {
    /// A single descriptor object.
    One(Descriptor),
    /// An array of descriptors.
    Many(Vec<Descriptor>),
}

impl DescriptorDoc {
    /// Parses a descriptor document from JSON text, validating every
    /// descriptor in it. Any other JSON shape is a parse error.
    pub fn parse(json: &str) -> Result<Vec<Descriptor>> {
        let doc: DescriptorDoc = serde_json::from_str(json)?;
        let descriptors = doc.into_vec();
        for descriptor in &descriptors {
            descriptor.validate()?;
        }
        Ok(descriptors)
    }

    /// Flattens the document into a list of descriptors.
    pub fn into_vec(self) -> Vec<Descriptor> {
        match self {
            DescriptorDoc::One(descriptor) => vec![descriptor],
            DescriptorDoc::Many(descriptors) => descriptors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_ignored() {
        let descriptor =
            Descriptor::from_json(r#"{"shortcode": "quote", "mystery": "ignored"}"#).unwrap();
        assert_eq!(descriptor.shortcode, "quote");
        assert_eq!(descriptor.display_name(), "quote");
        assert!(!descriptor.show_ui);
    }

    #[test]
    fn missing_machine_name_is_rejected() {
        assert!(Descriptor::from_json(r#"{"name": "Quote"}"#).is_err());
        assert!(Descriptor::from_json(r#"{"shortcode": ""}"#).is_err());
    }

    #[test]
    fn document_accepts_single_or_array() {
        let one = DescriptorDoc::parse(r#"{"shortcode": "a"}"#).unwrap();
        assert_eq!(one.len(), 1);
        let many = DescriptorDoc::parse(r#"[{"shortcode": "a"}, {"shortcode": "b"}]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert!(DescriptorDoc::parse(r#""just a string""#).is_err());
    }

    #[test]
    fn template_defaults_to_machine_name() {
        let descriptor = Descriptor::from_json(r#"{"shortcode": "quote"}"#).unwrap();
        assert_eq!(descriptor.template_name(), "quote.twig");

        let explicit =
            Descriptor::from_json(r#"{"shortcode": "quote", "template": "pull.twig"}"#).unwrap();
        assert_eq!(explicit.template_name(), "pull.twig");
    }
}
