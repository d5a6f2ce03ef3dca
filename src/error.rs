//! Error types for shortcaster.
//!
//! This module defines the error types used throughout shortcaster, providing
//! rich error information for debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shortcaster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for shortcaster.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Descriptor Errors
    // ========================================================================
    /// Error parsing a descriptor document.
    #[error("Failed to parse shortcode descriptor from '{origin}': {message}")]
    DescriptorParse {
        /// Where the document came from (file path or "inline")
        origin: String,
        /// Error message
        message: String,
    },

    /// Error validating a parsed descriptor.
    #[error("Invalid shortcode descriptor: {0}")]
    DescriptorValidation(String),

    /// Descriptor names a kind that is not registered.
    #[error("Unknown shortcode kind '{0}' (not present in the kind registry)")]
    UnknownKind(String),

    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// Shortcode not found in the registry.
    #[error("Shortcode '{0}' is not registered")]
    ShortcodeNotFound(String),

    // ========================================================================
    // Hydration Errors
    // ========================================================================
    /// A nested attribute path collides with an already-hydrated value.
    #[error("Attribute '{key}' conflicts with an existing value at '{path}'")]
    HydrationConflict {
        /// The flat attribute key that triggered the conflict
        key: String,
        /// The nested path where the shapes disagree
        path: String,
    },

    // ========================================================================
    // Template Errors
    // ========================================================================
    /// Template rendering error.
    #[error("Template rendering failed for '{template}': {message}")]
    TemplateRender {
        /// Template name
        template: String,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    // ========================================================================
    // IO and Serialization Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Invalid glob pattern while scanning a descriptor directory.
    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    // ========================================================================
    // Other Errors
    // ========================================================================
    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new descriptor parse error.
    pub fn descriptor_parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DescriptorParse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Creates a new template render error.
    pub fn template_render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateRender {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TemplateRender { .. } => 2,
            Error::Io(_) | Error::GlobPattern(_) => 3,
            Error::DescriptorParse { .. }
            | Error::DescriptorValidation(_)
            | Error::JsonParse(_) => 4,
            Error::UnknownKind(_) | Error::ShortcodeNotFound(_) => 5,
            Error::Config(_) | Error::ConfigFileNotFound(_) | Error::TomlParse(_) => 6,
            _ => 1,
        }
    }
}
