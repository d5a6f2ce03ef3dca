//! Configuration for the shortcode engine.
//!
//! Configuration merges from three layers, later layers winning:
//! built-in defaults, an optional TOML file (`shortcaster.toml` in the
//! working directory, or an explicit path), and `SHORTCASTER_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filesystem layout.
    pub paths: Paths,

    /// Rendering behavior.
    pub render: RenderConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Filesystem layout: where descriptors and templates live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Directory scanned for `*.json` shortcode descriptors.
    pub shortcodes: PathBuf,

    /// Template root directory.
    pub templates: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            shortcodes: PathBuf::from("shortcodes"),
            templates: PathBuf::from("templates"),
        }
    }
}

/// Rendering behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render templates through the Jinja2-compatible engine. When false,
    /// template files are emitted verbatim (the fallback include).
    pub template_engine: bool,

    /// HTML-escape template output for `.twig`/`.html` templates.
    /// Off by default: shortcode content is trusted document markup, and
    /// escaping it would mangle nested shortcode output.
    pub autoescape: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_engine: true,
            autoescape: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset and no verbosity
    /// flags are given.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist; without one, `shortcaster.toml` in
    /// the working directory is used when present, defaults otherwise.
    /// Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigFileNotFound(path.to_path_buf()));
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = Path::new("shortcaster.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Applies `SHORTCASTER_*` environment overrides.
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("SHORTCASTER_SHORTCODES_DIR") {
            self.paths.shortcodes = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("SHORTCASTER_TEMPLATES_DIR") {
            self.paths.templates = PathBuf::from(dir);
        }
        if let Ok(level) = std::env::var("SHORTCASTER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}
