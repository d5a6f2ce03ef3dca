//! Command-line interface definitions and command execution.

use std::io::Read;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use shortcaster::config::Config;
use shortcaster::engine::Engine;
use shortcaster::error::{Error, Result};
use shortcaster::kind::KindRegistry;

/// A data-driven shortcode engine: define content widgets via JSON
/// descriptors and render them through Jinja2-compatible templates.
#[derive(Debug, Parser)]
#[command(name = "shortcaster", version, about, long_about = None)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a shortcaster.toml configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the shortcode descriptor directory
    #[arg(long, global = true, value_name = "DIR")]
    pub shortcodes_dir: Option<PathBuf>,

    /// Override the template root directory
    #[arg(long, global = true, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a document, expanding every registered shortcode tag
    Render {
        /// Input file ("-" reads standard input)
        file: PathBuf,
    },

    /// List registered shortcodes
    List,

    /// Load every descriptor source and report what registers
    Validate,

    /// Print the editor insertion snippet for one shortcode
    Snippet {
        /// Machine name of the shortcode
        shortcode: String,
    },
}

impl Cli {
    /// Folds directory override flags into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.shortcodes_dir {
            config.paths.shortcodes = dir.clone();
        }
        if let Some(dir) = &self.templates_dir {
            config.paths.templates = dir.clone();
        }
    }
}

/// Builds an engine and loads every configured descriptor source.
fn build_engine(config: Config) -> Result<Engine> {
    let mut engine = Engine::new(config);
    let kinds = KindRegistry::with_builtins();
    let count = engine.load_shortcodes(&kinds)?;
    info!(count, "engine ready");
    Ok(engine)
}

/// Executes the selected command, returning a process exit code.
pub fn run(cli: &Cli, config: Config) -> Result<i32> {
    match &cli.command {
        Commands::Render { file } => render(config, file),
        Commands::List => list(config),
        Commands::Validate => validate(config),
        Commands::Snippet { shortcode } => snippet(config, shortcode),
    }
}

fn read_input(file: &PathBuf) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

fn render(config: Config, file: &PathBuf) -> Result<i32> {
    let engine = build_engine(config)?;
    let input = read_input(file)?;
    let output = engine.render_content(&input)?;
    print!("{output}");
    Ok(0)
}

fn list(config: Config) -> Result<i32> {
    let engine = build_engine(config)?;
    let mut names: Vec<&str> = engine.registry().names();
    names.sort_unstable();
    for name in names {
        let handler = engine
            .registry()
            .get(name)
            .ok_or_else(|| Error::ShortcodeNotFound(name.to_string()))?;
        let descriptor = handler.descriptor();
        let ui = if descriptor.show_ui { " [ui]" } else { "" };
        println!(
            "{}  {} ({}){}",
            name.bold(),
            handler.display_name(),
            descriptor.template_name().dimmed(),
            ui.cyan(),
        );
    }
    Ok(0)
}

fn validate(config: Config) -> Result<i32> {
    let engine = build_engine(config)?;
    let count = engine.registry().len();
    println!(
        "{} {} shortcode(s) registered",
        "ok:".green().bold(),
        count
    );
    Ok(0)
}

fn snippet(config: Config, shortcode: &str) -> Result<i32> {
    let engine = build_engine(config)?;
    let handler = engine
        .registry()
        .get(shortcode)
        .ok_or_else(|| Error::ShortcodeNotFound(shortcode.to_string()))?;
    let handle = shortcaster::editor::EditorHandle::for_handler(handler.as_ref());
    println!("{}", handle.insertion_text());
    Ok(0)
}
