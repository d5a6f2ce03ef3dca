//! Shortcaster - a data-driven shortcode engine
//!
//! This is the main entry point for the shortcaster CLI.

mod cli;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use shortcaster::config::Config;

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(e.exit_code());
        }
    };
    cli.apply_overrides(&mut config);

    init_logging(cli.verbose, &config.logging.level);

    match cli::run(&cli, config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(e.exit_code());
        }
    }
}

/// Initialize logging from verbosity flags, deferring to `RUST_LOG` when
/// it is set.
fn init_logging(verbosity: u8, default_level: &str) {
    let level = match verbosity {
        0 => default_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
