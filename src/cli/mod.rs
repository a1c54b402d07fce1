//! cli
//!
//! Command-line interface layer for branchstore.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and set up logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses scripts into [`crate::core::command`]
//! values and hands them to the store; all state changes happen there.

pub mod args;
pub mod commands;
pub mod script;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::telemetry;
use crate::ui::output::Verbosity;

/// Settings shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    pub verbosity: Verbosity,
    pub json: bool,
    pub config: Config,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    telemetry::init(cli.debug);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }

    let ctx = Context {
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
