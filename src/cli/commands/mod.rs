//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! Each handler validates its arguments, drives the store, and formats
//! the results through [`crate::ui::output`].

mod completion;
mod run;

pub use completion::completion;
pub use run::{run, run_source};

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Run { script, strict } => run(ctx, script.as_deref(), strict),
        Command::Completion { shell } => completion(shell),
    }
}
