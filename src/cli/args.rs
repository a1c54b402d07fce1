//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// bst - drive an in-memory, branch-aware object store from scripts
#[derive(Parser, Debug)]
#[command(name = "bst")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print each outcome as a JSON object
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a script of store commands against a fresh store
    #[command(
        name = "run",
        long_about = "Run a script of store commands against a fresh store.\n\n\
            The store lives only for the duration of the run. Each command's \
            outcome is printed as it executes; failed commands are reported on \
            stderr and make the run exit non-zero.",
        after_help = "\
SCRIPT SYNTAX:
    add <name> <value>          stage a value (JSON, or plain text)
    remove <name>               stage removal of a committed value
    commit <message...>         commit staged changes
    checkout <id | ~N>          roll back to a commit (~N: N-th newest)
    head | log | get <name>     inspect the current branch
    branch create|checkout|remove <name>
    branch list                 list branches, current marked with *

EXAMPLES:
    # Run a script file
    bst run setup.bst

    # Read the script from stdin, one JSON outcome per line
    printf 'add a 1\\ncommit m1\\nget a\\n' | bst run --json"
    )]
    Run {
        /// Script file; reads stdin when omitted or `-`
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Stop at the first failed command
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
