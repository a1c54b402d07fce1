//! run command - Execute a script against a fresh store

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use crate::cli::script;
use crate::cli::Context;
use crate::core::command::{Command, Payload};
use crate::core::outcome::Outcome;
use crate::core::store::Store;
use crate::ui::output;

/// Counts from one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Run a script file (or stdin) against a fresh store.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `script` - Script path; `None` or `-` reads stdin
/// * `strict` - Stop at the first failed command
pub fn run(ctx: &Context, script: Option<&Path>, strict: bool) -> Result<()> {
    let source = read_script(script)?;
    let summary = run_source(ctx, &source, strict)?;
    if summary.failed > 0 {
        bail!(
            "{} of {} command(s) failed",
            summary.failed,
            summary.executed
        );
    }
    Ok(())
}

/// Parse and run script text, printing each outcome.
pub fn run_source(ctx: &Context, source: &str, strict: bool) -> Result<RunSummary> {
    let steps = script::parse(source).context("Invalid script")?;
    let mut store: Store<Value> = Store::with_config(&ctx.config.store);
    let mut summary = RunSummary::default();

    for line in steps {
        let command = line.step.resolve(&store);
        let shape = Shape::of(&command);
        let mutating = command.is_mutating();
        output::debug(format!("line {}: {:?}", line.line, command), ctx.verbosity);
        let outcome = store.execute(command);
        summary.executed += 1;

        report(ctx, &store, &outcome, shape)?;
        if mutating {
            output::debug(state_line(&store), ctx.verbosity);
        }

        if outcome.is_failure() {
            summary.failed += 1;
            tracing::debug!(line = line.line, "command failed");
            if strict {
                break;
            }
        }
    }

    Ok(summary)
}

/// How a successful outcome is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `[branch id]` tag, then the message
    Commit,
    /// Message, then the value on its own line
    Value,
    /// Message only
    Plain,
}

impl Shape {
    fn of(command: &Command<Value>) -> Self {
        match command {
            Command::Commit { .. } => Shape::Commit,
            Command::Get { .. } => Shape::Value,
            _ => Shape::Plain,
        }
    }
}

/// One-line summary of the current branch after a mutating command.
fn state_line(store: &Store<Value>) -> String {
    format!(
        "on {}: {} item(s), {} staged, {} commit(s)",
        store.current_branch_name(),
        store.items().len(),
        store.staged().len(),
        store.history().len()
    )
}

fn read_script(script: Option<&Path>) -> Result<String> {
    match script {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script '{}'", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn report(
    ctx: &Context,
    store: &Store<Value>,
    outcome: &Outcome<Payload<Value>>,
    shape: Shape,
) -> Result<()> {
    if ctx.json {
        return output::json(outcome).context("Failed to encode outcome");
    }

    match outcome {
        Outcome::Failure(err) => output::error(err),
        Outcome::Success { message, payload } => match payload {
            Some(Payload::Entry(entry)) if shape == Shape::Commit => {
                let tag = output::commit_tag(
                    store.current_branch_name(),
                    entry.id(),
                    ctx.config.store.abbrev(),
                );
                output::print(format!("{tag} {message}"), ctx.verbosity);
            }
            Some(Payload::Value(value)) if shape == Shape::Value => {
                output::print(message, ctx.verbosity);
                output::print(value, ctx.verbosity);
            }
            _ => output::print(message, ctx.verbosity),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::ui::output::Verbosity;

    fn ctx() -> Context {
        Context {
            verbosity: Verbosity::Quiet,
            json: false,
            config: Config::default(),
        }
    }

    #[test]
    fn counts_failures() {
        let summary = run_source(
            &ctx(),
            "add a 1\ncommit m1\ncommit m2\nget missing\nget a\n",
            false,
        )
        .unwrap();
        assert_eq!(
            summary,
            RunSummary {
                executed: 5,
                failed: 2
            }
        );
    }

    #[test]
    fn strict_stops_at_first_failure() {
        let summary = run_source(&ctx(), "commit nothing\nadd a 1\ncommit m1\n", true).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                executed: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn relative_checkout_resolves() {
        let summary = run_source(
            &ctx(),
            "add a 1\ncommit m1\nadd a 2\ncommit m2\ncheckout ~1\n",
            true,
        )
        .unwrap();
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn parse_error_is_reported() {
        let err = run_source(&ctx(), "add a 1\nfrobnicate\n", false).unwrap_err();
        assert!(format!("{err:#}").contains("line 2: unknown command 'frobnicate'"));
    }

    #[test]
    fn state_line_tracks_current_branch() {
        let mut store: Store<Value> = Store::new();
        store.add("a", Value::from(1));
        assert_eq!(
            state_line(&store),
            "on master: 0 item(s), 1 staged, 0 commit(s)"
        );
        store.commit("m1");
        store.create_branch("dev");
        store.checkout_branch("dev");
        assert_eq!(state_line(&store), "on dev: 1 item(s), 0 staged, 1 commit(s)");
    }

    #[test]
    fn json_mode_succeeds() {
        let ctx = Context {
            json: true,
            ..ctx()
        };
        let summary = run_source(&ctx, "add a {\"x\": 1}\ncommit m1\nlog\n", false).unwrap();
        assert_eq!(summary.failed, 0);
    }
}
