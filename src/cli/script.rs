//! cli::script
//!
//! Line-oriented scripts of store commands.
//!
//! # Syntax
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! add <name> <value>          # value parsed as JSON, else taken as text
//! remove <name>
//! commit <message...>
//! checkout <commit-id | ~N>   # ~N: the N-th entry of the current history
//! head
//! log
//! get <name>
//! branch create <name>
//! branch checkout <name>
//! branch remove <name>
//! branch list                 # also: branches
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::core::command::Command;
use crate::core::store::Store;

/// Errors from parsing a script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' needs {argument}")]
    MissingArgument {
        line: usize,
        command: String,
        argument: &'static str,
    },

    #[error("line {line}: unexpected argument '{argument}' for '{command}'")]
    UnexpectedArgument {
        line: usize,
        command: String,
        argument: String,
    },
}

/// A parsed script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Run as-is.
    Run(Command<Value>),
    /// Roll back to the N-th entry of the history current at run time.
    CheckoutBack(usize),
}

impl Step {
    /// Turn into a store command, resolving history references.
    ///
    /// A reference past the end of history resolves to `~N` itself, which
    /// the store then reports as a missing commit.
    pub fn resolve(self, store: &Store<Value>) -> Command<Value> {
        match self {
            Step::Run(command) => command,
            Step::CheckoutBack(n) => match store.history().get(n) {
                Some(entry) => Command::checkout(entry.id().as_str()),
                None => Command::checkout(format!("~{n}")),
            },
        }
    }
}

/// A step and the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    /// 1-based line number
    pub line: usize,
    pub step: Step,
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let line = index + 1;
        steps.push(ScriptLine {
            line,
            step: parse_line(line, text)?,
        });
    }
    Ok(steps)
}

fn parse_line(line: usize, text: &str) -> Result<Step, ScriptError> {
    let (word, rest) = split_word(text);
    let step = match word {
        "add" => {
            let (name, value) = split_word(rest);
            if name.is_empty() {
                return Err(missing(line, word, "a name"));
            }
            if value.is_empty() {
                return Err(missing(line, word, "a value"));
            }
            Command::add(name, parse_value(value))
        }
        "remove" => Command::remove(single(line, word, rest, "a name")?),
        "commit" => {
            if rest.is_empty() {
                return Err(missing(line, word, "a message"));
            }
            Command::commit(rest)
        }
        "checkout" => {
            let target = single(line, word, rest, "a commit id")?;
            if let Some(n) = target.strip_prefix('~').and_then(|n| n.parse().ok()) {
                return Ok(Step::CheckoutBack(n));
            }
            Command::checkout(target)
        }
        "head" => no_args(line, word, rest, Command::Head)?,
        "log" => no_args(line, word, rest, Command::Log)?,
        "branches" => no_args(line, word, rest, Command::ListBranches)?,
        "get" => Command::get(single(line, word, rest, "a name")?),
        "branch" => parse_branch(line, rest)?,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };
    Ok(Step::Run(step))
}

fn parse_branch(line: usize, rest: &str) -> Result<Command<Value>, ScriptError> {
    let (action, rest) = split_word(rest);
    let command = format!("branch {action}");
    match action {
        "" => Err(missing(line, "branch", "an action")),
        "list" => no_args(line, &command, rest, Command::ListBranches),
        "create" => Ok(Command::create_branch(single(line, &command, rest, "a branch name")?)),
        "checkout" => Ok(Command::checkout_branch(single(
            line,
            &command,
            rest,
            "a branch name",
        )?)),
        "remove" => Ok(Command::remove_branch(single(line, &command, rest, "a branch name")?)),
        _ => Err(ScriptError::UnknownCommand { line, command }),
    }
}

/// JSON if it parses, otherwise the text itself.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn single<'a>(
    line: usize,
    command: &str,
    rest: &'a str,
    argument: &'static str,
) -> Result<&'a str, ScriptError> {
    let (arg, extra) = split_word(rest);
    if arg.is_empty() {
        return Err(missing(line, command, argument));
    }
    if !extra.is_empty() {
        return Err(ScriptError::UnexpectedArgument {
            line,
            command: command.to_string(),
            argument: extra.to_string(),
        });
    }
    Ok(arg)
}

fn no_args(
    line: usize,
    command: &str,
    rest: &str,
    parsed: Command<Value>,
) -> Result<Command<Value>, ScriptError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ScriptError::UnexpectedArgument {
            line,
            command: command.to_string(),
            argument: rest.to_string(),
        })
    }
}

fn missing(line: usize, command: &str, argument: &'static str) -> ScriptError {
    ScriptError::MissingArgument {
        line,
        command: command.to_string(),
        argument,
    }
}
