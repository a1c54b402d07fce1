//! core::command
//!
//! Store operations as data.
//!
//! A [`Command`] names one public store operation together with its
//! arguments. Commands drive construction ([`StoreBuilder`] runs a list of
//! them against a fresh store, in order) and scripting (the CLI parses a
//! script into commands and hands each to [`Store::execute`]).
//!
//! # Example
//!
//! ```
//! use branchstore::core::command::Command;
//! use branchstore::core::store::Store;
//!
//! let store = Store::builder()
//!     .command(Command::add("a", 1))
//!     .command(Command::commit("m1"))
//!     .command(Command::create_branch("dev"))
//!     .build();
//!
//! assert_eq!(store.get("a").into_payload(), Some(1));
//! assert_eq!(store.branch_names(), vec!["master", "dev"]);
//! ```

use serde::{Deserialize, Serialize};

use super::branch::Branch;
use super::config::StoreConfig;
use super::history::HistoryEntry;
use super::outcome::Outcome;
use super::store::{Store, DEFAULT_BRANCH};

/// One store operation and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command<T> {
    Add { name: String, value: T },
    Remove { name: String },
    Commit { message: String },
    /// Roll back to a commit by id.
    Checkout { commit: String },
    Head,
    Log,
    Get { name: String },
    CreateBranch { name: String },
    CheckoutBranch { name: String },
    RemoveBranch { name: String },
    ListBranches,
}

impl<T> Command<T> {
    pub fn add(name: impl Into<String>, value: T) -> Self {
        Command::Add {
            name: name.into(),
            value,
        }
    }

    pub fn remove(name: impl Into<String>) -> Self {
        Command::Remove { name: name.into() }
    }

    pub fn commit(message: impl Into<String>) -> Self {
        Command::Commit {
            message: message.into(),
        }
    }

    pub fn checkout(commit: impl Into<String>) -> Self {
        Command::Checkout {
            commit: commit.into(),
        }
    }

    pub fn get(name: impl Into<String>) -> Self {
        Command::Get { name: name.into() }
    }

    pub fn create_branch(name: impl Into<String>) -> Self {
        Command::CreateBranch { name: name.into() }
    }

    pub fn checkout_branch(name: impl Into<String>) -> Self {
        Command::CheckoutBranch { name: name.into() }
    }

    pub fn remove_branch(name: impl Into<String>) -> Self {
        Command::RemoveBranch { name: name.into() }
    }

    /// Whether running this command can change the store.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Head | Command::Log | Command::Get { .. } | Command::ListBranches
        )
    }
}

/// Whatever a command hands back on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Value(T),
    Entry(HistoryEntry<T>),
    History(Vec<HistoryEntry<T>>),
    Branch(Branch<T>),
    Names(Vec<String>),
}

impl<T: Clone> Store<T> {
    /// Run one command against the store.
    pub fn execute(&mut self, command: Command<T>) -> Outcome<Payload<T>> {
        match command {
            Command::Add { name, value } => self.add(&name, value).map(Payload::Value),
            Command::Remove { name } => self.remove(&name).map(Payload::Value),
            Command::Commit { message } => self.commit(&message).map(Payload::Entry),
            Command::Checkout { commit } => self.checkout(&commit).map(Payload::Entry),
            Command::Head => self.head().map(Payload::Entry),
            Command::Log => self.log().map(Payload::History),
            Command::Get { name } => self.get(&name).map(Payload::Value),
            Command::CreateBranch { name } => self.create_branch(&name).map(Payload::Branch),
            Command::CheckoutBranch { name } => self.checkout_branch(&name).map(Payload::Branch),
            Command::RemoveBranch { name } => match self.remove_branch(&name) {
                Outcome::Success { message, .. } => Outcome::done(message),
                Outcome::Failure(err) => Outcome::Failure(err),
            },
            Command::ListBranches => self.list_branches().map(Payload::Names),
        }
    }
}

/// Builds a store and runs initialization commands against it.
///
/// Commands run in the order they were added, at [`StoreBuilder::build`]
/// time. A failing command does not stop the ones after it.
#[derive(Debug, Clone)]
pub struct StoreBuilder<T> {
    default_branch: String,
    commands: Vec<Command<T>>,
}

impl<T: Clone> Default for StoreBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> StoreBuilder<T> {
    pub fn new() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            commands: Vec::new(),
        }
    }

    /// Name the branch the store starts on.
    pub fn default_branch(mut self, name: impl Into<String>) -> Self {
        self.default_branch = name.into();
        self
    }

    /// Take store settings from a loaded config.
    pub fn config(self, config: &StoreConfig) -> Self {
        self.default_branch(config.default_branch())
    }

    /// Queue one initialization command.
    pub fn command(mut self, command: Command<T>) -> Self {
        self.commands.push(command);
        self
    }

    /// Queue several initialization commands.
    pub fn commands(mut self, commands: impl IntoIterator<Item = Command<T>>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Create the store and run every queued command.
    pub fn build(self) -> Store<T> {
        self.build_with_report().0
    }

    /// Like [`StoreBuilder::build`], also returning each command's outcome.
    pub fn build_with_report(self) -> (Store<T>, Vec<Outcome<Payload<T>>>) {
        let mut store = Store::with_default_branch(self.default_branch);
        let mut report = Vec::with_capacity(self.commands.len());
        for (step, command) in self.commands.into_iter().enumerate() {
            let outcome = store.execute(command);
            if let Some(err) = outcome.error() {
                store.note_failure(step, err);
            }
            report.push(outcome);
        }
        (store, report)
    }
}

impl<T: Clone> Store<T> {
    /// A fresh store with `commands` already run against it.
    pub fn init(commands: impl IntoIterator<Item = Command<T>>) -> Self {
        Self::builder().commands(commands).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::StoreError;

    #[test]
    fn init_runs_commands_in_order() {
        let store = Store::init([
            Command::add("a", 1),
            Command::commit("m1"),
            Command::add("a", 2),
            Command::commit("m2"),
        ]);
        assert_eq!(store.get("a").into_payload(), Some(2));
        assert_eq!(store.history().len(), 2);
    }

    #[test]
    fn init_with_no_commands_is_fresh() {
        let store: Store<i32> = Store::init([]);
        assert_eq!(store.current_branch_name(), "master");
        assert!(store.history().is_empty());
    }

    #[test]
    fn failing_command_does_not_stop_build() {
        let (store, report) = Store::builder()
            .command(Command::commit("empty"))
            .command(Command::add("a", 1))
            .command(Command::commit("m1"))
            .build_with_report();

        assert_eq!(report.len(), 3);
        assert_eq!(report[0].error(), Some(&StoreError::NothingToCommit));
        assert!(report[1].is_success());
        assert!(report[2].is_success());
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn builder_branch_commands() {
        let store = Store::builder()
            .default_branch("main")
            .commands([
                Command::add("a", 1),
                Command::commit("m1"),
                Command::create_branch("dev"),
                Command::checkout_branch("dev"),
                Command::add("b", 2),
                Command::commit("m2"),
            ])
            .build();

        assert_eq!(store.current_branch_name(), "dev");
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.branch_names(), vec!["main", "dev"]);
    }

    #[test]
    fn execute_wraps_payloads() {
        let mut store = Store::new();
        assert_eq!(
            store.execute(Command::add("a", 1)).into_payload(),
            Some(Payload::Value(1))
        );
        let committed = store.execute(Command::commit("m1")).into_payload();
        assert!(matches!(committed, Some(Payload::Entry(ref e)) if e.message() == "m1"));

        let listed = store.execute(Command::ListBranches).into_payload();
        assert_eq!(listed, Some(Payload::Names(vec!["master".to_string()])));

        store.execute(Command::create_branch("dev"));
        let removed = store.execute(Command::remove_branch("dev"));
        assert!(removed.is_success());
        assert!(removed.payload().is_none());
    }

    #[test]
    fn execute_checkout_by_id() {
        let mut store = Store::new();
        store.execute(Command::add("a", 1));
        let Some(Payload::Entry(m1)) = store.execute(Command::commit("m1")).into_payload() else {
            panic!("commit should produce an entry");
        };
        store.execute(Command::add("a", 2));
        store.execute(Command::commit("m2"));

        let outcome = store.execute(Command::checkout(m1.id().as_str()));
        assert!(outcome.is_success());
        assert_eq!(store.get("a").into_payload(), Some(1));
    }

    #[test]
    fn read_only_commands() {
        assert!(!Command::<i32>::Head.is_mutating());
        assert!(!Command::<i32>::get("a").is_mutating());
        assert!(Command::add("a", 1).is_mutating());
        assert!(Command::<i32>::remove_branch("x").is_mutating());
    }

    #[test]
    fn commands_deserialize_from_json() {
        let json = r#"[
            {"op": "add", "name": "a", "value": {"n": 1}},
            {"op": "commit", "message": "m1"},
            {"op": "create_branch", "name": "dev"},
            {"op": "list_branches"}
        ]"#;
        let commands: Vec<Command<serde_json::Value>> = serde_json::from_str(json).unwrap();
        assert_eq!(commands[0], Command::add("a", serde_json::json!({"n": 1})));
        assert_eq!(commands[3], Command::ListBranches);

        let store = Store::init(commands);
        assert_eq!(
            store.get("a").into_payload(),
            Some(serde_json::json!({"n": 1}))
        );
    }
}
