//! core::store
//!
//! The object store: a set of branches, one of which is current.
//!
//! # Operations
//!
//! Value operations (`add`, `remove`, `commit`, `checkout`, `head`, `log`,
//! `get`) act on the current branch. Branch operations (`create_branch`,
//! `checkout_branch`, `remove_branch`, `list_branches`) act on the branch
//! collection. Every operation returns an [`Outcome`]; none of them fail
//! with `Err` or panic for expected conditions.
//!
//! # Example
//!
//! ```
//! use branchstore::core::store::Store;
//!
//! let mut store = Store::new();
//! store.add("greeting", "hello");
//! assert!(store.commit("say hello").is_success());
//! assert_eq!(store.get("greeting").into_payload(), Some("hello"));
//!
//! store.create_branch("dev");
//! store.checkout_branch("dev");
//! store.add("greeting", "hi");
//! store.commit("say hi");
//!
//! store.checkout_branch("master");
//! assert_eq!(store.get("greeting").into_payload(), Some("hello"));
//! ```

use tracing::{debug, warn};

use super::branch::Branch;
use super::command::StoreBuilder;
use super::config::StoreConfig;
use super::history::HistoryEntry;
use super::outcome::{Outcome, StoreError};
use super::types::UtcTimestamp;
use super::value::NamedValue;

/// Name of the branch a store starts on unless configured otherwise.
pub const DEFAULT_BRANCH: &str = "master";

/// Marker placed before the current branch in [`Store::list_branches`].
pub const CURRENT_MARKER: &str = "* ";

/// Marker placed before every other branch in [`Store::list_branches`].
pub const OTHER_MARKER: &str = "  ";

/// In-memory, branch-aware object store.
///
/// Single-writer: every mutating operation takes `&mut self`. Hosts that
/// share a store across threads must wrap it in a lock.
#[derive(Debug, Clone)]
pub struct Store<T = serde_json::Value> {
    branches: Vec<Branch<T>>,
    current: String,
}

impl<T: Clone> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Store<T> {
    /// A store with a single empty `master` branch.
    pub fn new() -> Self {
        Self::with_default_branch(DEFAULT_BRANCH)
    }

    /// A store whose initial branch is named by `config`.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self::with_default_branch(config.default_branch())
    }

    /// A store with a single empty branch called `name`.
    pub fn with_default_branch(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            branches: vec![Branch::new(name.clone())],
            current: name,
        }
    }

    /// Start building a store that runs initialization commands.
    pub fn builder() -> StoreBuilder<T> {
        StoreBuilder::new()
    }

    /// Name of the current branch.
    pub fn current_branch_name(&self) -> &str {
        &self.current
    }

    /// The current branch.
    ///
    /// # Panics
    ///
    /// Panics if the current branch name does not resolve, which can only
    /// happen through a bug in this module.
    pub fn branch(&self) -> &Branch<T> {
        let current = &self.current;
        self.branches
            .iter()
            .find(|branch| branch.name() == current)
            .unwrap_or_else(|| panic!("current branch {current} is missing from the store"))
    }

    fn branch_mut(&mut self) -> &mut Branch<T> {
        let current = &self.current;
        self.branches
            .iter_mut()
            .find(|branch| branch.name() == current)
            .unwrap_or_else(|| panic!("current branch {current} is missing from the store"))
    }

    /// Branch names in creation order.
    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(Branch::name).collect()
    }

    /// Committed values on the current branch.
    pub fn items(&self) -> &[NamedValue<T>] {
        self.branch().items()
    }

    /// Pending changes on the current branch.
    pub fn staged(&self) -> &[NamedValue<T>] {
        self.branch().staged()
    }

    /// History of the current branch.
    pub fn history(&self) -> &[HistoryEntry<T>] {
        self.branch().history()
    }

    /// Stage `value` under `name`, replacing any committed value of that name
    /// on the next commit.
    pub fn add(&mut self, name: &str, value: T) -> Outcome<T> {
        self.branch_mut().stage(name, value.clone());
        debug!(branch = %self.current, name, "staged value");
        Outcome::success(format!("Added {name} to stage."), value)
    }

    /// Stage the removal of a committed value.
    pub fn remove(&mut self, name: &str) -> Outcome<T> {
        match self.branch_mut().stage_removal(name) {
            Some(value) => {
                debug!(branch = %self.current, name, "staged removal");
                Outcome::success(format!("Added {name} for removal."), value)
            }
            None => Outcome::failure(StoreError::ObjectNotCommitted(name.to_string())),
        }
    }

    /// Apply every staged change and record a commit.
    pub fn commit(&mut self, message: &str) -> Outcome<HistoryEntry<T>> {
        let changed = self.branch().staged().len();
        let Some(entry) = self.branch_mut().commit(message, UtcTimestamp::now()) else {
            return Outcome::failure(StoreError::NothingToCommit);
        };
        let entry = entry.clone();
        debug!(branch = %self.current, commit = %entry.id(), changes = changed, "committed");
        Outcome::success(format!("{message}\n\t{changed} objects changed"), entry)
    }

    /// Roll the current branch back to commit `id`.
    ///
    /// Commits newer than the target are undone. Afterwards the history
    /// holds the target followed by the commits that used to be newer, in
    /// oldest-first order; commits older than the target are gone.
    pub fn checkout(&mut self, id: &str) -> Outcome<HistoryEntry<T>> {
        let Some(head) = self.branch_mut().rollback_to(id) else {
            return Outcome::failure(StoreError::CommitNotFound(id.to_string()));
        };
        let head = head.clone();
        debug!(branch = %self.current, commit = %head.id(), "rolled back");
        Outcome::success(format!("HEAD is now at {}.", head.id()), head)
    }

    /// The most recent commit, exactly as recorded.
    pub fn head(&self) -> Outcome<HistoryEntry<T>> {
        match self.branch().head() {
            Some(entry) => Outcome::success(entry.message(), entry.clone()),
            None => Outcome::failure(StoreError::NoCommitsYet(self.current.clone())),
        }
    }

    /// The whole history of the current branch.
    pub fn log(&self) -> Outcome<Vec<HistoryEntry<T>>> {
        let history = self.branch().history();
        if history.is_empty() {
            return Outcome::failure(StoreError::NoCommitsYet(self.current.clone()));
        }
        let rendered = history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");
        Outcome::success(rendered, history.to_vec())
    }

    /// Look up a committed value.
    pub fn get(&self, name: &str) -> Outcome<T> {
        match self.branch().get(name) {
            Some(item) => Outcome::success(format!("Found object {name}."), item.value().clone()),
            None => Outcome::failure(StoreError::ObjectNotCommitted(name.to_string())),
        }
    }

    /// Create a branch from the current one.
    ///
    /// Items and history are copied; staged changes are not.
    pub fn create_branch(&mut self, name: &str) -> Outcome<Branch<T>> {
        if self.find_branch(name).is_some() {
            return Outcome::failure(StoreError::BranchAlreadyExists(name.to_string()));
        }
        let branch = self.branch().fork(name);
        self.branches.push(branch.clone());
        debug!(from = %self.current, branch = name, "created branch");
        Outcome::success(format!("Created branch {name}."), branch)
    }

    /// Make `name` the current branch.
    pub fn checkout_branch(&mut self, name: &str) -> Outcome<Branch<T>> {
        let Some(index) = self.find_branch(name) else {
            return Outcome::failure(StoreError::BranchNotFound(name.to_string()));
        };
        self.current = name.to_string();
        debug!(branch = name, "switched branch");
        Outcome::success(
            format!("Switched to branch {name}."),
            self.branches[index].clone(),
        )
    }

    /// Delete a branch other than the current one.
    pub fn remove_branch(&mut self, name: &str) -> Outcome<()> {
        if name == self.current {
            return Outcome::failure(StoreError::CannotRemoveCurrentBranch);
        }
        let Some(index) = self.find_branch(name) else {
            return Outcome::failure(StoreError::BranchNotFound(name.to_string()));
        };
        self.branches.remove(index);
        debug!(branch = name, "removed branch");
        Outcome::done(format!("Removed branch {name}."))
    }

    /// Branch names sorted lexicographically.
    ///
    /// The message has one line per branch, the current one prefixed with
    /// [`CURRENT_MARKER`] and the rest with [`OTHER_MARKER`]. The payload is
    /// the sorted names without markers.
    pub fn list_branches(&self) -> Outcome<Vec<String>> {
        let mut names: Vec<String> = self
            .branches
            .iter()
            .map(|branch| branch.name().to_string())
            .collect();
        names.sort();

        let listing = names
            .iter()
            .map(|name| {
                let marker = if *name == self.current {
                    CURRENT_MARKER
                } else {
                    OTHER_MARKER
                };
                format!("{marker}{name}")
            })
            .collect::<Vec<_>>()
            .join("\n");
        Outcome::success(listing, names)
    }

    fn find_branch(&self, name: &str) -> Option<usize> {
        self.branches.iter().position(|branch| branch.name() == name)
    }

    /// Log a failed initialization command; used by the builder.
    pub(crate) fn note_failure(&self, step: usize, error: &StoreError) {
        warn!(branch = %self.current, step, kind = error.kind(), "{error}");
    }
}
