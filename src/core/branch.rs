//! core::branch
//!
//! An isolated line of development.
//!
//! # State
//!
//! A branch holds three collections:
//! - `items` - the materialized values, unique by name
//! - `staged` - pending changes, applied on the next commit
//! - `history` - commits, newest first (see [`Branch::rollback_to`] for the
//!   one exception)
//!
//! # Sweep
//!
//! Applying a change to `items` is called a sweep. Committing sweeps each
//! staged change forward: tombstones remove, live values upsert. Rolling
//! back sweeps recorded changes in the inverse direction.

use serde::{Deserialize, Serialize};

use super::history::HistoryEntry;
use super::types::UtcTimestamp;
use super::value::NamedValue;

/// Direction in which a change is applied to `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepMode {
    /// Apply the change as recorded.
    Commit,
    /// Undo the change.
    Rollback,
}

/// A named branch with its items, staging area and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch<T> {
    name: String,
    items: Vec<NamedValue<T>>,
    staged: Vec<NamedValue<T>>,
    history: Vec<HistoryEntry<T>>,
}

impl<T: Clone> Branch<T> {
    /// An empty branch with no history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            staged: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Start a new branch from this one.
    ///
    /// Items and history are copied; staged changes stay behind.
    pub fn fork(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: self.items.clone(),
            staged: Vec::new(),
            history: self.history.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Committed values in insertion order.
    pub fn items(&self) -> &[NamedValue<T>] {
        &self.items
    }

    /// Pending changes in staging order.
    pub fn staged(&self) -> &[NamedValue<T>] {
        &self.staged
    }

    pub fn history(&self) -> &[HistoryEntry<T>] {
        &self.history
    }

    /// Look up a committed value by name.
    pub fn get(&self, name: &str) -> Option<&NamedValue<T>> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// The most recent commit, if any.
    pub fn head(&self) -> Option<&HistoryEntry<T>> {
        self.history.first()
    }

    /// Whether a removal of `name` is already pending.
    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.staged
            .iter()
            .any(|change| change.is_tombstoned() && change.name() == name)
    }

    /// Stage `value` under `name`.
    ///
    /// A pending live value for the same name is superseded. If `name` is
    /// committed, its removal is staged first so the commit replaces it.
    pub(crate) fn stage(&mut self, name: &str, value: T) {
        self.drop_pending(name);
        if let Some(existing) = self.get(name).cloned() {
            if !self.is_staged_for_removal(name) {
                self.staged.push(existing.into_tombstone());
            }
        }
        self.staged.push(NamedValue::new(name, value));
    }

    /// Stage the removal of a committed value.
    ///
    /// Returns the committed value, or `None` if `name` is not committed.
    pub(crate) fn stage_removal(&mut self, name: &str) -> Option<T> {
        let existing = self.get(name)?.clone();
        self.drop_pending(name);
        if !self.is_staged_for_removal(name) {
            self.staged.push(existing.clone().into_tombstone());
        }
        Some(existing.into_value())
    }

    /// Sweep every staged change into `items` and record a commit.
    ///
    /// Returns `None`, leaving everything untouched, if nothing is staged.
    pub(crate) fn commit(
        &mut self,
        message: &str,
        timestamp: UtcTimestamp,
    ) -> Option<&HistoryEntry<T>> {
        if self.staged.is_empty() {
            return None;
        }

        let staged = std::mem::take(&mut self.staged);
        for change in &staged {
            self.sweep(change, SweepMode::Commit);
        }
        self.history
            .insert(0, HistoryEntry::at(timestamp, message, staged));
        self.history.first()
    }

    /// Reconstruct `items` as of commit `id`.
    ///
    /// Every commit newer than the target is undone, newest first, each
    /// one's changes in reverse order. History is then cut down to the
    /// target and everything newer, and that range is reversed: the target
    /// ends up first and the formerly newest commit last. Entries older than
    /// the target are dropped.
    ///
    /// Returns `None` if no commit has that id.
    pub(crate) fn rollback_to(&mut self, id: &str) -> Option<&HistoryEntry<T>> {
        let target = self.history.iter().position(|entry| entry.id() == id)?;

        let mut history = std::mem::take(&mut self.history);
        for entry in &history[..target] {
            for change in entry.changes().iter().rev() {
                self.sweep(change, SweepMode::Rollback);
            }
        }
        history.truncate(target + 1);
        history.reverse();
        self.history = history;
        self.history.first()
    }

    fn sweep(&mut self, change: &NamedValue<T>, mode: SweepMode) {
        let removes = change.is_tombstoned() != (mode == SweepMode::Rollback);
        if removes {
            self.items.retain(|item| item.name() != change.name());
        } else {
            self.upsert(change.clone().revived());
        }
    }

    fn upsert(&mut self, value: NamedValue<T>) {
        match self.items.iter_mut().find(|item| item.name() == value.name()) {
            Some(slot) => *slot = value,
            None => self.items.push(value),
        }
    }

    /// Forget staged live values for `name`; staged removals stay.
    fn drop_pending(&mut self, name: &str) {
        self.staged
            .retain(|change| change.is_tombstoned() || change.name() != name);
    }
}
