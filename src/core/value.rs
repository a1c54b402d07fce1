//! core::value
//!
//! The unit stored in a branch and recorded in history.

use serde::{Deserialize, Serialize};

/// A named value, optionally tombstoned.
///
/// A tombstoned value stands for the removal of `name`; it still carries
/// the value that was removed so a rollback can restore it.
///
/// Equality is by name only: within one collection a name is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedValue<T> {
    name: String,
    value: T,
    #[serde(default)]
    tombstoned: bool,
}

impl<T> NamedValue<T> {
    /// A live value.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            tombstoned: false,
        }
    }

    /// Mark this value as a pending removal.
    pub fn into_tombstone(mut self) -> Self {
        self.tombstoned = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn is_tombstoned(&self) -> bool {
        self.tombstoned
    }

    /// Same value, tombstone cleared.
    pub(crate) fn revived(mut self) -> Self {
        self.tombstoned = false;
        self
    }
}

impl<T> PartialEq for NamedValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for NamedValue<T> {}
