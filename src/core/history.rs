//! core::history
//!
//! Immutable commit records.

use serde::{Deserialize, Serialize};

use super::types::{CommitId, UtcTimestamp};
use super::value::NamedValue;

/// One commit: the exact staged changes at commit time.
///
/// Entries are never mutated after creation. Equality is by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
    id: CommitId,
    timestamp: UtcTimestamp,
    message: String,
    changes: Vec<NamedValue<T>>,
}

impl<T> HistoryEntry<T> {
    /// Record `changes` under `message` at a given moment.
    pub fn at(
        timestamp: UtcTimestamp,
        message: impl Into<String>,
        changes: Vec<NamedValue<T>>,
    ) -> Self {
        let message = message.into();
        Self {
            id: CommitId::derive(&timestamp, &message),
            timestamp,
            message,
            changes,
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn timestamp(&self) -> &UtcTimestamp {
        &self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The changes applied by this commit, in staging order.
    pub fn changes(&self) -> &[NamedValue<T>] {
        &self.changes
    }
}

impl<T> PartialEq for HistoryEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for HistoryEntry<T> {}

impl<T> std::fmt::Display for HistoryEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Commit {}\nDate: {}\n\n\t{}",
            self.id,
            self.timestamp.formatted(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64, message: &str) -> HistoryEntry<i32> {
        HistoryEntry::at(
            UtcTimestamp::from_unix(secs).unwrap(),
            message,
            vec![NamedValue::new("a", 1)],
        )
    }

    #[test]
    fn id_derived_from_timestamp_and_message() {
        let entry = at(1_700_000_000, "m1");
        assert_eq!(
            entry.id(),
            &CommitId::derive(entry.timestamp(), "m1")
        );
    }

    #[test]
    fn equality_is_by_id() {
        let a = at(1_700_000_000, "m1");
        let b = HistoryEntry::at(*a.timestamp(), "m1", Vec::new());
        assert_eq!(a, b);
        assert_ne!(a, at(1_700_000_000, "m2"));
    }

    #[test]
    fn display_layout() {
        let entry = at(1_700_000_000, "import");
        assert_eq!(
            entry.to_string(),
            format!(
                "Commit {}\nDate: Tue Nov 14 22:13 2023 +0000\n\n\timport",
                entry.id()
            )
        );
    }

    #[test]
    fn changes_are_kept_in_order() {
        let entry = HistoryEntry::at(
            UtcTimestamp::from_unix(0).unwrap(),
            "m",
            vec![NamedValue::new("x", 1).into_tombstone(), NamedValue::new("x", 2)],
        );
        assert_eq!(entry.changes().len(), 2);
        assert!(entry.changes()[0].is_tombstoned());
        assert_eq!(*entry.changes()[1].value(), 2);
    }
}
