//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommitId`] - Hex identifier of a history entry
//! - [`UtcTimestamp`] - Moment a commit was recorded
//!
//! # Examples
//!
//! ```
//! use branchstore::core::types::{CommitId, UtcTimestamp};
//!
//! let ts = UtcTimestamp::now();
//! let id = CommitId::derive(&ts, "initial import");
//! assert_eq!(id.as_str().len(), 64);
//! assert_eq!(id.short(7).len(), 7);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Format used when rendering commit dates and when deriving commit ids.
///
/// Minute resolution: two commits with the same message inside the same
/// minute derive the same id.
pub const COMMIT_DATE_FORMAT: &str = "%a %b %d %H:%M %Y %z";

/// Identifier of a history entry.
///
/// Derived deterministically from the commit's formatted date and message.
/// Always lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Derive the id for a commit recorded at `timestamp` with `message`.
    ///
    /// # Example
    ///
    /// ```
    /// use branchstore::core::types::{CommitId, UtcTimestamp};
    ///
    /// let ts = UtcTimestamp::now();
    /// assert_eq!(CommitId::derive(&ts, "m1"), CommitId::derive(&ts, "m1"));
    /// assert_ne!(CommitId::derive(&ts, "m1"), CommitId::derive(&ts, "m2"));
    /// ```
    pub fn derive(timestamp: &UtcTimestamp, message: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(timestamp.formatted().as_bytes());
        hasher.update(message.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters, or the full id if `len` exceeds it.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CommitId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CommitId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(DateTime<Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from whole seconds since the Unix epoch.
    ///
    /// Returns `None` if the value is out of chrono's range.
    pub fn from_unix(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Render with [`COMMIT_DATE_FORMAT`].
    pub fn formatted(&self) -> String {
        self.0.format(COMMIT_DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(secs: i64) -> UtcTimestamp {
        UtcTimestamp::from_unix(secs).unwrap()
    }

    mod commit_id {
        use super::*;

        #[test]
        fn deterministic() {
            let ts = fixed(1_700_000_000);
            assert_eq!(CommitId::derive(&ts, "m1"), CommitId::derive(&ts, "m1"));
        }

        #[test]
        fn message_changes_id() {
            let ts = fixed(1_700_000_000);
            assert_ne!(CommitId::derive(&ts, "m1"), CommitId::derive(&ts, "m2"));
        }

        #[test]
        fn same_minute_same_message_collides() {
            // ten seconds apart, same minute
            let a = CommitId::derive(&fixed(1_700_000_000), "m1");
            let b = CommitId::derive(&fixed(1_700_000_010), "m1");
            assert_eq!(a, b);
        }

        #[test]
        fn different_minute_differs() {
            let a = CommitId::derive(&fixed(1_700_000_000), "m1");
            let b = CommitId::derive(&fixed(1_700_000_120), "m1");
            assert_ne!(a, b);
        }

        #[test]
        fn lowercase_hex() {
            let id = CommitId::derive(&fixed(0), "x");
            assert_eq!(id.as_str().len(), 64);
            assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }

        #[test]
        fn short_form() {
            let id = CommitId::derive(&fixed(0), "x");
            assert_eq!(id.short(7), &id.as_str()[..7]);
            assert_eq!(id.short(100), id.as_str());
        }

        #[test]
        fn compares_with_str() {
            let id = CommitId::derive(&fixed(0), "x");
            let raw = id.as_str().to_string();
            assert!(id == raw.as_str());
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn formatted_matches_log_layout() {
            // 2023-11-14T22:13:20Z
            assert_eq!(fixed(1_700_000_000).formatted(), "Tue Nov 14 22:13 2023 +0000");
        }

        #[test]
        fn display_is_rfc3339() {
            assert!(UtcTimestamp::now().to_string().contains('T'));
        }

        #[test]
        fn serde_roundtrip() {
            let ts = UtcTimestamp::now();
            let json = serde_json::to_string(&ts).unwrap();
            let parsed: UtcTimestamp = serde_json::from_str(&json).unwrap();
            assert_eq!(ts, parsed);
        }
    }
}
