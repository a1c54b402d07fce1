//! core::outcome
//!
//! The result of every public store operation.
//!
//! # Design
//!
//! Store operations never return `Err` for expected failure conditions.
//! Instead each yields an [`Outcome`]: either a success carrying a
//! human-readable message and an optional payload, or a failure carrying a
//! [`StoreError`] whose `Display` is the message shown to users.
//!
//! ```
//! use branchstore::core::outcome::{Outcome, StoreError};
//!
//! let ok: Outcome<i32> = Outcome::success("Found object a.", 1);
//! assert!(ok.is_success());
//! assert_eq!(ok.payload(), Some(&1));
//!
//! let failed: Outcome<i32> = Outcome::failure(StoreError::NothingToCommit);
//! assert_eq!(failed.message(), "Nothing to commit, working directory clean.");
//! assert_eq!(failed.into_result(), Err(StoreError::NothingToCommit));
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Every expected failure a store operation can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Branch {0} already exists.")]
    BranchAlreadyExists(String),

    #[error("Branch {0} does not exist.")]
    BranchNotFound(String),

    #[error("Cannot remove current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Nothing to commit, working directory clean.")]
    NothingToCommit,

    #[error("Object {0} is not committed.")]
    ObjectNotCommitted(String),

    #[error("Branch {0} does not have any commits yet.")]
    NoCommitsYet(String),

    #[error("Commit {0} does not exist.")]
    CommitNotFound(String),
}

impl StoreError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::BranchAlreadyExists(_) => "branch-already-exists",
            StoreError::BranchNotFound(_) => "branch-not-found",
            StoreError::CannotRemoveCurrentBranch => "cannot-remove-current-branch",
            StoreError::NothingToCommit => "nothing-to-commit",
            StoreError::ObjectNotCommitted(_) => "object-not-committed",
            StoreError::NoCommitsYet(_) => "no-commits-yet",
            StoreError::CommitNotFound(_) => "commit-not-found",
        }
    }
}

/// Tagged result of a store operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    /// The operation took effect.
    Success {
        /// Human-readable description of what happened.
        message: String,
        /// Data produced by the operation, if any.
        payload: Option<P>,
    },
    /// The operation was rejected; nothing changed.
    Failure(StoreError),
}

impl<P> Outcome<P> {
    /// A success carrying `payload`.
    pub fn success(message: impl Into<String>, payload: P) -> Self {
        Outcome::Success {
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// A success with nothing to hand back.
    pub fn done(message: impl Into<String>) -> Self {
        Outcome::Success {
            message: message.into(),
            payload: None,
        }
    }

    /// A failure of the given kind.
    pub fn failure(error: StoreError) -> Self {
        Outcome::Failure(error)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The human-readable message, for either variant.
    pub fn message(&self) -> String {
        match self {
            Outcome::Success { message, .. } => message.clone(),
            Outcome::Failure(err) => err.to_string(),
        }
    }

    /// Borrow the payload, if the operation succeeded with one.
    pub fn payload(&self) -> Option<&P> {
        match self {
            Outcome::Success { payload, .. } => payload.as_ref(),
            Outcome::Failure(_) => None,
        }
    }

    /// Take the payload, if the operation succeeded with one.
    pub fn into_payload(self) -> Option<P> {
        match self {
            Outcome::Success { payload, .. } => payload,
            Outcome::Failure(_) => None,
        }
    }

    /// The failure, if the operation was rejected.
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    /// Transform the payload, keeping the message and failure untouched.
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Outcome<Q> {
        match self {
            Outcome::Success { message, payload } => Outcome::Success {
                message,
                payload: payload.map(f),
            },
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }

    /// Lift into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<Option<P>, StoreError> {
        match self {
            Outcome::Success { payload, .. } => Ok(payload),
            Outcome::Failure(err) => Err(err),
        }
    }
}

/// JSON shape: `{"success", "kind", "message", "payload"}`.
impl<P: Serialize> Serialize for Outcome<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 4)?;
        state.serialize_field("success", &self.is_success())?;
        state.serialize_field("kind", &self.error().map(StoreError::kind))?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("payload", &self.payload())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_accessors() {
        let outcome = Outcome::success("Added a to stage.", 5);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.message(), "Added a to stage.");
        assert_eq!(outcome.payload(), Some(&5));
        assert!(outcome.error().is_none());
        assert_eq!(outcome.into_payload(), Some(5));
    }

    #[test]
    fn done_has_no_payload() {
        let outcome: Outcome<()> = Outcome::done("Removed branch dev.");
        assert!(outcome.is_success());
        assert!(outcome.payload().is_none());
    }

    #[test]
    fn failure_message_comes_from_error() {
        let outcome: Outcome<i32> =
            Outcome::failure(StoreError::ObjectNotCommitted("a".into()));
        assert!(outcome.is_failure());
        assert_eq!(outcome.message(), "Object a is not committed.");
        assert!(outcome.payload().is_none());
        assert_eq!(
            outcome.error(),
            Some(&StoreError::ObjectNotCommitted("a".into()))
        );
    }

    #[test]
    fn map_transforms_payload_only() {
        let outcome = Outcome::success("ok", 2).map(|n| n * 10);
        assert_eq!(outcome.payload(), Some(&20));
        assert_eq!(outcome.message(), "ok");

        let failed: Outcome<i32> = Outcome::failure(StoreError::NothingToCommit);
        assert_eq!(
            failed.map(|n| n * 10).error(),
            Some(&StoreError::NothingToCommit)
        );
    }

    #[test]
    fn into_result_supports_question_mark() {
        fn chain() -> Result<i32, StoreError> {
            let a = Outcome::success("a", 1).into_result()?.unwrap_or_default();
            let b: Option<i32> =
                Outcome::failure(StoreError::BranchNotFound("x".into())).into_result()?;
            Ok(a + b.unwrap_or_default())
        }
        assert_eq!(chain(), Err(StoreError::BranchNotFound("x".into())));
    }

    #[test]
    fn error_messages() {
        let cases = [
            (
                StoreError::BranchAlreadyExists("dev".into()),
                "Branch dev already exists.",
            ),
            (
                StoreError::BranchNotFound("dev".into()),
                "Branch dev does not exist.",
            ),
            (
                StoreError::CannotRemoveCurrentBranch,
                "Cannot remove current branch.",
            ),
            (
                StoreError::NoCommitsYet("master".into()),
                "Branch master does not have any commits yet.",
            ),
            (
                StoreError::CommitNotFound("abc".into()),
                "Commit abc does not exist.",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn kinds_are_distinct() {
        let all = [
            StoreError::BranchAlreadyExists(String::new()),
            StoreError::BranchNotFound(String::new()),
            StoreError::CannotRemoveCurrentBranch,
            StoreError::NothingToCommit,
            StoreError::ObjectNotCommitted(String::new()),
            StoreError::NoCommitsYet(String::new()),
            StoreError::CommitNotFound(String::new()),
        ];
        let mut kinds: Vec<_> = all.iter().map(StoreError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), all.len());
    }

    #[test]
    fn serializes_to_json() {
        let ok = serde_json::to_value(Outcome::success("Found object a.", 1)).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({
                "success": true,
                "kind": null,
                "message": "Found object a.",
                "payload": 1
            })
        );

        let failed: Outcome<i32> = Outcome::failure(StoreError::NothingToCommit);
        let failed = serde_json::to_value(failed).unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["kind"], "nothing-to-commit");
        assert_eq!(failed["payload"], serde_json::Value::Null);
    }
}
