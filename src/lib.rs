//! branchstore - an in-memory, branch-aware object store
//!
//! Named values are staged, committed into an immutable history, inspected,
//! rolled back to, and organized across independently named branches. The
//! whole store lives in memory and has a single writer.
//!
//! # Architecture
//!
//! - [`core`] - Store, branches, history, and the outcome of every operation
//! - [`cli`] - Command-line interface (script runner for the `bst` binary)
//! - [`ui`] - Output formatting
//! - [`telemetry`] - Logging setup
//!
//! # Correctness Invariants
//!
//! 1. The current branch name always resolves to an existing branch
//! 2. Staged changes are cleared exactly when a commit succeeds
//! 3. Commits on one branch never affect another
//! 4. Expected failures are reported as outcomes, never as panics
//!
//! # Example
//!
//! ```
//! use branchstore::core::store::Store;
//!
//! let mut store = Store::new();
//! store.add("a", 1);
//! let m1 = store.commit("m1").into_payload().unwrap();
//! store.add("a", 2);
//! store.commit("m2");
//!
//! store.checkout(m1.id().as_str());
//! assert_eq!(store.get("a").into_payload(), Some(1));
//! ```

pub mod cli;
pub mod core;
pub mod telemetry;
pub mod ui;
