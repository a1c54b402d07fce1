//! core
//!
//! Domain types and operations of the object store.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommitId, UtcTimestamp
//! - [`outcome`] - Outcome of every store operation, failure kinds
//! - [`value`] - Named values, live or tombstoned
//! - [`history`] - Immutable commit records
//! - [`branch`] - Staging, committing and rolling back one branch
//! - [`store`] - The store and its branch collection
//! - [`command`] - Operations as data, store construction
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Expected failures are values, never panics or `Err`
//! - History entries are immutable snapshots
//! - Branches never share mutable state

pub mod branch;
pub mod command;
pub mod config;
pub mod history;
pub mod outcome;
pub mod store;
pub mod types;
pub mod value;
