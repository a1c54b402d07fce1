//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: the default branch must be a
//! usable name and the commit-id abbreviation must stay within the id.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::store::DEFAULT_BRANCH;

/// Shortest commit-id abbreviation accepted.
pub const MIN_ABBREV: usize = 4;

/// Longest commit-id abbreviation accepted (the full SHA-256 hex id).
pub const MAX_ABBREV: usize = 64;

/// Abbreviation used when none is configured.
pub const DEFAULT_ABBREV: usize = 7;

/// Store configuration.
///
/// # Example
///
/// ```toml
/// default_branch = "main"
/// abbrev = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Name of the branch a fresh store starts on
    pub default_branch: Option<String>,

    /// Number of commit-id characters shown by the CLI
    pub abbrev: Option<usize>,
}

impl StoreConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(branch) = &self.default_branch {
            if branch.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "default_branch cannot be empty".into(),
                ));
            }
            if branch.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidValue(format!(
                    "default_branch '{branch}' cannot contain whitespace"
                )));
            }
        }

        if let Some(abbrev) = self.abbrev {
            if !(MIN_ABBREV..=MAX_ABBREV).contains(&abbrev) {
                return Err(ConfigError::InvalidValue(format!(
                    "abbrev must be between {MIN_ABBREV} and {MAX_ABBREV}, got {abbrev}"
                )));
            }
        }

        Ok(())
    }

    /// Name of the branch a fresh store starts on.
    pub fn default_branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    /// Commit-id abbreviation length.
    pub fn abbrev(&self) -> usize {
        self.abbrev.unwrap_or(DEFAULT_ABBREV)
    }
}
