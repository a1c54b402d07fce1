//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first match wins:
//! 1. An explicit path (the CLI's `--config`)
//! 2. `$BRANCHSTORE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/branchstore/config.toml`
//! 4. `~/.branchstore/config.toml`
//!
//! Missing files are not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use branchstore::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Default branch: {}", config.store.default_branch());
//! ```

pub mod schema;

pub use schema::StoreConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "BRANCHSTORE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration and where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Store settings
    pub store: StoreConfig,
    /// Path the settings were read from (if any file was found)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` must exist when given; the standard locations are only
    /// consulted when it is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read, parsed, or fails
    /// validation.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find(),
        };

        let store = match &path {
            Some(path) => Self::read(path)?,
            None => StoreConfig::default(),
        };
        store.validate()?;

        Ok(Config { store, path })
    }

    /// First existing config file among the standard locations.
    fn find() -> Option<PathBuf> {
        // 1. Check $BRANCHSTORE_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/branchstore/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("branchstore/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.branchstore/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".branchstore/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read(path: &Path) -> Result<StoreConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path the configuration was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            default_branch = "trunk"
            "#,
        )
        .unwrap();

        let config = Config::load(Some(config_path.as_path())).unwrap();
        assert_eq!(config.store.default_branch(), "trunk");
        assert_eq!(config.loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn missing_explicit_path_is_error() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(Some(temp.path().join("absent.toml").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "default_branch = [").unwrap();

        let err = Config::load(Some(config_path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "abbrev = 1").unwrap();

        let err = Config::load(Some(config_path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }
}
