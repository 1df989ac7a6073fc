//! Store configuration: where the log and data files live.
//!
//! A config is usually built in code with [`StoreConfig::new`], or loaded
//! from a YAML file:
//!
//! ```yaml
//! base_dir: /var/lib/myapp
//! log_path: logs/app.log
//! data_path: data/records.txt
//! separator: " | "
//! ```
//!
//! Every field is optional in the file; missing fields take the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FileStoreError, Result};

/// Default log file name, relative to the base directory.
pub const DEFAULT_LOG_PATH: &str = "filestore.log";
/// Default data file name, relative to the base directory.
pub const DEFAULT_DATA_PATH: &str = "filestore.data";
/// Default text between a log line's timestamp and its message.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Environment variable overriding [`StoreConfig::base_dir`].
pub const ENV_BASE_DIR: &str = "FILESTORE_BASE_DIR";
/// Environment variable overriding [`StoreConfig::log_path`].
pub const ENV_LOG_PATH: &str = "FILESTORE_LOG_PATH";
/// Environment variable overriding [`StoreConfig::data_path`].
pub const ENV_DATA_PATH: &str = "FILESTORE_DATA_PATH";
/// Environment variable overriding [`StoreConfig::separator`].
pub const ENV_SEPARATOR: &str = "FILESTORE_SEPARATOR";

/// Configuration passed to a [`FileStore`](crate::store::FileStore) at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory that relative paths are resolved against. `None` means the
    /// process working directory.
    pub base_dir: Option<PathBuf>,
    /// Destination of `write_log`.
    pub log_path: PathBuf,
    /// Destination of `write_data`.
    pub data_path: PathBuf,
    /// Inserted between the timestamp and the message of each log line.
    pub separator: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH, DEFAULT_DATA_PATH)
    }
}

impl StoreConfig {
    /// Creates a config with explicit log and data paths and default separator.
    pub fn new(log_path: impl Into<PathBuf>, data_path: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: None,
            log_path: log_path.into(),
            data_path: data_path.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Sets the base directory for relative paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Sets the timestamp/message separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Loads a config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::NotFound`] if the file is missing, another I/O
    /// variant if it cannot be read, and [`FileStoreError::Config`] if it does
    /// not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FileStoreError::from_io(path, e))?;
        if content.trim().is_empty() {
            tracing::warn!(path = %path.display(), "config file is empty, using defaults");
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| FileStoreError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies overrides from a variable lookup, typically the process environment.
    ///
    /// Unset or empty variables leave the corresponding field alone.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(base_dir) = get(ENV_BASE_DIR) {
            self.base_dir = Some(PathBuf::from(base_dir));
        }
        if let Some(log_path) = get(ENV_LOG_PATH) {
            self.log_path = PathBuf::from(log_path);
        }
        if let Some(data_path) = get(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(data_path);
        }
        if let Some(separator) = lookup(ENV_SEPARATOR) {
            self.separator = separator;
        }
        self
    }

    /// Resolves `path` against the base directory. Absolute paths pass through.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Resolved location of the log file.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.resolve(&self.log_path)
    }

    /// Resolved location of the data file.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.resolve(&self.data_path)
    }
}
