//! Error taxonomy for file store operations.

use std::io;
use std::path::{Path, PathBuf};

/// Errors surfaced by mutating [`FileStore`](crate::store::FileStore) operations.
///
/// Boolean queries never produce these; they collapse every failure to `false`.
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    /// The path, or the parent directory it should live in, does not exist.
    #[error("not found: {}", path.display())]
    NotFound {
        /// Path that was being accessed.
        path: PathBuf,
    },
    /// The host denied the requested access.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// Path that was being accessed.
        path: PathBuf,
    },
    /// Any other I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A configuration file could not be parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

impl FileStoreError {
    /// Classifies an I/O error raised while accessing `path`.
    #[must_use]
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Returns the path the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path }
            | Self::Io { path, .. }
            | Self::Config { path, .. } => path,
        }
    }

    /// Returns `true` for [`FileStoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FileStoreError>;
