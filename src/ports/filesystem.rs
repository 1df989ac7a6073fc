//! Filesystem port for file I/O operations.

use std::io;
use std::path::Path;

/// Provides filesystem access for reading and writing text files.
///
/// Every method acts on the host filesystem in a single call; no handle
/// outlives the call that opened it.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Reads the entire contents of a file as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Writes the given contents to a file, creating or truncating it.
    ///
    /// Missing parent directories are not created.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (missing parent, permissions, disk full).
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Byte-level [`write`](Self::write): create or truncate, then write `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (missing parent, permissions, disk full).
    fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Appends the given contents to a file, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    fn append(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Returns `true` if the path names an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if the path names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}
