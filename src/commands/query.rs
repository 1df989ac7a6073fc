//! `filestore exists`, `dir-exists`, `mkdir` and `time`.

use std::io::Write;
use std::path::Path;

use super::print_line;
use crate::store::FileStore;

/// Print `true` or `false` for a regular file.
///
/// # Errors
///
/// Returns an error string only if output cannot be written.
pub fn exists(store: &FileStore, path: &Path, out: &mut dyn Write) -> Result<(), String> {
    print_line(out, &store.file_exists(path).to_string())
}

/// Print `true` or `false` for a directory.
///
/// # Errors
///
/// Returns an error string only if output cannot be written.
pub fn dir_exists(store: &FileStore, path: &Path, out: &mut dyn Write) -> Result<(), String> {
    print_line(out, &store.directory_exists(path).to_string())
}

/// Create a directory tree.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created.
pub fn mkdir(store: &FileStore, path: &Path) -> Result<(), String> {
    store.create_dir(path).map_err(|e| e.to_string())
}

/// Print the current time in log format.
///
/// # Errors
///
/// Returns an error string only if output cannot be written.
pub fn time(store: &FileStore, out: &mut dyn Write) -> Result<(), String> {
    print_line(out, &store.format_time())
}
