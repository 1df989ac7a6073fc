//! `filestore write`, `read` and `trim`.

use std::io::Write;
use std::path::Path;

use crate::store::FileStore;

/// Replace the contents of `path`.
///
/// # Errors
///
/// Returns an error string if the write fails.
pub fn write(store: &FileStore, path: &Path, content: &str) -> Result<(), String> {
    store.write_file(path, content).map_err(|e| e.to_string())
}

/// Print the contents of `path` exactly as stored.
///
/// # Errors
///
/// Returns an error string if the file cannot be read (or is missing and
/// `lenient` is off).
pub fn read(
    store: &FileStore,
    path: &Path,
    lenient: bool,
    out: &mut dyn Write,
) -> Result<(), String> {
    let result = if lenient { store.read_file_or_empty(path) } else { store.read_file(path) };
    let content = result.map_err(|e| e.to_string())?;
    out.write_all(content.as_bytes()).map_err(|e| format!("Failed to write output: {e}"))
}

/// Trim `path` to its last `max_lines` lines.
///
/// # Errors
///
/// Returns an error string if the file exists but cannot be trimmed.
pub fn trim(store: &FileStore, path: &Path, max_lines: usize) -> Result<(), String> {
    store.trim_log_file(path, max_lines).map_err(|e| e.to_string())
}
