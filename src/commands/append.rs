//! `filestore log` and `data`.

use crate::store::FileStore;

/// Append a timestamped message to the log file.
///
/// # Errors
///
/// Returns an error string if the log file cannot be appended to.
pub fn log(store: &FileStore, message: &str) -> Result<(), String> {
    store.write_log(message).map_err(|e| e.to_string())
}

/// Append content to the data file.
///
/// # Errors
///
/// Returns an error string if the data file cannot be appended to.
pub fn data(store: &FileStore, content: &str) -> Result<(), String> {
    store.write_data(content).map_err(|e| e.to_string())
}
