//! Command dispatch and handlers.

pub mod append;
pub mod file;
pub mod query;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::config::StoreConfig;
use crate::store::FileStore;

/// Environment variable naming a cassette file to record the session into.
pub const ENV_RECORD: &str = "FILESTORE_RECORD";

/// Dispatch a parsed command line to its handler.
///
/// When `FILESTORE_RECORD` is set to a file path, every port interaction is
/// recorded to that cassette file.
///
/// # Errors
///
/// Returns an error string if the config cannot be loaded or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;
    let store = match env::var(ENV_RECORD) {
        Ok(path) if !path.is_empty() => FileStore::recording(config, &PathBuf::from(path)),
        _ => FileStore::new(config),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = dispatch_with_store(&cli.command, &store, &mut out);

    // Finish recording after the command completes, even on error.
    finish_recording(store);

    result
}

/// Write the session cassette, if any. A cassette failure is logged and never
/// replaces the command's own outcome.
fn finish_recording(store: FileStore) {
    match store.finish_recording() {
        Ok(Some(path)) => eprintln!("Recording saved to: {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "failed to write cassette"),
    }
}

/// Run a command against an existing store, writing its output to `out`.
///
/// # Errors
///
/// Returns an error string if the store operation or the output write fails.
pub fn dispatch_with_store(
    command: &Command,
    store: &FileStore,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Write { path, content } => file::write(store, path, content),
        Command::Read { path, lenient } => file::read(store, path, *lenient, out),
        Command::Trim { path, max_lines } => file::trim(store, path, *max_lines),
        Command::Log { message } => append::log(store, message),
        Command::Data { content } => append::data(store, content),
        Command::Exists { path } => query::exists(store, path, out),
        Command::DirExists { path } => query::dir_exists(store, path, out),
        Command::Mkdir { path } => query::mkdir(store, path),
        Command::Time => query::time(store, out),
    }
}

/// Build the store config: YAML file if given, then `FILESTORE_*` overrides.
fn load_config(cli: &Cli) -> Result<StoreConfig, String> {
    let config = match &cli.config {
        Some(path) => StoreConfig::load(path).map_err(|e| e.to_string())?,
        None => StoreConfig::default(),
    };
    Ok(config.with_overrides(|key| env::var(key).ok()))
}

pub(crate) fn print_line(out: &mut dyn Write, text: &str) -> Result<(), String> {
    writeln!(out, "{text}").map_err(|e| format!("Failed to write output: {e}"))
}
