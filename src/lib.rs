//! Plain-text file persistence for a host application.
//!
//! [`FileStore`] writes and reads whole files, appends timestamped lines to a
//! log file and raw lines to a data file, bounds a log file to its most
//! recent lines, and answers file/directory existence queries.
//!
//! ```no_run
//! use filestore::{FileStore, StoreConfig};
//!
//! # fn main() -> filestore::Result<()> {
//! let store = FileStore::new(StoreConfig::new("app.log", "app.data").with_base_dir("/tmp/app"));
//! store.create_dir("/tmp/app")?;
//! store.write_log("boot")?;
//! store.trim_log_file("app.log", 500)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ports;
pub mod store;

pub use config::StoreConfig;
pub use error::{FileStoreError, Result};
pub use store::FileStore;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
