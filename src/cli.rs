//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `filestore`.
#[derive(Debug, Parser)]
#[command(name = "filestore", version, about = "Read, write and trim plain-text files")]
pub struct Cli {
    /// YAML file with `base_dir`, `log_path`, `data_path` and `separator`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands, one per store operation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace a file's contents.
    Write {
        /// Target file.
        path: PathBuf,
        /// New contents, written verbatim.
        content: String,
    },
    /// Print a file's contents.
    Read {
        /// File to read.
        path: PathBuf,
        /// Print nothing instead of failing when the file is missing.
        #[arg(long)]
        lenient: bool,
    },
    /// Keep only the most recent lines of a log file.
    Trim {
        /// Log file to trim.
        path: PathBuf,
        /// Number of lines to keep.
        #[arg(long, value_name = "N")]
        max_lines: usize,
    },
    /// Append a timestamped line to the configured log file.
    Log {
        /// Message text.
        message: String,
    },
    /// Append a line to the configured data file.
    Data {
        /// Content to append.
        content: String,
    },
    /// Print whether a regular file exists.
    Exists {
        /// Path to check.
        path: PathBuf,
    },
    /// Print whether a directory exists.
    DirExists {
        /// Path to check.
        path: PathBuf,
    },
    /// Create a directory and its parents.
    Mkdir {
        /// Directory to create.
        path: PathBuf,
    },
    /// Print the current local time in log format.
    Time,
}
