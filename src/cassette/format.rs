//! Cassette data structures for recording and replaying interactions.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"fs"` or `"clock"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Coarse I/O error classification that survives a YAML round trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordedErrorKind {
    /// Maps to [`io::ErrorKind::NotFound`].
    NotFound,
    /// Maps to [`io::ErrorKind::PermissionDenied`].
    PermissionDenied,
    /// Maps to [`io::ErrorKind::AlreadyExists`].
    AlreadyExists,
    /// Maps to [`io::ErrorKind::InvalidData`].
    InvalidData,
    /// Everything else.
    Other,
}

/// An I/O error as stored in a cassette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedError {
    /// Error classification.
    pub kind: RecordedErrorKind,
    /// Display text of the original error.
    pub message: String,
}

impl From<&io::Error> for RecordedError {
    fn from(err: &io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => RecordedErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => RecordedErrorKind::PermissionDenied,
            io::ErrorKind::AlreadyExists => RecordedErrorKind::AlreadyExists,
            io::ErrorKind::InvalidData => RecordedErrorKind::InvalidData,
            _ => RecordedErrorKind::Other,
        };
        Self { kind, message: err.to_string() }
    }
}

impl From<RecordedError> for io::Error {
    fn from(err: RecordedError) -> Self {
        let kind = match err.kind {
            RecordedErrorKind::NotFound => io::ErrorKind::NotFound,
            RecordedErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            RecordedErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
            RecordedErrorKind::InvalidData => io::ErrorKind::InvalidData,
            RecordedErrorKind::Other => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.message)
    }
}
