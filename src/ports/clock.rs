//! Clock port for obtaining the current time.

use chrono::{DateTime, Local};

/// Provides the current local time.
///
/// Abstracting time access allows deterministic replay by substituting
/// a fixed or recorded clock during tests and cassette playback.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> DateTime<Local>;
}
