//! Records interactions into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::format::{Cassette, Interaction};

/// Collects port interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), interactions: Vec::new() }
    }

    /// Destination of the cassette file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Record an interaction. The `seq` field is the recording order.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette =
            Cassette { name: self.name, recorded_at: Utc::now(), interactions: self.interactions };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        tracing::debug!(path = %self.path.display(), "cassette written");
        Ok(self.path)
    }
}
