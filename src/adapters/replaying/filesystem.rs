//! Replaying adapter for the `FileSystem` port.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::cassette::format::RecordedError;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
///
/// Paths passed in are ignored; calls are answered strictly in recorded order.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("fs", method).output.clone()
    }

    fn next_bool(&self, method: &str) -> bool {
        self.next_output(method)
            .as_bool()
            .unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

/// Rebuilds an `io::Result` from `{"ok": v}` or `{"err": {kind, message}}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> io::Result<T> {
    if let Some(err) = output.get("err") {
        let recorded: RecordedError = serde_json::from_value(err.clone()).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("{context}: bad error record: {e}"))
        })?;
        return Err(recorded.into());
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("{context}: failed to deserialize: {e}"))
    })
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        extract_result(self.next_output("read_to_string"), "fs::read_to_string")
    }

    fn read_bytes(&self, _path: &Path) -> io::Result<Vec<u8>> {
        extract_result(self.next_output("read_bytes"), "fs::read_bytes")
    }

    fn write_bytes(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
        extract_result(self.next_output("write_bytes"), "fs::write_bytes")
    }

    fn write(&self, _path: &Path, _contents: &str) -> io::Result<()> {
        extract_result(self.next_output("write"), "fs::write")
    }

    fn append(&self, _path: &Path, _contents: &str) -> io::Result<()> {
        extract_result(self.next_output("append"), "fs::append")
    }

    fn is_file(&self, _path: &Path) -> bool {
        self.next_bool("is_file")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.next_bool("is_dir")
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        extract_result(self.next_output("create_dir_all"), "fs::create_dir_all")
    }
}
