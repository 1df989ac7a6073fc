//! Recording adapter for the `FileSystem` port.

use std::io;
use std::path::Path;

use serde::Serialize;

use super::{record_interaction, record_result, SharedRecorder};
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct ContentsInput<'a> {
    path: String,
    contents: &'a str,
}

#[derive(Serialize)]
struct BytesInput<'a> {
    path: String,
    contents: &'a [u8],
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput::new(path), &result);
        result
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        let result = self.inner.read_bytes(path);
        record_result(&self.recorder, "fs", "read_bytes", &PathInput::new(path), &result);
        result
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let result = self.inner.write_bytes(path, contents);
        let input = BytesInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "write_bytes", &input, &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let result = self.inner.write(path, contents);
        let input = ContentsInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn append(&self, path: &Path, contents: &str) -> io::Result<()> {
        let result = self.inner.append(path, contents);
        let input = ContentsInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "append", &input, &result);
        result
    }

    fn is_file(&self, path: &Path) -> bool {
        let result = self.inner.is_file(path);
        record_interaction(&self.recorder, "fs", "is_file", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput::new(path), &result);
        result
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let result = self.inner.create_dir_all(path);
        record_result(&self.recorder, "fs", "create_dir_all", &PathInput::new(path), &result);
        result
    }
}
