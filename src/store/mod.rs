//! File store — plain-text persistence for a host application.
//!
//! All I/O goes through the `FileSystem` port and all time through the
//! `Clock` port, so the same store works with live, recording and replaying
//! adapters. The store keeps no state between calls: each operation opens,
//! acts and closes.
//!
//! There is no internal locking. Two threads appending to or trimming the
//! same file at once may interleave lines or lose a trim; callers that share
//! a path across threads must serialize access themselves.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

use crate::adapters::live::{LiveClock, LiveFileSystem};
use crate::adapters::recording::{RecordingClock, RecordingFileSystem, SharedRecorder};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem};
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::StoreConfig;
use crate::error::{FileStoreError, Result};
use crate::ports::{Clock, FileSystem};

/// `strftime` pattern used for log timestamps. Sorts lexically by time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `time` as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns the tail of `content` holding its last `max_lines` lines, or
/// `None` when `content` already has `max_lines` lines or fewer.
///
/// Lines are split at `b'\n'` only, so content in any encoding is kept
/// byte-for-byte, line terminators included. A final line without a
/// trailing newline still counts as a line.
#[must_use]
pub fn trim_lines(content: &[u8], max_lines: usize) -> Option<&[u8]> {
    let total = content.split_inclusive(|&b| b == b'\n').count();
    if total <= max_lines {
        return None;
    }
    let start: usize =
        content.split_inclusive(|&b| b == b'\n').take(total - max_lines).map(<[u8]>::len).sum();
    Some(&content[start..])
}

/// Reads and writes text files, appends to a log and a data file, and
/// answers existence queries.
pub struct FileStore {
    config: StoreConfig,
    fs: Box<dyn FileSystem>,
    clock: Box<dyn Clock>,
    recorder: Option<SharedRecorder>,
}

impl FileStore {
    /// Creates a store backed by the real filesystem and system clock.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_ports(config, Box::new(LiveFileSystem), Box::new(LiveClock))
    }

    /// Creates a store over explicit port implementations.
    #[must_use]
    pub fn with_ports(config: StoreConfig, fs: Box<dyn FileSystem>, clock: Box<dyn Clock>) -> Self {
        Self { config, fs, clock, recorder: None }
    }

    /// Creates a live store that also records every port call.
    ///
    /// The cassette is written to `cassette_path` by
    /// [`finish_recording`](Self::finish_recording), or on drop.
    #[must_use]
    pub fn recording(config: StoreConfig, cassette_path: &Path) -> Self {
        let recorder: SharedRecorder =
            Arc::new(Mutex::new(CassetteRecorder::new(cassette_path, "filestore-session")));
        Self {
            config,
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), Arc::clone(&recorder))),
            recorder: Some(recorder),
        }
    }

    /// Creates a store that answers every port call from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(config: StoreConfig, cassette_path: &Path) -> Result<Self> {
        let cassette = CassetteReplayer::load(cassette_path)?;
        // Separate replayers so the fs and clock cursors advance independently.
        Ok(Self::with_ports(
            config,
            Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
        ))
    }

    /// The configuration this store was built with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Writes the recorded cassette, if this is a recording store.
    ///
    /// Returns the cassette path, or `None` for a store that was not recording.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be written.
    pub fn finish_recording(mut self) -> Result<Option<PathBuf>> {
        let Some(recorder) = self.take_recorder() else {
            return Ok(None);
        };
        let path = recorder.path().to_path_buf();
        recorder.finish().map(Some).map_err(|e| FileStoreError::from_io(&path, e))
    }

    fn take_recorder(&mut self) -> Option<CassetteRecorder> {
        let shared = self.recorder.take()?;
        // Drop the recording adapters so this is the last reference.
        self.fs = Box::new(LiveFileSystem);
        self.clock = Box::new(LiveClock);
        let recorder = Arc::try_unwrap(shared).ok()?;
        Some(recorder.into_inner().unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    /// Replaces the contents of `path` with `content`, creating the file if needed.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// [`FileStoreError::NotFound`] if the parent directory is missing,
    /// [`FileStoreError::PermissionDenied`] if access is denied, otherwise
    /// [`FileStoreError::Io`].
    pub fn write_file(&self, path: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = self.config.resolve(path.as_ref());
        tracing::debug!(path = %path.display(), bytes = content.len(), "write_file");
        self.fs.write(&path, content).map_err(|e| fail("write_file", &path, e))
    }

    /// Returns the full text content of `path`.
    ///
    /// # Errors
    ///
    /// [`FileStoreError::NotFound`] if the file does not exist; see
    /// [`read_file_or_empty`](Self::read_file_or_empty) for a lenient variant.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = self.config.resolve(path.as_ref());
        tracing::debug!(path = %path.display(), "read_file");
        self.fs.read_to_string(&path).map_err(|e| FileStoreError::from_io(&path, e))
    }

    /// Like [`read_file`](Self::read_file), but a missing file reads as `""`.
    ///
    /// # Errors
    ///
    /// Any failure other than the file being absent.
    pub fn read_file_or_empty(&self, path: impl AsRef<Path>) -> Result<String> {
        match self.read_file(path) {
            Err(err) if err.is_not_found() => Ok(String::new()),
            other => other,
        }
    }

    /// Keeps only the last `max_lines` lines of `path`.
    ///
    /// A file already within the bound is left untouched, not rewritten. A
    /// missing file is not an error. Calling this twice with the same bound
    /// is the same as calling it once.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or rewritten.
    pub fn trim_log_file(&self, path: impl AsRef<Path>, max_lines: usize) -> Result<()> {
        let path = self.config.resolve(path.as_ref());
        let content = match self.fs.read_bytes(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "trim_log_file: no file, nothing to trim");
                return Ok(());
            }
            Err(e) => return Err(fail("trim_log_file", &path, e)),
        };

        let Some(kept) = trim_lines(&content, max_lines) else {
            return Ok(());
        };
        tracing::debug!(
            path = %path.display(),
            max_lines,
            dropped_bytes = content.len() - kept.len(),
            "trim_log_file: rewriting"
        );
        self.fs.write_bytes(&path, kept).map_err(|e| fail("trim_log_file", &path, e))
    }

    /// Current local time as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn format_time(&self) -> String {
        format_timestamp(&self.clock.now())
    }

    /// Appends `<timestamp><separator><message>\n` to the configured log file.
    ///
    /// The file is created if absent and never truncated. Newlines inside
    /// `message` are written as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened or written.
    pub fn write_log(&self, message: &str) -> Result<()> {
        let path = self.config.log_file();
        let line = format!("{}{}{message}\n", self.format_time(), self.config.separator);
        self.fs.append(&path, &line).map_err(|e| fail("write_log", &path, e))
    }

    /// Appends `content` to the configured data file exactly as given.
    ///
    /// No separator or newline is added; callers frame their own records.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be opened or written.
    pub fn write_data(&self, content: &str) -> Result<()> {
        let path = self.config.data_file();
        self.fs.append(&path, content).map_err(|e| fail("write_data", &path, e))
    }

    /// Whether `path` names an existing regular file. Never fails.
    #[must_use]
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        let path = self.config.resolve(path.as_ref());
        let exists = self.fs.is_file(&path);
        tracing::debug!(path = %path.display(), exists, "file_exists");
        exists
    }

    /// Creates `path` and any missing parents. An existing directory is success.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created, for instance because
    /// a regular file is in the way.
    pub fn create_dir(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = self.config.resolve(path.as_ref());
        tracing::debug!(path = %path.display(), "create_dir");
        self.fs.create_dir_all(&path).map_err(|e| fail("create_dir", &path, e))
    }

    /// Whether `path` names an existing directory. Never fails.
    #[must_use]
    pub fn directory_exists(&self, path: impl AsRef<Path>) -> bool {
        let path = self.config.resolve(path.as_ref());
        let exists = self.fs.is_dir(&path);
        tracing::debug!(path = %path.display(), exists, "directory_exists");
        exists
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Some(recorder) = self.take_recorder() {
            if let Err(e) = recorder.finish() {
                tracing::warn!(error = %e, "failed to write cassette");
            }
        }
    }
}

fn fail(op: &str, path: &Path, err: std::io::Error) -> FileStoreError {
    tracing::warn!(op, path = %path.display(), error = %err, "file store operation failed");
    FileStoreError::from_io(path, err)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::io;

    use chrono::TimeZone;

    use super::*;

    #[derive(Default)]
    struct MemState {
        files: HashMap<PathBuf, Vec<u8>>,
        dirs: HashSet<PathBuf>,
        writes: usize,
    }

    /// In-memory filesystem for testing the store without touching disk.
    #[derive(Clone, Default)]
    struct MemFs {
        state: Arc<Mutex<MemState>>,
    }

    impl MemFs {
        fn with_file(self, path: &str, content: &str) -> Self {
            self.with_bytes(path, content.as_bytes())
        }

        fn with_bytes(self, path: &str, content: &[u8]) -> Self {
            self.state.lock().unwrap().files.insert(PathBuf::from(path), content.to_vec());
            self
        }

        fn bytes(&self, path: &str) -> Option<Vec<u8>> {
            self.state.lock().unwrap().files.get(Path::new(path)).cloned()
        }

        fn content(&self, path: &str) -> Option<String> {
            self.bytes(path).map(|b| String::from_utf8(b).unwrap())
        }

        fn writes(&self) -> usize {
            self.state.lock().unwrap().writes
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            String::from_utf8(self.read_bytes(path)?)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }

        fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
            let state = self.state.lock().unwrap();
            state.files.get(path).cloned().ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.write_bytes(path, contents.as_bytes())
        }

        fn write_bytes(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            let mut state = self.state.lock().unwrap();
            state.writes += 1;
            state.files.insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        fn append(&self, path: &Path, contents: &str) -> io::Result<()> {
            let mut state = self.state.lock().unwrap();
            let file = state.files.entry(path.to_path_buf()).or_default();
            file.extend_from_slice(contents.as_bytes());
            Ok(())
        }

        fn is_file(&self, path: &Path) -> bool {
            self.state.lock().unwrap().files.contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.state.lock().unwrap().dirs.contains(path)
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            let mut state = self.state.lock().unwrap();
            for ancestor in path.ancestors().filter(|p| !p.as_os_str().is_empty()) {
                state.dirs.insert(ancestor.to_path_buf());
            }
            Ok(())
        }
    }

    /// Clock pinned to one instant.
    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap()
    }

    fn mem_store(fs: &MemFs) -> FileStore {
        FileStore::with_ports(
            StoreConfig::new("/logs/app.log", "/data/app.data"),
            Box::new(fs.clone()),
            Box::new(FixedClock(fixed_time())),
        )
    }

    #[test]
    fn format_timestamp_is_zero_padded() {
        assert_eq!(format_timestamp(&fixed_time()), "2024-03-09 07:05:02");
    }

    #[test]
    fn trim_lines_keeps_tail() {
        assert_eq!(trim_lines(b"a\nb\nc\n", 2), Some(&b"b\nc\n"[..]));
        assert_eq!(trim_lines(b"a\nb\nc", 1), Some(&b"c"[..]));
        assert_eq!(trim_lines(b"a\r\nb\r\n", 1), Some(&b"b\r\n"[..]));
        assert_eq!(trim_lines(b"a\nb\n", 0), Some(&b""[..]));
        assert_eq!(trim_lines(b"\xff\xfe\nok\n", 1), Some(&b"ok\n"[..]));
    }

    #[test]
    fn trim_lines_within_bound_is_none() {
        assert_eq!(trim_lines(b"", 0), None);
        assert_eq!(trim_lines(b"a\nb\n", 2), None);
        assert_eq!(trim_lines(b"a\nb", 5), None);
    }

    #[test]
    fn trim_under_limit_does_not_rewrite() {
        let fs = MemFs::default().with_file("/logs/app.log", "one\ntwo\n");
        let store = mem_store(&fs);

        store.trim_log_file("/logs/app.log", 2).unwrap();
        store.trim_log_file("/logs/app.log", 10).unwrap();

        assert_eq!(fs.writes(), 0);
        assert_eq!(fs.content("/logs/app.log").unwrap(), "one\ntwo\n");
    }

    #[test]
    fn trim_over_limit_is_idempotent() {
        let fs = MemFs::default().with_file("/logs/app.log", "1\n2\n3\n4\n5\n");
        let store = mem_store(&fs);

        store.trim_log_file("/logs/app.log", 3).unwrap();
        let once = fs.content("/logs/app.log").unwrap();
        store.trim_log_file("/logs/app.log", 3).unwrap();

        assert_eq!(once, "3\n4\n5\n");
        assert_eq!(fs.content("/logs/app.log").unwrap(), once);
        assert_eq!(fs.writes(), 1);
    }

    #[test]
    fn trim_survives_invalid_utf8_in_log() {
        let fs = MemFs::default().with_bytes("/logs/app.log", b"old \xff line\n");
        let store = mem_store(&fs);

        store.write_log("a").unwrap();
        store.write_log("b").unwrap();
        store.trim_log_file("/logs/app.log", 1).unwrap();

        assert_eq!(fs.content("/logs/app.log").unwrap(), "2024-03-09 07:05:02 b\n");
    }

    #[test]
    fn trim_keeps_invalid_utf8_lines_verbatim() {
        let fs = MemFs::default().with_bytes("/logs/app.log", b"one\nt\xffo\nthree\n");
        let store = mem_store(&fs);

        store.trim_log_file("/logs/app.log", 2).unwrap();
        assert_eq!(fs.bytes("/logs/app.log").unwrap(), b"t\xffo\nthree\n");
    }

    #[test]
    fn trim_missing_file_is_noop() {
        let fs = MemFs::default();
        let store = mem_store(&fs);

        store.trim_log_file("/logs/none.log", 1).unwrap();
        assert!(fs.content("/logs/none.log").is_none());
    }

    #[test]
    fn write_log_prefixes_timestamp_and_appends() {
        let fs = MemFs::default();
        let store = mem_store(&fs);

        store.write_log("boot").unwrap();
        store.write_log("ready").unwrap();

        assert_eq!(
            fs.content("/logs/app.log").unwrap(),
            "2024-03-09 07:05:02 boot\n2024-03-09 07:05:02 ready\n"
        );
    }

    #[test]
    fn write_log_uses_configured_separator() {
        let fs = MemFs::default();
        let store = FileStore::with_ports(
            StoreConfig::new("/app.log", "/app.data").with_separator(" | "),
            Box::new(fs.clone()),
            Box::new(FixedClock(fixed_time())),
        );

        store.write_log("hello").unwrap();
        assert_eq!(fs.content("/app.log").unwrap(), "2024-03-09 07:05:02 | hello\n");
    }

    #[test]
    fn write_data_appends_content_verbatim() {
        let fs = MemFs::default();
        let store = mem_store(&fs);

        store.write_data("ab").unwrap();
        store.write_data("").unwrap();
        store.write_data("cd").unwrap();
        store.write_data("e\n").unwrap();

        assert_eq!(fs.content("/data/app.data").unwrap(), "abcde\n");
    }

    #[test]
    fn read_file_missing_is_not_found() {
        let fs = MemFs::default();
        let store = mem_store(&fs);

        assert!(store.read_file("/nope.txt").unwrap_err().is_not_found());
        assert_eq!(store.read_file_or_empty("/nope.txt").unwrap(), "");
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let fs = MemFs::default();
        let store = FileStore::with_ports(
            StoreConfig::new("app.log", "app.data").with_base_dir("/srv"),
            Box::new(fs.clone()),
            Box::new(FixedClock(fixed_time())),
        );

        store.write_file("notes.txt", "hi").unwrap();
        store.write_data("row").unwrap();

        assert_eq!(fs.content("/srv/notes.txt").unwrap(), "hi");
        assert_eq!(fs.content("/srv/app.data").unwrap(), "row");
        assert!(store.file_exists("notes.txt"));
    }

    #[test]
    fn create_dir_then_directory_exists() {
        let fs = MemFs::default();
        let store = mem_store(&fs);

        assert!(!store.directory_exists("/a/b"));
        store.create_dir("/a/b").unwrap();
        store.create_dir("/a/b").unwrap();
        assert!(store.directory_exists("/a/b"));
        assert!(store.directory_exists("/a"));
        assert!(!store.file_exists("/a/b"));
    }

    #[test]
    fn finish_recording_on_live_store_is_none() {
        let store = FileStore::new(StoreConfig::default());
        assert_eq!(store.finish_recording().unwrap(), None);
    }
}
