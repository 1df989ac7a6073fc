//! Record-replay round-trip integration test.
//!
//! 1. Run a session against the real disk through a recording store.
//! 2. Replay the cassette with `FileStore::replaying` and compare outputs.
//! 3. Replay a second time to check determinism.

use std::path::Path;

use filestore::{FileStore, StoreConfig};

/// Snapshot of everything a session observed.
#[derive(Debug, PartialEq)]
struct Observed {
    time: String,
    content: String,
    missing_is_not_found: bool,
    file_exists: bool,
    dir_exists: bool,
}

fn exercise(store: &FileStore) -> Observed {
    store.create_dir("sub").unwrap();
    store.write_file("sub/note.txt", "remember the milk").unwrap();
    store.write_log("session start").unwrap();
    store.trim_log_file("session.log", 10).unwrap();
    Observed {
        time: store.format_time(),
        content: store.read_file("sub/note.txt").unwrap(),
        missing_is_not_found: store.read_file("sub/absent.txt").unwrap_err().is_not_found(),
        file_exists: store.file_exists("sub/note.txt"),
        dir_exists: store.directory_exists("sub"),
    }
}

fn config(dir: &Path) -> StoreConfig {
    StoreConfig::new("session.log", "session.data").with_base_dir(dir)
}

#[test]
fn record_then_replay_produces_identical_outputs() {
    let dir = std::env::temp_dir().join("filestore_record_replay_test");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("session.cassette.yaml");

    // --- Phase 1: record against the real disk ---
    let store = FileStore::recording(config(&dir), &cassette_path);
    let recorded = exercise(&store);
    let written = store.finish_recording().unwrap();
    assert_eq!(written.as_deref(), Some(cassette_path.as_path()));

    assert_eq!(recorded.content, "remember the milk");
    assert!(recorded.missing_is_not_found);
    assert!(recorded.file_exists);
    assert!(recorded.dir_exists);

    // Remove everything but the cassette: replay must not need the disk.
    std::fs::remove_dir_all(dir.join("sub")).unwrap();
    std::fs::remove_file(dir.join("session.log")).unwrap();

    // --- Phase 2: replay ---
    let replay1 = FileStore::replaying(config(&dir), &cassette_path).unwrap();
    assert_eq!(exercise(&replay1), recorded);
    assert!(!dir.join("sub").exists(), "replay must not touch the disk");

    // --- Phase 3: replay again ---
    let replay2 = FileStore::replaying(config(&dir), &cassette_path).unwrap();
    assert_eq!(exercise(&replay2), recorded);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dropping_a_recording_store_writes_the_cassette() {
    let dir = std::env::temp_dir().join("filestore_record_on_drop_test");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("drop.cassette.yaml");

    {
        let store = FileStore::recording(config(&dir), &cassette_path);
        assert!(!store.file_exists("nothing-here"));
    }

    let yaml = std::fs::read_to_string(&cassette_path).unwrap();
    assert!(yaml.contains("is_file"));

    let _ = std::fs::remove_dir_all(&dir);
}
