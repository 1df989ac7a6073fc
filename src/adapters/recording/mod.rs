//! Recording adapters that capture port interactions into a cassette.

pub mod clock;
pub mod filesystem;

use std::io;
use std::sync::{Arc, Mutex};

use serde::Serialize;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;

use crate::cassette::format::RecordedError;
use crate::cassette::recorder::CassetteRecorder;

/// Shared handle to the recorder every recording adapter writes into.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Record an interaction with a plain (non-`Result`) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record an `io::Result<T>` interaction.
///
/// `Ok(v)` is stored as `{"ok": v}` and `Err(e)` as `{"err": {kind, message}}`,
/// which is what the replaying adapters expect.
pub(crate) fn record_result<T, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &io::Result<T>,
) where
    T: Serialize,
    I: Serialize,
{
    let output = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "ok": inner })
        }
        Err(e) => serde_json::json!({ "err": RecordedError::from(e) }),
    };
    record_interaction(recorder, port, method, input, &output);
}
