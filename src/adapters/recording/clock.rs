//! Recording adapter for the `Clock` port.

use chrono::{DateTime, Local};

use super::{record_interaction, SharedRecorder};
use crate::ports::Clock;

/// Records clock readings while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: SharedRecorder,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<Local> {
        let result = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &(), &result);
        result
    }
}
