//! Contraction recording state machine.
//!
//! Wall-clock based like the rest of the core: callers pass `now` in epoch
//! milliseconds, so the recorder can be parked in the kv store between CLI
//! invocations and still measure real elapsed time.

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::history::{ContractionHistory, ContractionRecord};

/// Owns the start/stop of a single in-progress contraction.
///
/// Invariant: `recording == false` implies `active_start_ms == None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractionRecorder {
    recording: bool,
    #[serde(default)]
    active_start_ms: Option<u64>,
}

impl ContractionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn active_start_ms(&self) -> Option<u64> {
        self.active_start_ms
    }

    /// Begin timing a contraction.
    pub fn start(&mut self, now_ms: u64) -> Result<(), StateError> {
        if self.recording {
            return Err(StateError::AlreadyRecording);
        }
        self.recording = true;
        self.active_start_ms = Some(now_ms);
        Ok(())
    }

    /// Finish timing: build the record, append it to the history, clear the
    /// active state, and return the new record.
    ///
    /// Persistence and pattern re-evaluation are the caller's job.
    pub fn stop(
        &mut self,
        now_ms: u64,
        history: &mut ContractionHistory,
    ) -> Result<ContractionRecord, StateError> {
        let start_ms = match (self.recording, self.active_start_ms) {
            (true, Some(start)) => start,
            _ => return Err(StateError::NotRecording),
        };
        // A clock rollback between invocations can park a start before the
        // last record's end; clamp it up so the history stays chronological
        // and a wedged recorder cannot result.
        let start_ms = history
            .last()
            .map(|prev| start_ms.max(prev.end_ms))
            .unwrap_or(start_ms);
        let end_ms = now_ms.max(start_ms);
        let interval_ms = history
            .last()
            .map(|prev| start_ms.saturating_sub(prev.end_ms))
            .unwrap_or(0);
        let record = ContractionRecord {
            id: end_ms.to_string(),
            start_ms,
            end_ms,
            duration_ms: end_ms - start_ms,
            interval_ms,
        };
        history.push(record.clone())?;
        self.recording = false;
        self.active_start_ms = None;
        Ok(record)
    }

    /// Empty the history. Refused mid-contraction so an in-progress timing is
    /// never silently lost; callers must stop first. Returns how many records
    /// were removed.
    pub fn clear_history(&self, history: &mut ContractionHistory) -> Result<usize, StateError> {
        if self.recording {
            return Err(StateError::ClearWhileRecording);
        }
        Ok(history.clear())
    }
}
