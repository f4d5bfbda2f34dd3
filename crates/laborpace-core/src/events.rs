use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::{BreathPhase, SessionState};
use crate::history::ContractionRecord;
use crate::pattern::WarningLevel;

/// Every mutating core operation produces an Event.
/// The CLI prints them as JSON; a GUI front end would render them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ContractionStarted {
        start_ms: u64,
        at: DateTime<Utc>,
    },
    ContractionRecorded {
        record: ContractionRecord,
        level: WarningLevel,
        hospital_alert: bool,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    /// Fresh Critical detection. Emitted at most once per transition into
    /// Critical (see `AlertLatch`), so an alert/haptic collaborator fires
    /// exactly once per newly detected pattern.
    HospitalAlert {
        at: DateTime<Utc>,
    },
    BreathPhaseStarted {
        phase: BreathPhase,
        cycle: u64,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    BreathingStopped {
        cycles_completed: u64,
        at: DateTime<Utc>,
    },
    /// A session was requested while the pacer is disabled in settings.
    BreathingDisabled {
        at: DateTime<Utc>,
    },
    /// Full render-state tuple.
    Snapshot {
        recording: bool,
        history_len: usize,
        level: WarningLevel,
        hospital_alert: bool,
        breathing: SessionState,
        at: DateTime<Utc>,
    },
}
