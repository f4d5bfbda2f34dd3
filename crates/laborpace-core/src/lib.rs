//! # Laborpace Core Library
//!
//! Core logic for laborpace, a labor-contraction timer with a breathing
//! pacer. The CLI binary is a thin orchestration layer over this crate;
//! a GUI front end would sit on the same operations.
//!
//! ## Key Components
//!
//! - [`ContractionRecorder`]: start/stop state machine that appends completed
//!   contractions to the history
//! - [`pattern::evaluate`]: pure 5-1-1 rule evaluation over the history
//! - [`BreathingScheduler`]: two-phase inhale/exhale pacer with token-based
//!   cancellation
//! - [`Database`]: SQLite key-value persistence for history and settings
//!
//! The core owns no threads and no timers. All interval arithmetic runs on
//! caller-supplied epoch milliseconds (see [`Clock`]); suspension between
//! breathing phases is the caller's job.

pub mod breathing;
pub mod clock;
pub mod error;
pub mod events;
pub mod history;
pub mod pattern;
pub mod recorder;
pub mod storage;

pub use breathing::{
    BreathPhase, BreathingScheduler, BreathingSettings, PendingPhase, PhaseToken, SessionState,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, StateError, StorageError};
pub use events::Event;
pub use history::{ContractionHistory, ContractionRecord, HistoryEntry};
pub use pattern::{evaluate, AlertLatch, Evaluation, WarningLevel};
pub use recorder::ContractionRecorder;
pub use storage::Database;
