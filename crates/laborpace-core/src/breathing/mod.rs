mod scheduler;
mod settings;

pub use scheduler::{BreathPhase, BreathingScheduler, PendingPhase, PhaseToken, SessionState};
pub use settings::{
    BreathingSettings, EXHALE_MAX_MS, EXHALE_MIN_MS, INHALE_MAX_MS, INHALE_MIN_MS,
};
