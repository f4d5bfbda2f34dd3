//! Breathing pacer settings.
//!
//! Out-of-range values are clamped into bounds, never rejected.

use serde::{Deserialize, Serialize};

/// Inhale duration bounds, milliseconds.
pub const INHALE_MIN_MS: u64 = 2_000;
pub const INHALE_MAX_MS: u64 = 8_000;
/// Exhale duration bounds, milliseconds.
pub const EXHALE_MIN_MS: u64 = 2_000;
pub const EXHALE_MAX_MS: u64 = 12_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingSettings {
    #[serde(default = "default_inhale_ms")]
    pub inhale_ms: u64,
    #[serde(default = "default_exhale_ms")]
    pub exhale_ms: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_inhale_ms() -> u64 {
    4_000
}
fn default_exhale_ms() -> u64 {
    6_000
}
fn default_true() -> bool {
    true
}

impl Default for BreathingSettings {
    fn default() -> Self {
        Self {
            inhale_ms: default_inhale_ms(),
            exhale_ms: default_exhale_ms(),
            enabled: true,
        }
    }
}

impl BreathingSettings {
    pub fn set_inhale_secs(&mut self, secs: u64) {
        self.inhale_ms = secs.saturating_mul(1_000).clamp(INHALE_MIN_MS, INHALE_MAX_MS);
    }

    pub fn set_exhale_secs(&mut self, secs: u64) {
        self.exhale_ms = secs.saturating_mul(1_000).clamp(EXHALE_MIN_MS, EXHALE_MAX_MS);
    }

    /// Clamp both durations into bounds. Used when loading persisted values
    /// that may have been written by hand or by an older build.
    pub fn clamped(self) -> Self {
        Self {
            inhale_ms: self.inhale_ms.clamp(INHALE_MIN_MS, INHALE_MAX_MS),
            exhale_ms: self.exhale_ms.clamp(EXHALE_MIN_MS, EXHALE_MAX_MS),
            enabled: self.enabled,
        }
    }

    /// Restore the documented defaults (4s inhale, 6s exhale, enabled).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
