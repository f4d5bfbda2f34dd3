//! Two-phase breathing pacer.
//!
//! The scheduler is a wall-clock state machine; it owns no timer. `start`
//! and each successful `fire` hand back a [`PendingPhase`] naming the phase
//! deadline and a one-shot token. The caller suspends until the deadline and
//! calls `fire(token, now)`. `stop` invalidates the outstanding token, so a
//! sleep that was already in flight when the session ended resolves to a
//! no-op instead of a stale transition.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Inhale -> Exhale -> Inhale -> ... -> Idle (stop only)
//! ```

use serde::{Deserialize, Serialize};

use super::settings::BreathingSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Exhale,
}

/// One-shot handle for a scheduled phase expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseToken(u64);

/// A phase entry plus the suspension the caller owes the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPhase {
    pub phase: BreathPhase,
    /// Completed inhale/exhale cycles before this phase.
    pub cycle: u64,
    pub duration_ms: u64,
    /// Epoch milliseconds at which the caller should `fire` the token.
    pub deadline_ms: u64,
    pub token: PhaseToken,
}

/// Transient session snapshot for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub active: bool,
    pub phase: Option<BreathPhase>,
    pub cycle_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingScheduler {
    settings: BreathingSettings,
    active: bool,
    phase: Option<BreathPhase>,
    cycle_count: u64,
    phase_started_ms: u64,
    phase_duration_ms: u64,
    /// Generation counter; only the most recently issued token is live.
    next_token: u64,
    pending: Option<PhaseToken>,
}

impl BreathingScheduler {
    pub fn new(settings: BreathingSettings) -> Self {
        Self {
            settings: settings.clamped(),
            active: false,
            phase: None,
            cycle_count: 0,
            phase_started_ms: 0,
            phase_duration_ms: 0,
            next_token: 0,
            pending: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> Option<BreathPhase> {
        self.phase
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn settings(&self) -> &BreathingSettings {
        &self.settings
    }

    pub fn session(&self) -> SessionState {
        SessionState {
            active: self.active,
            phase: self.phase,
            cycle_count: self.cycle_count,
        }
    }

    /// Time left in the current phase, clamped to zero; 0 when idle.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if !self.active {
            return 0;
        }
        self.phase_started_ms
            .saturating_add(self.phase_duration_ms)
            .saturating_sub(now_ms)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session in the inhale phase. A disabled pacer or an already
    /// running session makes this a no-op, not an error.
    pub fn start(&mut self, now_ms: u64) -> Option<PendingPhase> {
        if !self.settings.enabled || self.active {
            return None;
        }
        self.active = true;
        self.cycle_count = 0;
        Some(self.enter_phase(BreathPhase::Inhale, now_ms))
    }

    /// Phase-expiry callback. Returns the next pending phase, or `None` when
    /// the token is stale (the session stopped or the token was superseded
    /// after it was scheduled).
    pub fn fire(&mut self, token: PhaseToken, now_ms: u64) -> Option<PendingPhase> {
        if !self.active || self.pending != Some(token) {
            return None;
        }
        match self.phase {
            Some(BreathPhase::Inhale) => Some(self.enter_phase(BreathPhase::Exhale, now_ms)),
            Some(BreathPhase::Exhale) => {
                self.cycle_count += 1;
                Some(self.enter_phase(BreathPhase::Inhale, now_ms))
            }
            None => None,
        }
    }

    /// End the session and cancel the outstanding phase. Idempotent. Returns
    /// the number of cycles completed.
    pub fn stop(&mut self) -> u64 {
        self.active = false;
        self.phase = None;
        self.pending = None;
        self.phase_duration_ms = 0;
        self.cycle_count
    }

    /// Swap in new settings, clamped to bounds. Takes effect on the next
    /// phase entry; an in-flight phase keeps its already-scheduled duration.
    pub fn reconfigure(&mut self, settings: BreathingSettings) {
        self.settings = settings.clamped();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_phase(&mut self, phase: BreathPhase, now_ms: u64) -> PendingPhase {
        // Durations are re-read from settings here, which is what gives
        // `reconfigure` its next-phase-entry semantics.
        let duration_ms = match phase {
            BreathPhase::Inhale => self.settings.inhale_ms,
            BreathPhase::Exhale => self.settings.exhale_ms,
        };
        self.phase = Some(phase);
        self.phase_started_ms = now_ms;
        self.phase_duration_ms = duration_ms;
        let token = PhaseToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
        PendingPhase {
            phase,
            cycle: self.cycle_count,
            duration_ms,
            deadline_ms: now_ms.saturating_add(duration_ms),
            token,
        }
    }
}
