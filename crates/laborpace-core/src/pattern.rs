//! 5-1-1 pattern evaluation over the contraction history.
//!
//! The obstetric 5-1-1 heuristic: contractions every 5 minutes, lasting
//! 1 minute, sustained for 1 hour. Evaluation is a pure function of the
//! history; the same input always yields the same output.

use serde::{Deserialize, Serialize};

use crate::history::ContractionHistory;

/// Number of trailing records the 5-1-1 check examines.
pub const WINDOW: usize = 6;
/// Each contraction lasts at least one minute.
pub const MIN_DURATION_MS: u64 = 60 * 1000;
/// At most five minutes from one contraction's end to the next start.
pub const MAX_GAP_MS: u64 = 5 * 60 * 1000;
/// The pattern has held for at least one hour.
pub const MIN_SPAN_MS: u64 = 60 * 60 * 1000;
/// Elevated threshold: 80% of the duration bar.
pub const NEAR_DURATION_MS: u64 = MIN_DURATION_MS * 8 / 10;
/// Elevated threshold: 120% of the gap bar.
pub const NEAR_INTERVAL_MS: u64 = MAX_GAP_MS * 12 / 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    #[default]
    Normal,
    Elevated,
    Critical,
}

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub level: WarningLevel,
    pub hospital_alert: bool,
}

impl Evaluation {
    const NORMAL: Self = Self {
        level: WarningLevel::Normal,
        hospital_alert: false,
    };
}

/// Evaluate the history against the 5-1-1 rule.
///
/// Critical requires all of: a full window of records, every one lasting at
/// least a minute, no gap above five minutes, and the window spanning an
/// hour. Short of that, the last three records are checked against relaxed
/// "near" thresholds for an Elevated level. A record with `interval_ms == 0`
/// (no prior contraction) can only qualify as near on its duration.
pub fn evaluate(history: &ContractionHistory) -> Evaluation {
    let records = history.records();
    if records.len() < WINDOW {
        return Evaluation::NORMAL;
    }
    let recent = &records[records.len() - WINDOW..];

    let meets_511 = recent.iter().all(|r| r.duration_ms >= MIN_DURATION_MS)
        && recent
            .windows(2)
            .all(|pair| pair[1].start_ms.saturating_sub(pair[0].end_ms) <= MAX_GAP_MS);

    let span_ms = recent[WINDOW - 1].end_ms.saturating_sub(recent[0].start_ms);

    if meets_511 && span_ms >= MIN_SPAN_MS {
        return Evaluation {
            level: WarningLevel::Critical,
            hospital_alert: true,
        };
    }

    let near = recent[WINDOW - 3..].iter().all(|r| {
        r.duration_ms >= NEAR_DURATION_MS
            || (r.interval_ms > 0 && r.interval_ms <= NEAR_INTERVAL_MS)
    });
    let level = if near {
        WarningLevel::Elevated
    } else {
        WarningLevel::Normal
    };
    Evaluation {
        level,
        hospital_alert: false,
    }
}

/// Edge-trigger for the hospital alert.
///
/// Reports `true` exactly once per transition into Critical, so a
/// collaborator can raise a dialog or haptic pulse once rather than on every
/// re-evaluation while the level stays Critical.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AlertLatch {
    was_critical: bool,
}

impl AlertLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest evaluation; returns whether a fresh alert fired.
    pub fn observe(&mut self, eval: Evaluation) -> bool {
        let critical = eval.hospital_alert;
        let fired = critical && !self.was_critical;
        self.was_critical = critical;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ContractionRecord;

    /// Build a history of `count` contractions, each lasting `duration_ms`
    /// with `gap_ms` between one end and the next start.
    fn uniform_history(count: usize, duration_ms: u64, gap_ms: u64) -> ContractionHistory {
        let mut history = ContractionHistory::new();
        let mut start = 0u64;
        for i in 0..count {
            let end = start + duration_ms;
            history
                .push(ContractionRecord {
                    id: end.to_string(),
                    start_ms: start,
                    end_ms: end,
                    duration_ms,
                    interval_ms: if i == 0 { 0 } else { gap_ms },
                })
                .unwrap();
            start = end + gap_ms;
        }
        history
    }

    #[test]
    fn short_history_is_normal() {
        for count in 0..WINDOW {
            let history = uniform_history(count, 120_000, 60_000);
            assert_eq!(evaluate(&history), Evaluation::NORMAL, "count={count}");
        }
    }

    #[test]
    fn full_pattern_is_critical() {
        // Six 11-minute contractions back to back: every duration over a
        // minute, every gap zero, span 66 minutes.
        let history = uniform_history(WINDOW, 11 * 60 * 1000, 0);
        assert_eq!(
            evaluate(&history),
            Evaluation {
                level: WarningLevel::Critical,
                hospital_alert: true
            }
        );
    }

    #[test]
    fn critical_with_five_minute_gaps() {
        // 65s durations, 5-minute gaps: span = 6*65s + 5*300s = 31.5 min...
        // not enough on its own, so stretch durations to reach the hour.
        let history = uniform_history(WINDOW, 65_000, MAX_GAP_MS);
        let span = history.last().unwrap().end_ms - history.records()[0].start_ms;
        assert!(span < MIN_SPAN_MS);
        assert_ne!(evaluate(&history).level, WarningLevel::Critical);

        let history = uniform_history(WINDOW, 7 * 60 * 1000, MAX_GAP_MS);
        let span = history.last().unwrap().end_ms - history.records()[0].start_ms;
        assert!(span >= MIN_SPAN_MS);
        assert_eq!(evaluate(&history).level, WarningLevel::Critical);
        assert!(evaluate(&history).hospital_alert);
    }

    #[test]
    fn short_span_never_critical() {
        // Pattern matches 5-1-1 per-record bars but only spans 50 minutes.
        let history = uniform_history(WINDOW, 65_000, 8 * 60 * 1000 + 35_000);
        let span = history.last().unwrap().end_ms - history.records()[0].start_ms;
        assert!(span < MIN_SPAN_MS);
        let eval = evaluate(&history);
        assert_ne!(eval.level, WarningLevel::Critical);
        assert!(!eval.hospital_alert);
    }

    #[test]
    fn wide_gap_breaks_the_pattern() {
        // Durations qualify and span exceeds an hour, but gaps are 10 min.
        let history = uniform_history(WINDOW, 65_000, 10 * 60 * 1000);
        let eval = evaluate(&history);
        assert_ne!(eval.level, WarningLevel::Critical);
    }

    #[test]
    fn near_durations_are_elevated() {
        // 50s contractions with wide gaps: not 5-1-1, but the last three all
        // clear the 48s near-duration bar.
        let history = uniform_history(WINDOW, 50_000, 20 * 60 * 1000);
        assert_eq!(evaluate(&history).level, WarningLevel::Elevated);
    }

    #[test]
    fn near_intervals_are_elevated() {
        // 20s contractions every 5 minutes: durations miss both bars but the
        // recorded intervals are within the 6-minute near bar.
        let history = uniform_history(WINDOW, 20_000, MAX_GAP_MS);
        assert_eq!(evaluate(&history).level, WarningLevel::Elevated);
    }

    #[test]
    fn zero_interval_only_qualifies_on_duration() {
        // Last three records all have interval_ms forced to 0 and short
        // durations; the interval branch must not fire.
        let mut history = uniform_history(WINDOW, 20_000, 20 * 60 * 1000);
        let mut records: Vec<_> = history.records().to_vec();
        for r in records.iter_mut().skip(WINDOW - 3) {
            r.interval_ms = 0;
        }
        history = ContractionHistory::new();
        for r in records {
            history.push(r).unwrap();
        }
        assert_eq!(evaluate(&history).level, WarningLevel::Normal);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let history = uniform_history(WINDOW, 65_000, MAX_GAP_MS);
        assert_eq!(evaluate(&history), evaluate(&history));
    }

    #[test]
    fn latch_fires_once_per_critical_transition() {
        let critical = Evaluation {
            level: WarningLevel::Critical,
            hospital_alert: true,
        };
        let mut latch = AlertLatch::new();
        assert!(latch.observe(critical));
        assert!(!latch.observe(critical));
        assert!(!latch.observe(Evaluation::NORMAL));
        assert!(latch.observe(critical));
    }
}
