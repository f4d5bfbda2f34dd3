//! Contraction records and the append-only history.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// A single completed contraction. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionRecord {
    /// Unique id, derived from the end timestamp.
    pub id: String,
    /// Start of the contraction, epoch milliseconds.
    pub start_ms: u64,
    /// End of the contraction, epoch milliseconds.
    pub end_ms: u64,
    /// `end_ms - start_ms`.
    pub duration_ms: u64,
    /// Gap since the previous record's end; 0 when there is no prior record.
    pub interval_ms: u64,
}

/// Ordered, append-only sequence of contraction records.
///
/// Insertion order is chronological order: `push` rejects a record that
/// starts before the previous record ends, so `records[i].start_ms >=
/// records[i-1].end_ms` holds for every i > 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractionHistory {
    records: Vec<ContractionRecord>,
}

impl ContractionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ContractionRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[ContractionRecord] {
        &self.records
    }

    /// Append a record, enforcing chronological ordering.
    pub fn push(&mut self, record: ContractionRecord) -> Result<(), StateError> {
        if let Some(prev) = self.records.last() {
            if record.start_ms < prev.end_ms {
                return Err(StateError::OutOfOrder {
                    start_ms: record.start_ms,
                    end_ms: prev.end_ms,
                });
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Remove every record. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }
}

/// Row in the history view.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub started_at: String,
    pub ended_at: String,
    pub duration: String,
    /// Absent for the first-ever record (no prior contraction to measure from).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

/// Project the history into display rows, newest first.
pub fn project(history: &ContractionHistory) -> Vec<HistoryEntry> {
    history
        .records()
        .iter()
        .rev()
        .map(|r| HistoryEntry {
            started_at: format_clock(r.start_ms),
            ended_at: format_clock(r.end_ms),
            duration: format_duration(r.duration_ms),
            interval: (r.interval_ms > 0).then(|| format_duration(r.interval_ms)),
        })
        .collect()
}

/// "1m 5s" / "45s" style duration label.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    if minutes > 0 {
        format!("{minutes}m {remaining}s")
    } else {
        format!("{remaining}s")
    }
}

fn format_clock(epoch_ms: u64) -> String {
    match Local.timestamp_millis_opt(epoch_ms as i64).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => String::from("--:--:--"),
    }
}
