//! SQLite-backed key-value store.
//!
//! Holds the contraction history blob, the breathing settings blob, and
//! scratch state the CLI parks between invocations (recorder, alert latch).
//! Values are JSON strings; integer millisecond timestamps round-trip
//! exactly.
//!
//! Reads are best-effort: a missing or unreadable blob falls back to the
//! type's default so a single bad write never takes the app down. Writes
//! propagate a [`StorageError`].

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{de::DeserializeOwned, Serialize};

use crate::breathing::BreathingSettings;
use crate::error::StorageError;
use crate::history::ContractionHistory;

use super::{data_dir, debug_log};

pub const HISTORY_KEY: &str = "history";
pub const SETTINGS_KEY: &str = "settings";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/laborpace/laborpace.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("laborpace.db");
        Self::open_at(&path)
    }

    /// Open at an explicit path (tests point this at a tempdir).
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::Query)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the contraction history, falling back to empty on any read error.
    pub fn load_history(&self) -> ContractionHistory {
        self.load_json(HISTORY_KEY)
    }

    /// # Errors
    /// Returns an error if the history cannot be encoded or written.
    pub fn save_history(&self, history: &ContractionHistory) -> Result<(), StorageError> {
        self.save_json(HISTORY_KEY, history)
    }

    /// Load breathing settings, falling back to defaults on any read error.
    /// Persisted durations are re-clamped in case they were edited by hand.
    pub fn load_settings(&self) -> BreathingSettings {
        self.load_json::<BreathingSettings>(SETTINGS_KEY).clamped()
    }

    /// # Errors
    /// Returns an error if the settings cannot be encoded or written.
    pub fn save_settings(&self, settings: &BreathingSettings) -> Result<(), StorageError> {
        self.save_json(SETTINGS_KEY, settings)
    }

    fn load_json<T: DeserializeOwned + Default>(&self, key: &'static str) -> T {
        match self.kv_get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                debug_log(&format!("corrupt blob for '{key}', using default: {e}"));
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                debug_log(&format!("read failed for '{key}', using default: {e}"));
                T::default()
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
        self.kv_set(key, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ContractionRecord;

    #[test]
    fn kv_get_set_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "updated").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "updated");
    }

    #[test]
    fn history_roundtrips_through_store() {
        let db = Database::open_memory().unwrap();
        let mut history = ContractionHistory::new();
        history
            .push(ContractionRecord {
                id: "66000".into(),
                start_ms: 1_000,
                end_ms: 66_000,
                duration_ms: 65_000,
                interval_ms: 0,
            })
            .unwrap();
        history
            .push(ContractionRecord {
                id: "370000".into(),
                start_ms: 300_000,
                end_ms: 370_000,
                duration_ms: 70_000,
                interval_ms: 234_000,
            })
            .unwrap();

        db.save_history(&history).unwrap();
        assert_eq!(db.load_history(), history);
    }

    #[test]
    fn missing_blobs_load_as_defaults() {
        let db = Database::open_memory().unwrap();
        assert!(db.load_history().is_empty());
        assert_eq!(db.load_settings(), BreathingSettings::default());
    }

    #[test]
    fn corrupt_blobs_load_as_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set(HISTORY_KEY, "not json").unwrap();
        db.kv_set(SETTINGS_KEY, "{\"inhale_ms\": \"bad\"}").unwrap();
        assert!(db.load_history().is_empty());
        assert_eq!(db.load_settings(), BreathingSettings::default());
    }

    #[test]
    fn out_of_bounds_settings_are_clamped_on_load() {
        let db = Database::open_memory().unwrap();
        db.kv_set(
            SETTINGS_KEY,
            "{\"inhale_ms\": 100, \"exhale_ms\": 60000, \"enabled\": true}",
        )
        .unwrap();
        let settings = db.load_settings();
        assert_eq!(settings.inhale_ms, 2_000);
        assert_eq!(settings.exhale_ms, 12_000);
    }
}
