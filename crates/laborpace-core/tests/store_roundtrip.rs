//! On-disk persistence round-trips.

use laborpace_core::storage::Database;
use laborpace_core::{
    BreathingSettings, Clock, ContractionHistory, ContractionRecorder, ManualClock,
};

#[test]
fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laborpace.db");

    let clock = ManualClock::new(1_700_000_000_000);
    let mut recorder = ContractionRecorder::new();
    let mut history = ContractionHistory::new();

    for _ in 0..4 {
        recorder.start(clock.now_ms()).unwrap();
        clock.advance(65_000);
        recorder.stop(clock.now_ms(), &mut history).unwrap();
        clock.advance(240_000);
    }

    {
        let db = Database::open_at(&path).unwrap();
        db.save_history(&history).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let loaded = db.load_history();
    assert_eq!(loaded, history);
    assert_eq!(loaded.len(), 4);
    // Millisecond timestamps round-trip exactly.
    assert_eq!(loaded.records()[0].start_ms, history.records()[0].start_ms);
    assert_eq!(loaded.records()[3].interval_ms, 240_000);
}

#[test]
fn settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laborpace.db");

    let mut settings = BreathingSettings::default();
    settings.set_inhale_secs(7);
    settings.set_exhale_secs(9);
    settings.enabled = false;

    {
        let db = Database::open_at(&path).unwrap();
        db.save_settings(&settings).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    assert_eq!(db.load_settings(), settings);
}
