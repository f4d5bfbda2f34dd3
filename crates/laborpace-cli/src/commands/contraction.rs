use chrono::Utc;
use clap::Subcommand;
use laborpace_core::storage::Database;
use laborpace_core::{
    pattern, AlertLatch, BreathingScheduler, Clock, ContractionRecorder, Event, SystemClock,
};

const RECORDER_KEY: &str = "recorder";
const ALERT_KEY: &str = "alert_latch";

#[derive(Subcommand)]
pub enum ContractionAction {
    /// Mark the start of a contraction
    Start,
    /// Mark the end of a contraction and evaluate the history
    Stop,
    /// Print current recording state as JSON
    Status,
}

pub(crate) fn load_recorder(db: &Database) -> ContractionRecorder {
    if let Ok(Some(json)) = db.kv_get(RECORDER_KEY) {
        if let Ok(recorder) = serde_json::from_str::<ContractionRecorder>(&json) {
            return recorder;
        }
    }
    ContractionRecorder::new()
}

fn save_recorder(
    db: &Database,
    recorder: &ContractionRecorder,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(recorder)?;
    db.kv_set(RECORDER_KEY, &json)?;
    Ok(())
}

pub(crate) fn load_latch(db: &Database) -> AlertLatch {
    if let Ok(Some(json)) = db.kv_get(ALERT_KEY) {
        if let Ok(latch) = serde_json::from_str::<AlertLatch>(&json) {
            return latch;
        }
    }
    AlertLatch::new()
}

pub(crate) fn save_latch(
    db: &Database,
    latch: &AlertLatch,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(latch)?;
    db.kv_set(ALERT_KEY, &json)?;
    Ok(())
}

pub fn run(action: ContractionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut recorder = load_recorder(&db);

    match action {
        ContractionAction::Start => {
            let now = SystemClock.now_ms();
            recorder.start(now)?;
            save_recorder(&db, &recorder)?;
            let event = Event::ContractionStarted {
                start_ms: now,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        ContractionAction::Stop => {
            let now = SystemClock.now_ms();
            let mut history = db.load_history();
            let record = recorder.stop(now, &mut history)?;
            db.save_history(&history)?;
            save_recorder(&db, &recorder)?;

            let eval = pattern::evaluate(&history);
            let mut latch = load_latch(&db);
            let fresh_alert = latch.observe(eval);
            save_latch(&db, &latch)?;

            let event = Event::ContractionRecorded {
                record,
                level: eval.level,
                hospital_alert: eval.hospital_alert,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
            if fresh_alert {
                let alert = Event::HospitalAlert { at: Utc::now() };
                println!("{}", serde_json::to_string_pretty(&alert)?);
            }
        }
        ContractionAction::Status => status()?,
    }
    Ok(())
}

/// Print the full render-state tuple.
pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let recorder = load_recorder(&db);
    let history = db.load_history();
    let eval = pattern::evaluate(&history);
    // Breathing runs only inside `breathe run`, so outside it the session
    // is idle.
    let scheduler = BreathingScheduler::new(db.load_settings());

    let event = Event::Snapshot {
        recording: recorder.is_recording(),
        history_len: history.len(),
        level: eval.level,
        hospital_alert: eval.hospital_alert,
        breathing: scheduler.session(),
        at: Utc::now(),
    };
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
