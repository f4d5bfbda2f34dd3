use chrono::Utc;
use clap::Subcommand;
use laborpace_core::storage::Database;
use laborpace_core::{history, pattern, Event};

use super::contraction::{load_latch, load_recorder, save_latch};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List recorded contractions, newest first, as JSON
    List,
    /// Delete every recorded contraction
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut history = db.load_history();

    match action {
        HistoryAction::List => {
            let rows = history::project(&history);
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        HistoryAction::Clear => {
            let recorder = load_recorder(&db);
            let removed = recorder.clear_history(&mut history)?;
            db.save_history(&history)?;

            // An empty history evaluates Normal; feeding that through the
            // latch re-arms it for the next Critical detection.
            let mut latch = load_latch(&db);
            latch.observe(pattern::evaluate(&history));
            save_latch(&db, &latch)?;

            let event = Event::HistoryCleared {
                removed,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }
    Ok(())
}
