use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use laborpace_core::storage::Database;
use laborpace_core::{BreathPhase, BreathingScheduler, Clock, Event, PendingPhase, SystemClock};

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Run a paced breathing session in the foreground
    Run {
        /// Number of full inhale/exhale cycles
        #[arg(long, default_value = "5")]
        cycles: u64,
    },
}

pub fn run(action: BreatheAction) -> Result<(), Box<dyn std::error::Error>> {
    let BreatheAction::Run { cycles } = action;
    let db = Database::open()?;
    let clock = SystemClock;
    let mut scheduler = BreathingScheduler::new(db.load_settings());

    let Some(mut pending) = scheduler.start(clock.now_ms()) else {
        let event = Event::BreathingDisabled { at: Utc::now() };
        println!("{}", serde_json::to_string_pretty(&event)?);
        return Ok(());
    };

    loop {
        if session_complete(pending.phase, scheduler.cycle_count(), cycles) {
            let completed = scheduler.stop();
            let event = Event::BreathingStopped {
                cycles_completed: completed,
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
            break;
        }

        print_phase(&pending)?;
        let wait = pending.deadline_ms.saturating_sub(clock.now_ms());
        thread::sleep(Duration::from_millis(wait));

        match scheduler.fire(pending.token, clock.now_ms()) {
            Some(next) => pending = next,
            None => break,
        }
    }
    Ok(())
}

/// A session is done when it is back at an inhale with the requested number
/// of cycles behind it. A target of zero completes before the first phase.
fn session_complete(phase: BreathPhase, completed: u64, target: u64) -> bool {
    phase == BreathPhase::Inhale && completed >= target
}

fn print_phase(pending: &PendingPhase) -> Result<(), Box<dyn std::error::Error>> {
    let event = Event::BreathPhaseStarted {
        phase: pending.phase,
        cycle: pending.cycle,
        duration_ms: pending.duration_ms,
        at: Utc::now(),
    };
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
