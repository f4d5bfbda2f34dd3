use clap::Subcommand;
use laborpace_core::storage::Database;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current breathing settings as JSON
    Show,
    /// Update settings; out-of-range durations are clamped, then saved
    Set {
        /// Inhale duration in seconds (2-8)
        #[arg(long)]
        inhale_secs: Option<u64>,
        /// Exhale duration in seconds (2-12)
        #[arg(long)]
        exhale_secs: Option<u64>,
        /// Enable or disable the pacer
        #[arg(long)]
        enabled: Option<bool>,
    },
    /// Restore the defaults (4s inhale, 6s exhale, enabled)
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut settings = db.load_settings();

    match action {
        SettingsAction::Show => {}
        SettingsAction::Set {
            inhale_secs,
            exhale_secs,
            enabled,
        } => {
            if let Some(secs) = inhale_secs {
                settings.set_inhale_secs(secs);
            }
            if let Some(secs) = exhale_secs {
                settings.set_exhale_secs(secs);
            }
            if let Some(enabled) = enabled {
                settings.enabled = enabled;
            }
            db.save_settings(&settings)?;
        }
        SettingsAction::Reset => {
            settings.reset();
            db.save_settings(&settings)?;
        }
    }

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
