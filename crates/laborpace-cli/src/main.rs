use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "laborpace", version, about = "Contraction timer with a breathing pacer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Contraction timing
    Contraction {
        #[command(subcommand)]
        action: commands::contraction::ContractionAction,
    },
    /// Recorded contraction history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Breathing pacer settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Run a paced breathing session
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Print the full state snapshot as JSON
    Status,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Contraction { action } => commands::contraction::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Status => commands::contraction::status(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
