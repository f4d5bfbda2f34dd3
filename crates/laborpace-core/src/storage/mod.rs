mod database;

pub use database::{Database, HISTORY_KEY, SETTINGS_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/laborpace[-dev]/` based on LABORPACE_ENV.
///
/// Set LABORPACE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LABORPACE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("laborpace-dev")
    } else {
        base_dir.join("laborpace")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Best-effort diagnostics for self-healed failures; silent unless
/// LABORPACE_DEBUG is set.
pub(crate) fn debug_log(msg: &str) {
    if std::env::var("LABORPACE_DEBUG").is_ok() {
        eprintln!("laborpace: {msg}");
    }
}
