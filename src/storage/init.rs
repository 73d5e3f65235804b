//! Storage initialization
//!
//! Handles first-run setup: directories, the settings file and a state file
//! carrying the configured starting score.

use crate::config::paths::JournalPaths;
use crate::config::settings::Settings;
use crate::error::JournalError;
use crate::models::AppState;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &JournalPaths, settings: &Settings) -> Result<(), JournalError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !paths.state_file().exists() {
        write_json_atomic(paths.state_file(), &AppState::with_score(settings.starting_score))?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &JournalPaths) -> bool {
    !paths.settings_file().exists() || !paths.state_file().exists()
}
