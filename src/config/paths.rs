//! Path management for JournalMe
//!
//! ## Path Resolution Order
//!
//! 1. `JOURNALME_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/journalme` on Linux, `%APPDATA%\journalme` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::JournalError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "JOURNALME_DATA_DIR";

/// Manages all paths used by JournalMe
#[derive(Debug, Clone)]
pub struct JournalPaths {
    base_dir: PathBuf,
}

impl JournalPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, JournalError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create JournalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Recurring monthly obligations
    pub fn obligations_file(&self) -> PathBuf {
        self.data_dir().join("obligations.json")
    }

    pub fn debts_file(&self) -> PathBuf {
        self.data_dir().join("debts.json")
    }

    /// Pending expected income
    pub fn income_file(&self) -> PathBuf {
        self.data_dir().join("income.json")
    }

    /// Cash balance and today's spend log
    pub fn finance_file(&self) -> PathBuf {
        self.data_dir().join("finance.json")
    }

    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir().join("tasks.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    /// Score, day-boundary markers and advisor usage
    pub fn state_file(&self) -> PathBuf {
        self.data_dir().join("state.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), JournalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| JournalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| JournalError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| JournalError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }

    /// Check if JournalMe has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, JournalError> {
    ProjectDirs::from("", "", "journalme")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| JournalError::Config("Could not determine a home directory".into()))
}
