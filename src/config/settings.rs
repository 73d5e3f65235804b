//! User settings for JournalMe
//!
//! Manages user preferences: currency display, backup retention, the
//! survival-budget divisor used when no obligations are tracked, the daily
//! advisor limit and the discipline score baseline.

use serde::{Deserialize, Serialize};

use super::paths::JournalPaths;
use crate::error::JournalError;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings for JournalMe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Take one automatic backup per day before the first mutation
    #[serde(default = "default_true")]
    pub auto_backup: bool,

    /// Days the balance is spread over when no obligation constrains it
    #[serde(default = "default_unconstrained_divisor")]
    pub unconstrained_divisor: u32,

    /// Maximum advisor plan requests per day
    #[serde(default = "default_ai_daily_limit")]
    pub ai_daily_limit: u32,

    /// External planner command (program then arguments). It receives the
    /// prompt on stdin and must print a JSON array of task strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_command: Option<Vec<String>>,

    /// Discipline score a fresh installation starts with
    #[serde(default = "default_starting_score")]
    pub starting_score: i64,

    /// Default tracing filter level when `JOURNALME_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_true() -> bool {
    true
}

fn default_unconstrained_divisor() -> u32 {
    30
}

fn default_ai_daily_limit() -> u32 {
    50
}

fn default_starting_score() -> i64 {
    100
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            backup_retention: BackupRetention::default(),
            auto_backup: default_true(),
            unconstrained_divisor: default_unconstrained_divisor(),
            ai_daily_limit: default_ai_daily_limit(),
            advisor_command: None,
            starting_score: default_starting_score(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &JournalPaths) -> Result<Self, JournalError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| JournalError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                JournalError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &JournalPaths) -> Result<(), JournalError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| JournalError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| JournalError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.unconstrained_divisor == 0 {
            return Err(JournalError::Config(
                "unconstrained_divisor must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.unconstrained_divisor, 30);
        assert_eq!(settings.ai_daily_limit, 50);
        assert_eq!(settings.starting_score, 100);
        assert_eq!(settings.backup_retention.daily_count, 30);
        assert_eq!(settings.backup_retention.monthly_count, 12);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.ai_daily_limit = 3;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.ai_daily_limit, 3);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.unconstrained_divisor, 30);
        assert!(settings.auto_backup);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"unconstrained_divisor": 0}"#).unwrap();

        assert!(Settings::load_or_create(&paths).is_err());
    }
}
