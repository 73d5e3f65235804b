//! Backup restoration for JournalMe
//!
//! Handles validating and restoring data from backup archives. Every section
//! is checked against its model before anything on disk is overwritten.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::paths::JournalPaths;
use crate::error::{JournalError, JournalResult};
use crate::models::{
    AppState, Debt, ExpectedIncome, FinanceState, Goal, JournalEntry, RecurringObligation, Task,
};
use crate::storage::write_json_atomic;

use super::manager::{sections, BackupArchive, BACKUP_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: JournalPaths,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: JournalPaths) -> Self {
        Self { paths }
    }

    /// Restore data from a backup file
    ///
    /// This will overwrite all current data with the backup contents.
    pub fn restore_from_file(&self, backup_path: &Path) -> JournalResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    /// Restore data from a parsed backup archive
    pub fn restore_from_archive(&self, archive: &BackupArchive) -> JournalResult<RestoreResult> {
        let validation = validate_archive(archive);
        if !validation.problems.is_empty() {
            return Err(JournalError::Backup(format!(
                "Refusing to restore invalid backup: {}",
                validation.problems.join("; ")
            )));
        }

        self.paths.ensure_directories()?;

        let mut restored = Vec::new();
        for (name, path, _) in sections(&self.paths) {
            match archive.section(name) {
                Some(value) if !value.is_null() => {
                    write_json_atomic(&path, value)?;
                    restored.push(name);
                }
                _ => {}
            }
        }

        info!(sections = restored.len(), backup_date = %archive.created_at, "backup restored");
        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            restored,
        })
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> JournalResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        Ok(validate_archive(&archive))
    }
}

fn read_archive(backup_path: &Path) -> JournalResult<BackupArchive> {
    let contents = fs::read_to_string(backup_path)
        .map_err(|e| JournalError::Io(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| JournalError::Json(format!("Failed to parse backup file: {}", e)))
}

/// Check every section parses as the model it holds
fn validate_archive(archive: &BackupArchive) -> ValidationResult {
    let mut present = Vec::new();
    let mut missing = Vec::new();
    let mut problems = Vec::new();

    if archive.schema_version > BACKUP_SCHEMA_VERSION {
        problems.push(format!(
            "backup schema v{} is newer than supported v{}",
            archive.schema_version, BACKUP_SCHEMA_VERSION
        ));
    }

    let checks: [(&'static str, &serde_json::Value, SectionCheck); SECTION_COUNT] = [
        ("obligations", &archive.obligations, check::<Vec<RecurringObligation>>),
        ("debts", &archive.debts, check::<Vec<Debt>>),
        ("income", &archive.income, check::<Vec<ExpectedIncome>>),
        ("finance", &archive.finance, check::<FinanceState>),
        ("entries", &archive.entries, check::<Vec<JournalEntry>>),
        ("tasks", &archive.tasks, check::<Vec<Task>>),
        ("goals", &archive.goals, check::<Vec<Goal>>),
        ("state", &archive.state, check::<AppState>),
    ];

    for (name, value, parses) in checks {
        if value.is_null() {
            missing.push(name);
            continue;
        }
        match parses(value) {
            Ok(()) => present.push(name),
            Err(e) => problems.push(format!("{}: {}", name, e)),
        }
    }

    ValidationResult {
        schema_version: archive.schema_version,
        backup_date: archive.created_at,
        present,
        missing,
        problems,
    }
}

type SectionCheck = fn(&serde_json::Value) -> Result<(), String>;

fn check<T: DeserializeOwned>(value: &serde_json::Value) -> Result<(), String> {
    T::deserialize(value).map(|_| ()).map_err(|e| e.to_string())
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Schema version of the restored backup
    pub schema_version: u32,
    /// Date the backup was created
    pub backup_date: DateTime<Utc>,
    /// Sections written back to disk
    pub restored: Vec<&'static str>,
}

impl RestoreResult {
    /// Check if all data was restored
    pub fn all_restored(&self) -> bool {
        self.restored.len() == SECTION_COUNT
    }

    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!("Restored: {}", self.restored.join(", "))
    }
}

const SECTION_COUNT: usize = 8;

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    /// Schema version of the backup
    pub schema_version: u32,
    /// Date the backup was created
    pub backup_date: DateTime<Utc>,
    /// Sections present and well-formed
    pub present: Vec<&'static str>,
    /// Sections absent from the archive
    pub missing: Vec<&'static str>,
    /// Reasons the archive cannot be restored
    pub problems: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// Check if all expected data is present
    pub fn is_complete(&self) -> bool {
        self.is_valid() && self.missing.is_empty()
    }

    /// Get a summary of what data is present
    pub fn summary(&self) -> String {
        if !self.is_valid() {
            format!(
                "Invalid backup (v{}): {}",
                self.schema_version,
                self.problems.join("; ")
            )
        } else if self.missing.is_empty() {
            format!("Complete backup (v{})", self.schema_version)
        } else {
            format!(
                "Partial backup (v{}): has {}, missing {}",
                self.schema_version,
                self.present.join(", "),
                self.missing.join(", ")
            )
        }
    }
}
