//! Backup system for JournalMe
//!
//! Provides rolling backups with configurable retention policies and
//! restore functionality.
//!
//! # Architecture
//!
//! - `BackupManager`: Creates backups, enforces retention and takes the
//!   once-a-day automatic backup
//! - `RestoreManager`: Validates and restores backups
//!
//! # Backup Format
//!
//! Backups are JSON files named `backup-YYYYMMDD-HHMMSS-mmm.json` holding:
//! - `schema_version` and `created_at`
//! - one section per data file: `obligations`, `debts`, `income`,
//!   `finance`, `entries`, `tasks`, `goals`, `state`
//!
//! # Retention Policy
//!
//! By default, the system keeps:
//! - 30 daily backups
//! - 12 monthly backups (first backup of each month)
//!
//! # Example
//!
//! ```rust,ignore
//! use journalme::backup::{BackupManager, RestoreManager};
//! use journalme::config::{paths::JournalPaths, settings::BackupRetention};
//!
//! let paths = JournalPaths::new()?;
//! let backup_manager = BackupManager::new(paths.clone(), BackupRetention::default());
//! let backup_path = backup_manager.create_backup()?;
//!
//! let restore_manager = RestoreManager::new(paths);
//! let result = restore_manager.restore_from_file(&backup_path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, BACKUP_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
