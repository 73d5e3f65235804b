//! Backup manager for JournalMe
//!
//! Handles rolling backups with configurable retention policies. Backups are
//! stored as timestamped JSON archives holding every data file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::paths::JournalPaths;
use crate::config::settings::BackupRetention;
use crate::engine::has_day_changed;
use crate::error::{JournalError, JournalResult};
use crate::storage::Storage;

/// Current archive schema version
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Whether this is the first backup of its month (kept longer)
    pub is_monthly: bool,
}

/// Backup archive format
///
/// Each section is the raw content of one data file so an archive can be
/// restored even if a model gained fields since it was written.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    /// Schema version for migration support
    pub schema_version: u32,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    pub obligations: serde_json::Value,
    pub debts: serde_json::Value,
    pub income: serde_json::Value,
    /// Cash balance and spend log
    pub finance: serde_json::Value,
    pub entries: serde_json::Value,
    pub tasks: serde_json::Value,
    pub goals: serde_json::Value,
    /// Score, markers and advisor usage
    pub state: serde_json::Value,
}

/// Kind of JSON a data file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionShape {
    List,
    Document,
}

/// Archive section name, data file and shape, in archive order
pub(crate) fn sections(paths: &JournalPaths) -> [(&'static str, PathBuf, SectionShape); 8] {
    [
        ("obligations", paths.obligations_file(), SectionShape::List),
        ("debts", paths.debts_file(), SectionShape::List),
        ("income", paths.income_file(), SectionShape::List),
        ("finance", paths.finance_file(), SectionShape::Document),
        ("entries", paths.entries_file(), SectionShape::List),
        ("tasks", paths.tasks_file(), SectionShape::List),
        ("goals", paths.goals_file(), SectionShape::List),
        ("state", paths.state_file(), SectionShape::Document),
    ]
}

impl BackupArchive {
    /// Section content by name
    pub fn section(&self, name: &str) -> Option<&serde_json::Value> {
        match name {
            "obligations" => Some(&self.obligations),
            "debts" => Some(&self.debts),
            "income" => Some(&self.income),
            "finance" => Some(&self.finance),
            "entries" => Some(&self.entries),
            "tasks" => Some(&self.tasks),
            "goals" => Some(&self.goals),
            "state" => Some(&self.state),
            _ => None,
        }
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Paths to data files
    paths: JournalPaths,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: JournalPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of all data
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> JournalResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            JournalError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = self.create_archive(now)?;

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| JournalError::Json(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&backup_path, json)
            .map_err(|e| JournalError::Io(format!("Failed to write backup file: {}", e)))?;

        info!(path = %backup_path.display(), "backup created");
        Ok(backup_path)
    }

    /// Create a backup archive from current data
    fn create_archive(&self, timestamp: DateTime<Utc>) -> JournalResult<BackupArchive> {
        let [obligations, debts, income, finance, entries, tasks, goals, state] =
            sections(&self.paths).map(|(_, path, shape)| read_json_value(&path, shape));

        Ok(BackupArchive {
            schema_version: BACKUP_SCHEMA_VERSION,
            created_at: timestamp,
            obligations: obligations?,
            debts: debts?,
            income: income?,
            finance: finance?,
            entries: entries?,
            tasks: tasks?,
            goals: goals?,
            state: state?,
        })
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> JournalResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| JournalError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| JournalError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        // The oldest backup of each calendar month is the monthly one
        backups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let mut last_month = None;
        for backup in &mut backups {
            let month = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = last_month != Some(month);
            last_month = Some(month);
        }

        backups.reverse();
        Ok(backups)
    }

    /// Backups beyond the retention policy, daily ones first
    pub fn expired_backups(&self) -> JournalResult<Vec<BackupInfo>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        Ok(daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize))
            .collect())
    }

    /// Delete every expired backup
    pub fn enforce_retention(&self) -> JournalResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for backup in self.expired_backups()? {
            fs::remove_file(&backup.path)?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(count = deleted.len(), "old backups pruned");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> JournalResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Take the automatic backup if none was taken on `today`
    ///
    /// Returns the new backup's path, or `None` when today's backup exists.
    pub fn ensure_daily_backup(
        &self,
        storage: &Storage,
        today: NaiveDate,
    ) -> JournalResult<Option<PathBuf>> {
        let last_backup = storage.state.get()?.last_auto_backup;
        if !has_day_changed(last_backup, today) {
            return Ok(None);
        }

        let (path, _) = self.create_backup_with_retention()?;
        storage
            .state
            .update(|state| state.last_auto_backup = Some(today))?;
        storage.state.save()?;

        Ok(Some(path))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Find a backup by `latest`, its filename (`.json` optional) or the UTC
    /// day it was taken (`YYYY-MM-DD`, newest of that day)
    pub fn find_backup(&self, reference: &str) -> JournalResult<Option<BackupInfo>> {
        let reference = reference.trim();
        let backups = self.list_backups()?;

        if reference.eq_ignore_ascii_case("latest") {
            return Ok(backups.into_iter().next());
        }

        let stem = reference.strip_suffix(".json").unwrap_or(reference);
        if let Some(found) = backups
            .iter()
            .find(|b| b.filename.strip_suffix(".json") == Some(stem))
        {
            return Ok(Some(found.clone()));
        }

        Ok(NaiveDate::parse_from_str(reference, "%Y-%m-%d")
            .ok()
            .and_then(|day| backups.into_iter().find(|b| b.created_at.date_naive() == day)))
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> JournalResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Parse backup info from a backup file; `is_monthly` is filled in by the caller
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();

    let date_part = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(date_part)?;

    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Read a data file as a generic Value; a missing file is an empty list or object
fn read_json_value(path: &Path, shape: SectionShape) -> JournalResult<serde_json::Value> {
    if !path.exists() {
        return Ok(match shape {
            SectionShape::List => serde_json::Value::Array(Vec::new()),
            SectionShape::Document => serde_json::Value::Object(serde_json::Map::new()),
        });
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| JournalError::Io(format!("Failed to read file for backup: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| JournalError::Json(format!("Failed to parse JSON for backup: {}", e)))
}

/// Parse a backup timestamp from the filename date part
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    // YYYYMMDD-HHMMSS or YYYYMMDD-HHMMSS-mmm
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let date_part = parts[0];
    let time_part = parts[1];
    let millis: u32 = match parts.get(2) {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };

    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = chrono::NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    Some(date.and_time(time).and_utc())
}
