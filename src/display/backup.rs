//! Backup listing

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::BackupInfo;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "File")]
    filename: String,
    #[tabled(rename = "Taken (UTC)")]
    taken: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Kept As")]
    kept_as: &'static str,
}

/// Format backups, newest first, as a table
pub fn format_backup_list(backups: &[BackupInfo]) -> String {
    if backups.is_empty() {
        return "No backups yet. Create one with: journalme backup create".to_string();
    }

    let rows: Vec<BackupRow> = backups
        .iter()
        .enumerate()
        .map(|(i, b)| BackupRow {
            index: i + 1,
            filename: b.filename.clone(),
            taken: b.created_at.format("%Y-%m-%d %H:%M").to_string(),
            size: format_kib(b.size_bytes),
            kept_as: if b.is_monthly { "monthly" } else { "daily" },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n{} backup(s)", table, backups.len())
}

fn format_kib(bytes: u64) -> String {
    format!("{:.1} KiB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn info(filename: &str, is_monthly: bool) -> BackupInfo {
        BackupInfo {
            filename: filename.into(),
            path: PathBuf::from(filename),
            created_at: Utc.with_ymd_and_hms(2025, 6, 5, 21, 30, 0).unwrap(),
            size_bytes: 3072,
            is_monthly,
        }
    }

    #[test]
    fn test_backup_table() {
        let output = format_backup_list(&[
            info("backup-20250605-213000-000.json", false),
            info("backup-20250601-080000-000.json", true),
        ]);
        assert!(output.contains("backup-20250605-213000-000.json"));
        assert!(output.contains("2025-06-05 21:30"));
        assert!(output.contains("3.0 KiB"));
        assert!(output.contains("monthly"));
        assert!(output.ends_with("2 backup(s)"));
    }

    #[test]
    fn test_no_backups() {
        assert!(format_backup_list(&[]).starts_with("No backups yet."));
    }
}
