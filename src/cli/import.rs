//! CLI command handler for importing a full export
//!
//! Replaces every store with the contents of a JSON or YAML export after
//! validating it. A backup of the current data is taken first.

use std::path::Path;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::{JournalError, JournalResult};
use crate::export::{import_from_json, import_from_yaml, FullExport};
use crate::storage::Storage;

/// Parse an export file, choosing the format from its extension
pub fn read_export_file(path: &Path) -> JournalResult<FullExport> {
    if !path.exists() {
        return Err(JournalError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| JournalError::Import(format!("Failed to read file: {}", e)))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => import_from_yaml(&content),
        _ => import_from_json(&content),
    }
}

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
    force: bool,
) -> JournalResult<()> {
    let export = read_export_file(file)?;
    let meta = &export.metadata;

    println!("Import Preview");
    println!("{}", "=".repeat(40));
    println!("  Exported at:   {}", export.exported_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  Obligations:   {}", meta.obligation_count);
    println!("  Debts:         {}", meta.debt_count);
    println!("  Income:        {}", meta.income_count);
    println!("  Entries:       {}", meta.entry_count);
    println!("  Tasks:         {}", meta.task_count);
    println!("  Goals:         {}", meta.goal_count);
    println!();

    if !force {
        println!("WARNING: Importing replaces ALL current data!");
        println!("To proceed, run again with --force flag:");
        println!("  journalme import {} --force", file.display());
        return Ok(());
    }

    let manager = BackupManager::new(storage.paths().clone(), settings.backup_retention.clone());
    let backup = manager.create_backup()?;
    println!("Pre-import backup saved: {}", backup.display());

    export.apply_to(storage)?;
    println!("Import complete.");

    Ok(())
}
