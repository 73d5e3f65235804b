//! Backup commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager, ValidationResult};
use crate::config::paths::JournalPaths;
use crate::config::settings::Settings;
use crate::display::format_backup_list;
use crate::error::{JournalError, JournalResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Archive every store now
    Create,

    /// List backups, newest first
    List,

    /// Show what a backup contains
    Show {
        /// `latest`, a backup file name, a day (YYYY-MM-DD) or a path
        backup: String,
    },

    /// Overwrite all data with a backup
    Restore {
        /// `latest`, a backup file name, a day (YYYY-MM-DD) or a path
        backup: String,

        /// Restore without asking first
        #[arg(short, long)]
        force: bool,
    },

    /// Delete backups beyond the retention policy
    Prune {
        /// Delete without asking first
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &JournalPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> JournalResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", file_name(&path));
            if !pruned.is_empty() {
                println!("{} expired backup(s) pruned.", pruned.len());
            }
        }

        BackupCommands::List => {
            println!("{}", format_backup_list(&manager.list_backups()?));
        }

        BackupCommands::Show { backup } => {
            let path = locate_backup(&manager, &backup)?;
            let validation = RestoreManager::new(paths.clone()).validate_backup(&path)?;
            print_validation(&path, &validation);
        }

        BackupCommands::Restore { backup, force } => {
            let path = locate_backup(&manager, &backup)?;
            let restorer = RestoreManager::new(paths.clone());
            let validation = restorer.validate_backup(&path)?;
            print_validation(&path, &validation);

            if !validation.is_valid() {
                return Err(JournalError::Backup(format!(
                    "{} cannot be restored",
                    file_name(&path)
                )));
            }
            if !force {
                println!();
                println!("Restoring replaces every journal, task and finance record.");
                println!("Run again with --force to continue.");
                return Ok(());
            }

            let safety = manager.create_backup()?;
            let result = restorer.restore_from_file(&path)?;
            println!();
            println!("{}", result.summary());
            println!("Previous data saved as {}", file_name(&safety));
        }

        BackupCommands::Prune { force } => {
            let expired = manager.expired_backups()?;
            let retention = &settings.backup_retention;

            if expired.is_empty() {
                println!(
                    "Nothing to prune (keeping {} daily and {} monthly).",
                    retention.daily_count, retention.monthly_count
                );
                return Ok(());
            }

            for backup in &expired {
                println!("  {}", backup.filename);
            }
            if !force {
                println!("{} backup(s) would be deleted. Run again with --force.", expired.len());
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

/// An existing file path wins; anything else is looked up among the backups
fn locate_backup(manager: &BackupManager, reference: &str) -> JournalResult<PathBuf> {
    let as_path = Path::new(reference);
    if as_path.is_file() {
        return Ok(as_path.to_path_buf());
    }

    manager
        .find_backup(reference)?
        .map(|b| b.path)
        .ok_or_else(|| JournalError::NotFound {
            entity_type: "Backup",
            identifier: reference.to_string(),
        })
}

fn print_validation(path: &Path, validation: &ValidationResult) {
    println!("Backup:   {}", file_name(path));
    println!(
        "Taken:    {}",
        validation.backup_date.format("%Y-%m-%d %H:%M UTC")
    );
    if !validation.present.is_empty() {
        println!("Contains: {}", validation.present.join(", "));
    }
    println!("Status:   {}", validation.summary());
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
