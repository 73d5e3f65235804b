//! YAML Export functionality
//!
//! Exports the complete database to YAML format for a human-readable backup.

use std::io::Write;

use chrono::Utc;

use crate::error::{JournalError, JournalResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
) -> JournalResult<()> {
    let export = FullExport::from_storage(storage, Utc::now())?;

    let header = format!(
        "# JournalMe Full Export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         #\n\
         # This file can be imported to restore your journal and finances.\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| JournalError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| JournalError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> JournalResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| JournalError::Import(e.to_string()))?;

    export.validate().map_err(JournalError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use crate::models::Money;
    use crate::services::{DebtService, GoalService};
    use crate::models::GoalHorizon;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export_has_header() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# JournalMe Full Export"));
        assert!(yaml.contains("schema_version"));
    }

    #[test]
    fn test_yaml_import() {
        let (_temp_dir, storage) = create_test_storage();
        DebtService::new(&storage)
            .add("Credit Card", Money::from_units(5000))
            .unwrap();
        GoalService::new(&storage)
            .add("Clear the card", GoalHorizon::Yearly, Utc::now())
            .unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.debts.len(), 1);
        assert_eq!(imported.debts[0].total_owed, Money::from_units(5000));
        assert_eq!(imported.goals[0].horizon, GoalHorizon::Yearly);
    }

    #[test]
    fn test_yaml_garbage_rejected() {
        assert!(import_from_yaml("just: [unclosed").is_err());
    }
}
