//! Export module for JournalMe
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: For the spend log, obligations and debts (spreadsheet-compatible)
//! - JSON: For machine-readable full database export and import
//! - YAML: For human-readable full database export and import

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_debts_csv, export_obligations_csv, export_spends_csv};
pub use json::{
    export_full_json, import_from_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, import_from_yaml};
