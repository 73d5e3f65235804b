//! CLI commands for data export
//!
//! Each export writes to the given file, or to stdout when no file is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{JournalError, JournalResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export everything as JSON
    Json {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export everything as YAML
    Yaml {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export today's spend log as CSV
    Spends {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export recurring obligations as CSV
    Obligations {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export debts as CSV
    Debts {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> JournalResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => write_to(output, |w| {
            json::export_full_json(storage, w, pretty)?;
            // serde_json leaves no trailing newline
            writeln!(w).map_err(|e| JournalError::Export(e.to_string()))
        }),
        ExportCommands::Yaml { output } => write_to(output, |w| yaml::export_full_yaml(storage, w)),
        ExportCommands::Spends { output } => {
            write_to(output, |w| csv::export_spends_csv(storage, w))
        }
        ExportCommands::Obligations { output } => {
            write_to(output, |w| csv::export_obligations_csv(storage, w))
        }
        ExportCommands::Debts { output } => write_to(output, |w| csv::export_debts_csv(storage, w)),
    }
}

fn write_to<F>(output: Option<PathBuf>, export: F) -> JournalResult<()>
where
    F: FnOnce(&mut dyn Write) -> JournalResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                JournalError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| JournalError::Export(e.to_string()))?;
            eprintln!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            export(&mut lock)?;
            lock.flush()
                .map_err(|e| JournalError::Export(e.to_string()))?;
        }
    }
    Ok(())
}
