//! JSON Export functionality
//!
//! Exports the complete database to JSON format with schema versioning, and
//! imports such an export back after validating it.

use std::collections::HashSet;
use std::hash::Hash;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{
    AppState, CashBalance, DailySpendLog, Debt, ExpectedIncome, FinanceState, Goal, JournalEntry,
    Money, RecurringObligation, Task,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub balance: Money,

    #[serde(default)]
    pub spend_log: DailySpendLog,

    #[serde(default)]
    pub obligations: Vec<RecurringObligation>,

    #[serde(default)]
    pub debts: Vec<Debt>,

    #[serde(default)]
    pub expected_income: Vec<ExpectedIncome>,

    #[serde(default)]
    pub entries: Vec<JournalEntry>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub state: AppState,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub obligation_count: usize,
    pub debt_count: usize,
    pub income_count: usize,
    pub entry_count: usize,
    pub task_count: usize,
    pub goal_count: usize,

    /// Date of the oldest journal entry
    pub earliest_entry: Option<String>,

    /// Date of the newest journal entry
    pub latest_entry: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage, exported_at: DateTime<Utc>) -> JournalResult<Self> {
        let finance = storage.finance.get()?;
        let obligations = storage.obligations.get_all()?;
        let debts = storage.debts.get_all()?;
        let expected_income = storage.income.get_all()?;
        let entries = storage.entries.get_all()?;
        let tasks = storage.tasks.get_all()?;
        let goals = storage.goals.get_all()?;
        let state = storage.state.get()?;

        let earliest_entry = entries.iter().map(|e| e.day()).min().map(|d| d.to_string());
        let latest_entry = entries.iter().map(|e| e.day()).max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            obligation_count: obligations.len(),
            debt_count: debts.len(),
            income_count: expected_income.len(),
            entry_count: entries.len(),
            task_count: tasks.len(),
            goal_count: goals.len(),
            earliest_entry,
            latest_entry,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            balance: finance.balance.total,
            spend_log: finance.spend_log,
            obligations,
            debts,
            expected_income,
            entries,
            tasks,
            goals,
            state,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for obligation in &self.obligations {
            obligation
                .validate()
                .map_err(|e| format!("Obligation {}: {}", obligation.id, e))?;
        }
        for debt in &self.debts {
            debt.validate()
                .map_err(|e| format!("Debt {}: {}", debt.id, e))?;
        }
        for income in &self.expected_income {
            income
                .validate()
                .map_err(|e| format!("Expected income {}: {}", income.id, e))?;
        }
        for item in &self.spend_log.items {
            if !item.amount.is_positive() {
                return Err(format!("Spend {} has a non-positive amount", item.id));
            }
        }

        ensure_unique("obligation", self.obligations.iter().map(|o| o.id))?;
        ensure_unique("debt", self.debts.iter().map(|d| d.id))?;
        ensure_unique("income", self.expected_income.iter().map(|i| i.id))?;
        ensure_unique("spend", self.spend_log.items.iter().map(|s| s.id))?;
        ensure_unique("entry", self.entries.iter().map(|e| e.id))?;
        ensure_unique("task", self.tasks.iter().map(|t| t.id))?;
        ensure_unique("goal", self.goals.iter().map(|g| g.id))?;

        Ok(())
    }

    /// Replace everything in storage with this export and save
    pub fn apply_to(&self, storage: &Storage) -> JournalResult<()> {
        self.validate().map_err(JournalError::Import)?;

        storage.finance.replace(FinanceState {
            balance: CashBalance::new(self.balance),
            spend_log: self.spend_log.clone(),
        })?;
        storage.obligations.replace_all(self.obligations.clone())?;
        storage.debts.replace_all(self.debts.clone())?;
        storage.income.replace_all(self.expected_income.clone())?;
        storage.entries.replace_all(self.entries.clone())?;
        storage.tasks.replace_all(self.tasks.clone())?;
        storage.goals.replace_all(self.goals.clone())?;
        storage.state.replace(self.state.clone())?;
        storage.save_all()?;

        info!(
            exported_at = %self.exported_at,
            obligations = self.obligations.len(),
            entries = self.entries.len(),
            "export imported"
        );
        Ok(())
    }
}

fn ensure_unique<I, T>(kind: &str, ids: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(format!("Duplicate {} id {}", kind, id));
        }
        seen.insert(id);
    }
    Ok(())
}

/// Export the full database to JSON
pub fn export_full_json<W: Write + ?Sized>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> JournalResult<()> {
    let export = FullExport::from_storage(storage, Utc::now())?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| JournalError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> JournalResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| JournalError::Import(e.to_string()))?;

    export.validate().map_err(JournalError::Import)?;

    Ok(export)
}
