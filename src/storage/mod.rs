//! Storage layer for JournalMe
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each entity list lives in its own file under `data/`.

pub mod document;
pub mod file_io;
pub mod init;
pub mod records;

pub use document::DocumentRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use records::{Record, RecordRepository};

use crate::config::paths::JournalPaths;
use crate::error::JournalError;
use crate::models::{
    AppState, Debt, ExpectedIncome, FinanceState, Goal, JournalEntry, RecurringObligation, Task,
};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: JournalPaths,
    pub obligations: RecordRepository<RecurringObligation>,
    pub debts: RecordRepository<Debt>,
    pub income: RecordRepository<ExpectedIncome>,
    pub finance: DocumentRepository<FinanceState>,
    pub entries: RecordRepository<JournalEntry>,
    pub tasks: RecordRepository<Task>,
    pub goals: RecordRepository<Goal>,
    pub state: DocumentRepository<AppState>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: JournalPaths) -> Result<Self, JournalError> {
        paths.ensure_directories()?;

        Ok(Self {
            obligations: RecordRepository::new(paths.obligations_file()),
            debts: RecordRepository::new(paths.debts_file()),
            income: RecordRepository::new(paths.income_file()),
            finance: DocumentRepository::new("finance", paths.finance_file()),
            entries: RecordRepository::new(paths.entries_file()),
            tasks: RecordRepository::new(paths.tasks_file()),
            goals: RecordRepository::new(paths.goals_file()),
            state: DocumentRepository::new("state", paths.state_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &JournalPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), JournalError> {
        self.obligations.load()?;
        self.debts.load()?;
        self.income.load()?;
        self.finance.load()?;
        self.entries.load()?;
        self.tasks.load()?;
        self.goals.load()?;
        self.state.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), JournalError> {
        self.obligations.save()?;
        self.debts.save()?;
        self.income.save()?;
        self.finance.save()?;
        self.entries.save()?;
        self.tasks.save()?;
        self.goals.save()?;
        self.state.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
