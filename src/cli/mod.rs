//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod balance;
pub mod day;
pub mod debt;
pub mod export;
pub mod goal;
pub mod import;
pub mod income;
pub mod journal;
pub mod obligation;
pub mod plan;
pub mod spend;
pub mod task;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{JournalError, JournalResult};
use crate::models::Money;
use crate::services::FinanceService;
use crate::storage::Storage;

pub use backup::{handle_backup_command, BackupCommands};
pub use balance::{handle_balance_command, BalanceCommands};
pub use day::{handle_day_command, handle_status, DayCommands};
pub use debt::{handle_debt_command, DebtCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::handle_import_command;
pub use income::{handle_income_command, IncomeCommands};
pub use journal::{handle_journal_command, JournalCommands};
pub use obligation::{handle_obligation_command, ObligationCommands};
pub use plan::{handle_plan_command, PlanArgs};
pub use spend::{handle_spend_command, SpendCommands};
pub use task::{handle_task_command, TaskCommands};

/// Parse a user-entered amount such as "500" or "1,250.50"
pub(crate) fn parse_money(input: &str) -> JournalResult<Money> {
    Money::parse(input).map_err(|e| JournalError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> JournalResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        JournalError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", input))
    })
}

/// Finance service configured from settings
pub(crate) fn finance_service<'a>(storage: &'a Storage, settings: &Settings) -> FinanceService<'a> {
    FinanceService::new(storage).with_unconstrained_divisor(settings.unconstrained_divisor)
}
