//! Core data models for JournalMe
//!
//! This module contains the data structures for the finance side (balance,
//! obligations, debts, expected income, daily spend log) and the productivity
//! side (journal entries, tasks, goals, score).

pub mod debt;
pub mod entry;
pub mod finance;
pub mod goal;
pub mod ids;
pub mod income;
pub mod money;
pub mod obligation;
pub mod state;
pub mod task;

pub use debt::Debt;
pub use entry::JournalEntry;
pub use finance::{CashBalance, DailySpendLog, FinanceState, SpendItem};
pub use goal::{Goal, GoalHorizon};
pub use ids::{DebtId, EntryId, GoalId, IncomeId, ObligationId, SpendId, TaskId};
pub use income::ExpectedIncome;
pub use money::Money;
pub use obligation::RecurringObligation;
pub use state::AppState;
pub use task::Task;
