//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including the survival-budget dashboard and list tables.

pub mod backup;
pub mod finance;
pub mod productivity;
pub mod report;
pub mod status;

pub use backup::format_backup_list;
pub use finance::{format_debt_list, format_income_list, format_obligation_list, format_spend_log};
pub use productivity::{format_entry_list, format_goal_list, format_plan, format_task_list};
pub use status::{format_status, format_status_line};
