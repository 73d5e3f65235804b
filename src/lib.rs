//! JournalMe - terminal journal, discipline tracker and survival budget
//!
//! This library provides the core functionality for the JournalMe CLI. Its
//! centerpiece is the liquidity engine: given a cash balance, recurring
//! monthly obligations, debts and dated expected income, it decides whether
//! every upcoming bill can be met and how much can safely be spent today.
//! Around it sit a free-text journal, a scored task board and goals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (obligations, debts, income, tasks, etc.)
//! - `engine`: Pure date arithmetic and survival-budget computation
//! - `clock`: Injectable source of "today"
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `backup`: Automatic backup management
//! - `export`: JSON/YAML/CSV export and import
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use journalme::config::{paths::JournalPaths, settings::Settings};
//! use journalme::services::FinanceService;
//! use journalme::storage::Storage;
//!
//! let paths = JournalPaths::new()?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let report = FinanceService::new(&storage).report(today)?;
//! println!("{}", report.daily_survival_budget);
//! ```

pub mod backup;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{JournalError, JournalResult};
