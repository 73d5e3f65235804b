//! Expected income CLI commands
//!
//! Implements CLI commands for money the user is waiting on. Dated income
//! counts toward the obligations it arrives before; `clear` confirms
//! receipt and moves the amount into the balance.

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_income_list, format_status_line};
use crate::error::{JournalError, JournalResult};
use crate::services::IncomeService;
use crate::storage::Storage;

use super::{finance_service, parse_date, parse_money};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record expected income
    Add {
        /// Income label (e.g., "Salary")
        label: String,

        /// Expected amount
        amount: String,

        /// Expected date (YYYY-MM-DD); undated income is future pipeline
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expected income (dated first)
    List,

    /// Edit expected income
    Edit {
        /// Income label or ID
        income: String,

        /// New label
        #[arg(short, long)]
        label: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New expected date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "undated")]
        date: Option<String>,

        /// Remove the expected date
        #[arg(long)]
        undated: bool,
    },

    /// Drop expected income without touching the balance
    Delete {
        /// Income label or ID
        income: String,
    },

    /// Confirm the income arrived and add it to the balance
    Clear {
        /// Income label or ID
        income: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: IncomeCommands,
) -> JournalResult<()> {
    let service = IncomeService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        IncomeCommands::Add {
            label,
            amount,
            date,
        } => {
            let amount = parse_money(&amount)?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let income = service.add(&label, amount, date)?;

            match income.expected_date {
                Some(date) => println!(
                    "Expecting {} from '{}' on {}",
                    income.amount.format_with_symbol(symbol),
                    income.label,
                    date
                ),
                None => println!(
                    "Expecting {} from '{}' (undated)",
                    income.amount.format_with_symbol(symbol),
                    income.label
                ),
            }
            println!("  ID: {}", income.id);
        }

        IncomeCommands::List => {
            let income = service.list()?;
            println!("{}", format_income_list(&income, symbol));
        }

        IncomeCommands::Edit {
            income,
            label,
            amount,
            date,
            undated,
        } => {
            let expected_date = match (date, undated) {
                (_, true) => Some(None),
                (Some(date), false) => Some(Some(parse_date(&date)?)),
                (None, false) => None,
            };
            if label.is_none() && amount.is_none() && expected_date.is_none() {
                return Err(JournalError::Validation(
                    "Nothing to change: pass --label, --amount, --date or --undated".into(),
                ));
            }
            let amount = amount.as_deref().map(parse_money).transpose()?;

            let updated = service.edit(&income, label.as_deref(), amount, expected_date)?;
            println!(
                "Updated expected income '{}': {}",
                updated.label,
                updated.amount.format_with_symbol(symbol)
            );
        }

        IncomeCommands::Delete { income } => {
            let removed = service.delete(&income)?;
            println!("Deleted expected income '{}'", removed.label);
        }

        IncomeCommands::Clear { income } => {
            let (cleared, balance) = service.clear(&income)?;
            println!(
                "Received {} from '{}'. Balance is now {}",
                cleared.amount.format_with_symbol(symbol),
                cleared.label,
                balance.format_with_symbol(symbol)
            );
            let report = finance_service(storage, settings).report(clock.today())?;
            println!("{}", format_status_line(&report, symbol));
        }
    }

    Ok(())
}
