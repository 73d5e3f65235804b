//! Spend log CLI commands
//!
//! Logging a spend takes the amount out of the balance and adds it to
//! today's log; deleting an item reverses both.

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::{format_spend_log, format_status_line};
use crate::error::JournalResult;
use crate::storage::Storage;

use super::{finance_service, parse_money};

/// Spend subcommands
#[derive(Subcommand)]
pub enum SpendCommands {
    /// Log a discretionary spend
    Log {
        /// Amount spent (e.g., "120" or "120.50")
        amount: String,

        /// What the money went on
        #[arg(short, long, default_value = "")]
        label: String,
    },

    /// List today's spend log
    List,

    /// Delete a spend item and restore the balance
    Delete {
        /// Spend ID (or prefix) or label
        spend: String,
    },
}

/// Handle a spend command
pub fn handle_spend_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: SpendCommands,
) -> JournalResult<()> {
    let finance = finance_service(storage, settings);
    let symbol = &settings.currency_symbol;

    match cmd {
        SpendCommands::Log { amount, label } => {
            let amount = parse_money(&amount)?;
            let item = finance.log_spend(&label, amount, clock.now())?;
            println!(
                "Logged {} for {} ({})",
                item.amount.format_with_symbol(symbol),
                item.label,
                item.id
            );
            let report = finance.report(clock.today())?;
            println!("{}", format_status_line(&report, symbol));
        }

        SpendCommands::List => {
            let log = finance.spend_state()?;
            println!("{}", format_spend_log(&log, symbol));
        }

        SpendCommands::Delete { spend } => {
            let item = finance.delete_spend(&spend)?;
            println!(
                "Deleted spend '{}'; {} returned to balance",
                item.label,
                item.amount.format_with_symbol(symbol)
            );
            let report = finance.report(clock.today())?;
            println!("{}", format_status_line(&report, symbol));
        }
    }

    Ok(())
}
