//! Balance CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::format_status_line;
use crate::error::JournalResult;
use crate::storage::Storage;

use super::{finance_service, parse_money};

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Show the current cash balance
    Show,

    /// Overwrite the cash balance (negative values allowed)
    Set {
        /// New balance (e.g., "15000" or "-250.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: BalanceCommands,
) -> JournalResult<()> {
    let finance = finance_service(storage, settings);
    let symbol = &settings.currency_symbol;

    match cmd {
        BalanceCommands::Show => {
            println!("Balance: {}", finance.balance()?.format_with_symbol(symbol));
        }

        BalanceCommands::Set { amount } => {
            let amount = parse_money(&amount)?;
            let balance = finance.set_balance(amount)?;
            println!("Balance set to {}", balance.format_with_symbol(symbol));

            let report = finance.report(clock.today())?;
            println!("{}", format_status_line(&report, symbol));
        }
    }

    Ok(())
}
