//! Debt tracker CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_debt_list;
use crate::error::JournalResult;
use crate::services::DebtService;
use crate::storage::Storage;

use super::parse_money;

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Track a new debt
    Add {
        /// Debt label (e.g., "Credit Card")
        label: String,

        /// Total amount owed
        total: String,
    },

    /// List debts with repayment progress
    List,

    /// Record a payment against a debt
    Pay {
        /// Debt label or ID
        debt: String,

        /// Amount paid
        amount: String,
    },

    /// Stop tracking a debt
    Delete {
        /// Debt label or ID
        debt: String,
    },
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DebtCommands,
) -> JournalResult<()> {
    let service = DebtService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        DebtCommands::Add { label, total } => {
            let total = parse_money(&total)?;
            let debt = service.add(&label, total)?;
            println!(
                "Tracking debt '{}': {} owed",
                debt.label,
                debt.total_owed.format_with_symbol(symbol)
            );
            println!("  ID: {}", debt.id);
        }

        DebtCommands::List => {
            let debts = service.list()?;
            println!("{}", format_debt_list(&debts, symbol));
        }

        DebtCommands::Pay { debt, amount } => {
            let amount = parse_money(&amount)?;
            let updated = service.log_payment(&debt, amount)?;
            println!(
                "Paid {} toward '{}'; {} remaining",
                amount.format_with_symbol(symbol),
                updated.label,
                updated.remaining().format_with_symbol(symbol)
            );
            if updated.is_paid_off() {
                println!("Debt '{}' is paid off.", updated.label);
            }
        }

        DebtCommands::Delete { debt } => {
            let removed = service.delete(&debt)?;
            println!("Deleted debt '{}'", removed.label);
        }
    }

    Ok(())
}
