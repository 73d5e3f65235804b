//! Recurring obligation CLI commands
//!
//! Implements CLI commands for the monthly bills the survival budget
//! protects.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_obligation_list;
use crate::error::{JournalError, JournalResult};
use crate::services::ObligationService;
use crate::storage::Storage;

use super::parse_money;

/// Obligation subcommands
#[derive(Subcommand)]
pub enum ObligationCommands {
    /// Add a recurring monthly obligation
    Add {
        /// Obligation label (e.g., "Rent")
        label: String,

        /// Amount due each month
        amount: String,

        /// Day of month it is due (1-31)
        #[arg(short, long)]
        day: u32,
    },

    /// List obligations ordered by due day
    List,

    /// Edit an obligation
    Edit {
        /// Obligation label or ID
        obligation: String,

        /// New label
        #[arg(short, long)]
        label: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New due day (1-31)
        #[arg(short, long)]
        day: Option<u32>,
    },

    /// Delete an obligation
    Delete {
        /// Obligation label or ID
        obligation: String,
    },
}

/// Handle an obligation command
pub fn handle_obligation_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ObligationCommands,
) -> JournalResult<()> {
    let service = ObligationService::new(storage);
    let symbol = &settings.currency_symbol;

    match cmd {
        ObligationCommands::Add { label, amount, day } => {
            let amount = parse_money(&amount)?;
            let obligation = service.add(&label, amount, day)?;
            println!(
                "Added obligation '{}': {} due on day {}",
                obligation.label,
                obligation.amount.format_with_symbol(symbol),
                obligation.day_of_month
            );
            println!("  ID: {}", obligation.id);
        }

        ObligationCommands::List => {
            let obligations = service.list()?;
            println!("{}", format_obligation_list(&obligations, symbol));
        }

        ObligationCommands::Edit {
            obligation,
            label,
            amount,
            day,
        } => {
            if label.is_none() && amount.is_none() && day.is_none() {
                return Err(JournalError::Validation(
                    "Nothing to change: pass --label, --amount or --day".into(),
                ));
            }
            let amount = amount.as_deref().map(parse_money).transpose()?;
            let updated = service.edit(&obligation, label.as_deref(), amount, day)?;
            println!(
                "Updated obligation '{}': {} due on day {}",
                updated.label,
                updated.amount.format_with_symbol(symbol),
                updated.day_of_month
            );
        }

        ObligationCommands::Delete { obligation } => {
            let removed = service.delete(&obligation)?;
            println!("Deleted obligation '{}'", removed.label);
        }
    }

    Ok(())
}
