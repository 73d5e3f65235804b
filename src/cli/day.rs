//! Status dashboard and day boundary commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::format_status;
use crate::error::JournalResult;
use crate::services::DayOutcome;
use crate::storage::Storage;

use super::finance_service;

/// Day subcommands
#[derive(Subcommand)]
pub enum DayCommands {
    /// Clear today's spend log now (the balance is not refunded)
    Reset,

    /// Show when the day boundary jobs last ran
    Show,
}

/// Print the liquidity dashboard for today
pub fn handle_status(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
) -> JournalResult<()> {
    let report = finance_service(storage, settings).report(clock.today())?;
    print!("{}", format_status(&report, &settings.currency_symbol));
    Ok(())
}

/// Handle a day command
pub fn handle_day_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    cmd: DayCommands,
) -> JournalResult<()> {
    match cmd {
        DayCommands::Reset => {
            let cleared = finance_service(storage, settings).reset_day(clock.today())?;
            println!("Spend log cleared ({} item(s)).", cleared);
        }

        DayCommands::Show => {
            let state = storage.state.get()?;
            let show = |d: Option<chrono::NaiveDate>| {
                d.map(|d| d.to_string()).unwrap_or_else(|| "never".into())
            };
            println!("Today:               {}", clock.today());
            println!("Last spend reset:    {}", show(state.last_spend_reset));
            println!("Last task judgement: {}", show(state.last_task_judgement));
            println!("Last auto backup:    {}", show(state.last_auto_backup));
            println!("Score:               {}", state.score);
        }
    }

    Ok(())
}

/// Describe what the automatic boundary run did, if anything worth telling
pub fn describe_day_outcome(outcome: &DayOutcome) -> Option<String> {
    let judgement = outcome.judgement?;
    if judgement.archived == 0 {
        return None;
    }
    let mut text = format!("New day: {} task(s) archived", judgement.archived);
    if judgement.missed > 0 {
        text.push_str(&format!(
            ", {} unfinished cost {} points (score {})",
            judgement.missed, judgement.penalty, judgement.score
        ));
    }
    Some(text)
}
