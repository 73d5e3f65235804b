//! Advisor plan command
//!
//! Asks the configured planner for today's tasks. Without an
//! `advisor_command` in settings the static plan is used.

use clap::Args;
use tracing::warn;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::display::format_plan;
use crate::error::JournalResult;
use crate::services::{AdvisorService, CommandPlanner, PlanGenerator, StaticPlanner, TaskService};
use crate::storage::Storage;

use super::finance_service;

/// Arguments for `journalme plan`
#[derive(Args)]
pub struct PlanArgs {
    /// Put the suggested tasks on today's board
    #[arg(short, long)]
    pub add: bool,

    /// Category for tasks added with --add
    #[arg(short, long, default_value = "plan")]
    pub category: String,
}

/// Handle the plan command
pub fn handle_plan_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    args: PlanArgs,
) -> JournalResult<()> {
    let today = clock.today();
    let report = finance_service(storage, settings).report(today)?;

    let command_planner = match &settings.advisor_command {
        Some(command) => match CommandPlanner::from_command_line(command, &settings.currency_symbol)
        {
            Ok(planner) => Some(planner),
            Err(e) => {
                warn!(error = %e, "ignoring advisor_command");
                None
            }
        },
        None => None,
    };
    let generator: &dyn PlanGenerator = match &command_planner {
        Some(planner) => planner,
        None => &StaticPlanner,
    };

    let advisor = AdvisorService::new(storage, generator, settings.ai_daily_limit);
    let plan = advisor.plan(today, &report)?;
    print!("{}", format_plan(&plan));

    if args.add {
        let tasks = TaskService::new(storage);
        for label in &plan.tasks {
            tasks.add(label, Some(&args.category), clock.now())?;
        }
        println!("Added {} task(s) to today's board.", plan.tasks.len());
    }

    Ok(())
}
