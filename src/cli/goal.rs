//! Goal CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::display::format_goal_list;
use crate::error::{JournalError, JournalResult};
use crate::models::GoalHorizon;
use crate::services::GoalService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set a goal
    Add {
        /// Goal label
        label: String,

        /// Horizon: weekly, monthly or yearly
        #[arg(short = 'H', long, default_value = "monthly")]
        horizon: String,
    },

    /// List goals, newest first
    List {
        /// Only goals with this horizon
        #[arg(short = 'H', long)]
        horizon: Option<String>,
    },

    /// Flip a goal between open and achieved
    Toggle {
        /// Goal label or ID
        goal: String,
    },

    /// Delete a goal
    Delete {
        /// Goal label or ID
        goal: String,
    },
}

fn parse_horizon(input: &str) -> JournalResult<GoalHorizon> {
    input.parse().map_err(JournalError::Validation)
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: GoalCommands,
) -> JournalResult<()> {
    let service = GoalService::new(storage);

    match cmd {
        GoalCommands::Add { label, horizon } => {
            let horizon = parse_horizon(&horizon)?;
            let goal = service.add(&label, horizon, clock.now())?;
            println!("Added {} goal '{}' ({})", goal.horizon, goal.label, goal.id);
        }

        GoalCommands::List { horizon } => {
            let horizon = horizon.as_deref().map(parse_horizon).transpose()?;
            let goals = service.list(horizon)?;
            println!("{}", format_goal_list(&goals));
        }

        GoalCommands::Toggle { goal } => {
            let goal = service.toggle(&goal)?;
            let state = if goal.completed { "achieved" } else { "open" };
            println!("Goal '{}' is now {}", goal.label, state);
        }

        GoalCommands::Delete { goal } => {
            let removed = service.delete(&goal)?;
            println!("Deleted goal '{}'", removed.label);
        }
    }

    Ok(())
}
