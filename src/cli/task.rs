//! Discipline task CLI commands
//!
//! Completing a task earns points and reopening gives them back. Deleting an
//! unfinished task costs points, and anything still open at the day boundary
//! is archived with a penalty.

use clap::Subcommand;

use crate::clock::Clock;
use crate::display::format_task_list;
use crate::error::JournalResult;
use crate::services::TaskService;
use crate::storage::Storage;

/// Task subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Put a task on today's board
    Add {
        /// Task label
        label: String,

        /// Category (e.g., "study", "health")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List today's board
    List {
        /// Show archived tasks from previous days instead
        #[arg(short, long)]
        archived: bool,
    },

    /// Mark a task done
    Done {
        /// Task label or ID
        task: String,
    },

    /// Mark a completed task as not done
    Reopen {
        /// Task label or ID
        task: String,
    },

    /// Delete a task
    Delete {
        /// Task label or ID
        task: String,
    },
}

/// Handle a task command
pub fn handle_task_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: TaskCommands,
) -> JournalResult<()> {
    let service = TaskService::new(storage);

    match cmd {
        TaskCommands::Add { label, category } => {
            let task = service.add(&label, category.as_deref(), clock.now())?;
            println!("Added task '{}' ({})", task.label, task.id);
        }

        TaskCommands::List { archived } => {
            let tasks = if archived {
                service.list_archived()?
            } else {
                service.list_active()?
            };
            println!("{}", format_task_list(&tasks, service.score()?));
        }

        TaskCommands::Done { task } => {
            let (task, score) = service.complete(&task)?;
            println!("Completed '{}'. Score: {}", task.label, score);
        }

        TaskCommands::Reopen { task } => {
            let (task, score) = service.reopen(&task)?;
            println!("Reopened '{}'. Score: {}", task.label, score);
        }

        TaskCommands::Delete { task } => {
            let (task, score) = service.delete(&task)?;
            println!("Deleted '{}'. Score: {}", task.label, score);
        }
    }

    Ok(())
}
