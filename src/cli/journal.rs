//! Journal CLI commands

use clap::Subcommand;

use crate::clock::Clock;
use crate::display::format_entry_list;
use crate::error::JournalResult;
use crate::services::JournalService;
use crate::storage::Storage;

use super::parse_date;

/// Journal subcommands
#[derive(Subcommand)]
pub enum JournalCommands {
    /// Write a journal entry
    Add {
        /// Entry text
        #[arg(required = true)]
        content: Vec<String>,
    },

    /// List entries, newest first
    List {
        /// Only entries written on this day (YYYY-MM-DD)
        #[arg(short, long)]
        day: Option<String>,

        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Search entries for text (case-insensitive)
    Search {
        /// Text to look for
        query: String,
    },

    /// Delete an entry
    Delete {
        /// Entry ID (or prefix)
        entry: String,
    },
}

/// Handle a journal command
pub fn handle_journal_command(
    storage: &Storage,
    clock: &dyn Clock,
    cmd: JournalCommands,
) -> JournalResult<()> {
    let service = JournalService::new(storage);
    let today = clock.today();

    match cmd {
        JournalCommands::Add { content } => {
            let entry = service.add(&content.join(" "), clock.now())?;
            println!("Entry saved ({})", entry.id);
        }

        JournalCommands::List { day, limit } => {
            let entries = match day {
                Some(day) => service.on_day(parse_date(&day)?)?,
                None => service.recent(limit)?,
            };
            println!("{}", format_entry_list(&entries, today));
        }

        JournalCommands::Search { query } => {
            let entries = service.search(&query)?;
            if entries.is_empty() {
                println!("No entries match '{}'.", query);
            } else {
                println!("{}", format_entry_list(&entries, today));
            }
        }

        JournalCommands::Delete { entry } => {
            let removed = service.delete(&entry)?;
            println!("Deleted entry from {}", removed.relative_day_label(today));
        }
    }

    Ok(())
}
