use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use journalme::backup::BackupManager;
use journalme::cli::day::describe_day_outcome;
use journalme::cli::{
    handle_backup_command, handle_balance_command, handle_day_command, handle_debt_command,
    handle_export_command, handle_goal_command, handle_import_command, handle_income_command,
    handle_journal_command, handle_obligation_command, handle_plan_command,
    handle_spend_command, handle_status, handle_task_command,
};
use journalme::clock::{Clock, FixedClock, SystemClock};
use journalme::config::{paths::JournalPaths, settings::Settings};
use journalme::services::DayService;
use journalme::storage::{initialize_storage, Storage};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "JOURNALME_LOG";

#[derive(Parser)]
#[command(
    name = "journalme",
    version,
    about = "Journal, discipline tracker and daily survival budget",
    long_about = "JournalMe keeps a free-text journal, a scored daily task board and \
                  goals, and tells you how much you can safely spend today without \
                  missing any upcoming bill."
)]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "JOURNALME_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the survival budget dashboard
    Status,

    /// Cash balance commands
    #[command(subcommand)]
    Balance(journalme::cli::BalanceCommands),

    /// Daily spend log commands
    #[command(subcommand)]
    Spend(journalme::cli::SpendCommands),

    /// Recurring obligation commands
    #[command(subcommand, alias = "bill")]
    Obligation(journalme::cli::ObligationCommands),

    /// Debt tracker commands
    #[command(subcommand)]
    Debt(journalme::cli::DebtCommands),

    /// Expected income commands
    #[command(subcommand)]
    Income(journalme::cli::IncomeCommands),

    /// Journal commands
    #[command(subcommand)]
    Journal(journalme::cli::JournalCommands),

    /// Discipline task commands
    #[command(subcommand)]
    Task(journalme::cli::TaskCommands),

    /// Goal commands
    #[command(subcommand)]
    Goal(journalme::cli::GoalCommands),

    /// Day boundary commands
    #[command(subcommand)]
    Day(journalme::cli::DayCommands),

    /// Suggest today's tasks
    Plan(journalme::cli::PlanArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(journalme::cli::BackupCommands),

    /// Export data
    #[command(subcommand)]
    Export(journalme::cli::ExportCommands),

    /// Replace all data with a JSON or YAML export
    Import {
        /// Export file to read
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = JournalPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level);

    let clock: Box<dyn Clock> = match cli.today {
        Some(day) => Box::new(FixedClock::new(day)),
        None => Box::new(SystemClock),
    };
    let today = clock.today();
    debug!(%today, base_dir = %paths.base_dir().display(), "starting");

    // Initialize storage
    initialize_storage(&paths, &settings)?;
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if settings.auto_backup {
        let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
        if let Some(path) = manager.ensure_daily_backup(&storage, today)? {
            debug!(path = %path.display(), "daily backup taken");
        }
    }

    let outcome = DayService::new(&storage).process(today)?;
    if let Some(note) = describe_day_outcome(&outcome) {
        println!("{}", note);
    }

    let clock = clock.as_ref();
    match cli.command {
        Some(Commands::Status) | None => handle_status(&storage, &settings, clock)?,
        Some(Commands::Balance(cmd)) => handle_balance_command(&storage, &settings, clock, cmd)?,
        Some(Commands::Spend(cmd)) => handle_spend_command(&storage, &settings, clock, cmd)?,
        Some(Commands::Obligation(cmd)) => handle_obligation_command(&storage, &settings, cmd)?,
        Some(Commands::Debt(cmd)) => handle_debt_command(&storage, &settings, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, clock, cmd)?,
        Some(Commands::Journal(cmd)) => handle_journal_command(&storage, clock, cmd)?,
        Some(Commands::Task(cmd)) => handle_task_command(&storage, clock, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, clock, cmd)?,
        Some(Commands::Day(cmd)) => handle_day_command(&storage, &settings, clock, cmd)?,
        Some(Commands::Plan(args)) => handle_plan_command(&storage, &settings, clock, args)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, force }) => {
            handle_import_command(&storage, &settings, &file, force)?
        }
        Some(Commands::Init) => {
            println!("JournalMe initialized at: {}", paths.base_dir().display());
            println!();
            println!("Next steps:");
            println!("  journalme balance set <amount>");
            println!("  journalme obligation add Rent <amount> --day <1-31>");
            println!("  journalme status");
        }
        Some(Commands::Config) => {
            println!("JournalMe Configuration");
            println!("=======================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Unconstrained divisor: {}", settings.unconstrained_divisor);
            println!("  Advisor daily limit:   {}", settings.ai_daily_limit);
            println!(
                "  Advisor command:       {}",
                settings
                    .advisor_command
                    .as_ref()
                    .map(|c| c.join(" "))
                    .unwrap_or_else(|| "(static plan)".into())
            );
            println!("  Auto backup:           {}", settings.auto_backup);
            println!(
                "  Backup retention:      {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            println!("  Log level:             {}", settings.log_level);
        }
    }

    Ok(())
}
