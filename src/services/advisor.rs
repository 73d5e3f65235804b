//! Daily plan advisor
//!
//! Produces five suggested tasks from the user's financial position, recent
//! journal entries and open goals. Generation goes through the
//! [`PlanGenerator`] trait; whenever a generator fails or the daily limit is
//! used up the advisor answers with a fixed Stoic fallback plan instead, so
//! asking for a plan never fails because of the generator.

use std::io::Write;
use std::process::{Command, Stdio};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::engine::LiquidityReport;
use crate::error::{JournalError, JournalResult};
use crate::models::Money;
use crate::storage::Storage;

use super::journal::JournalService;

/// Plan returned when no generator result is available
pub const FALLBACK_PLAN: [&str; 5] = [
    "Review your daily survival budget with `journalme status`",
    "Practice Premeditatio Malorum: What could go wrong today?",
    "Identify the one task you are avoiding and do it first",
    "Log your current mental state with `journalme journal add`",
    "Take a 10-minute walk to clear your mind",
];

/// Number of journal entries shared with the generator
const CONTEXT_ENTRIES: usize = 5;

/// What a generator gets to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    pub net_position: Money,
    pub survival_budget: Money,
    pub recent_entries: Vec<String>,
    pub goals: Vec<String>,
}

impl PlanContext {
    /// Render the context as a prompt for a text generator
    pub fn prompt(&self, currency_symbol: &str) -> String {
        let thoughts = if self.recent_entries.is_empty() {
            "none".to_string()
        } else {
            self.recent_entries.join(" | ")
        };
        let goals = if self.goals.is_empty() {
            "none".to_string()
        } else {
            self.goals.join(", ")
        };

        format!(
            "You are a Stoic executive coach. Return ONLY a JSON array of 5 strings.\n\
             Financials: Net {}, Survival Budget {}. \
             Recent Thoughts: {}. Goals: {}. Generate 5 tasks.",
            self.net_position.format_with_symbol(currency_symbol),
            self.survival_budget.format_with_symbol(currency_symbol),
            thoughts,
            goals
        )
    }
}

/// Source of suggested tasks
pub trait PlanGenerator {
    /// Short name for logs and output
    fn name(&self) -> &str;

    fn generate(&self, context: &PlanContext) -> JournalResult<Vec<String>>;

    /// Whether calls count against the daily limit
    fn is_metered(&self) -> bool {
        true
    }
}

/// Always answers with [`FALLBACK_PLAN`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPlanner;

impl PlanGenerator for StaticPlanner {
    fn name(&self) -> &str {
        "static"
    }

    fn generate(&self, _context: &PlanContext) -> JournalResult<Vec<String>> {
        Ok(fallback_plan())
    }

    fn is_metered(&self) -> bool {
        false
    }
}

/// Runs an external program, feeding the prompt on stdin
///
/// The program's stdout may contain surrounding prose; the first JSON array
/// found in it is used.
#[derive(Debug, Clone)]
pub struct CommandPlanner {
    program: String,
    args: Vec<String>,
    currency_symbol: String,
}

impl CommandPlanner {
    /// Build from a `[program, args...]` list
    pub fn from_command_line(
        command: &[String],
        currency_symbol: impl Into<String>,
    ) -> JournalResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| JournalError::Config("advisor_command is empty".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            currency_symbol: currency_symbol.into(),
        })
    }
}

impl PlanGenerator for CommandPlanner {
    fn name(&self) -> &str {
        &self.program
    }

    fn generate(&self, context: &PlanContext) -> JournalResult<Vec<String>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                JournalError::Advisor(format!("Failed to start {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(context.prompt(&self.currency_symbol).as_bytes())
                .map_err(|e| JournalError::Advisor(format!("Failed to send prompt: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| JournalError::Advisor(format!("Planner did not finish: {}", e)))?;
        if !output.status.success() {
            return Err(JournalError::Advisor(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        extract_plan(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Pull the first JSON array of strings out of free-form text
pub fn extract_plan(text: &str) -> JournalResult<Vec<String>> {
    let start = text
        .find('[')
        .ok_or_else(|| JournalError::Advisor("No JSON array found in response".into()))?;
    let end = text
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| JournalError::Advisor("No JSON array found in response".into()))?;

    let tasks: Vec<String> = serde_json::from_str(&text[start..=end])
        .map_err(|e| JournalError::Advisor(format!("Response is not a list of tasks: {}", e)))?;

    let tasks: Vec<String> = tasks
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if tasks.is_empty() {
        return Err(JournalError::Advisor("Response contained no tasks".into()));
    }
    Ok(tasks)
}

pub fn fallback_plan() -> Vec<String> {
    FALLBACK_PLAN.iter().map(|s| s.to_string()).collect()
}

/// Where a plan came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    Generator(String),
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub tasks: Vec<String>,
    pub source: PlanSource,
    /// Metered requests made today, including this one
    pub used_today: u32,
    pub daily_limit: u32,
}

impl Plan {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, PlanSource::Fallback { .. })
    }
}

/// Service that rate-limits plan generation and falls back on failure
pub struct AdvisorService<'a> {
    storage: &'a Storage,
    generator: &'a dyn PlanGenerator,
    daily_limit: u32,
}

impl<'a> AdvisorService<'a> {
    pub fn new(storage: &'a Storage, generator: &'a dyn PlanGenerator, daily_limit: u32) -> Self {
        Self {
            storage,
            generator,
            daily_limit,
        }
    }

    /// Gather what the generator sees from storage and today's report
    pub fn build_context(&self, report: &LiquidityReport) -> JournalResult<PlanContext> {
        let recent_entries = JournalService::new(self.storage)
            .recent(CONTEXT_ENTRIES)?
            .into_iter()
            .map(|entry| entry.content)
            .collect();
        let goals = self
            .storage
            .goals
            .get_all()?
            .into_iter()
            .filter(|goal| !goal.completed)
            .map(|goal| goal.label)
            .collect();

        Ok(PlanContext {
            net_position: report.net_position,
            survival_budget: report.daily_survival_budget,
            recent_entries,
            goals,
        })
    }

    /// Requests already made on `today`
    pub fn usage(&self, today: NaiveDate) -> JournalResult<u32> {
        Ok(self.storage.state.get()?.usage_on(today))
    }

    /// Produce today's plan
    ///
    /// Only successful metered generator calls count toward the limit.
    pub fn plan(&self, today: NaiveDate, report: &LiquidityReport) -> JournalResult<Plan> {
        let used = self.usage(today)?;
        let metered = self.generator.is_metered();

        if metered && used >= self.daily_limit {
            info!(used, limit = self.daily_limit, "advisor limit reached, using fallback");
            return Ok(Plan {
                tasks: fallback_plan(),
                source: PlanSource::Fallback {
                    reason: format!("Daily advisor limit reached ({}/{})", used, self.daily_limit),
                },
                used_today: used,
                daily_limit: self.daily_limit,
            });
        }

        let context = self.build_context(report)?;
        debug!(generator = self.generator.name(), "requesting plan");

        match self.generator.generate(&context) {
            Ok(tasks) => {
                let used_today = if metered {
                    let used = self.storage.state.update(|state| {
                        state.record_usage(today);
                        state.usage_on(today)
                    })?;
                    self.storage.state.save()?;
                    used
                } else {
                    used
                };

                info!(
                    generator = self.generator.name(),
                    tasks = tasks.len(),
                    used_today,
                    "plan generated"
                );
                Ok(Plan {
                    tasks,
                    source: PlanSource::Generator(self.generator.name().to_string()),
                    used_today,
                    daily_limit: self.daily_limit,
                })
            }
            Err(e) => {
                warn!(
                    generator = self.generator.name(),
                    error = %e,
                    "plan generation failed, using fallback"
                );
                Ok(Plan {
                    tasks: fallback_plan(),
                    source: PlanSource::Fallback {
                        reason: e.to_string(),
                    },
                    used_today: used,
                    daily_limit: self.daily_limit,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use crate::models::{Goal, GoalHorizon};
    use crate::services::FinanceService;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
    }

    struct EchoPlanner;

    impl PlanGenerator for EchoPlanner {
        fn name(&self) -> &str {
            "echo"
        }

        fn generate(&self, context: &PlanContext) -> JournalResult<Vec<String>> {
            Ok(context.goals.clone())
        }
    }

    struct BrokenPlanner;

    impl PlanGenerator for BrokenPlanner {
        fn name(&self) -> &str {
            "broken"
        }

        fn generate(&self, _context: &PlanContext) -> JournalResult<Vec<String>> {
            Err(JournalError::Advisor("service unavailable".into()))
        }
    }

    #[test]
    fn test_extract_plan_from_prose() {
        let text = "Sure! Here you go:\n[\"Wake early\", \" Budget \", \"\"]\nGood luck.";
        assert_eq!(extract_plan(text).unwrap(), vec!["Wake early", "Budget"]);

        assert!(extract_plan("no list here").is_err());
        assert!(extract_plan("[1, 2, 3]").is_err());
        assert!(extract_plan("[]").is_err());
        assert!(extract_plan("] backwards [").is_err());
    }

    #[test]
    fn test_prompt_mentions_finances() {
        let context = PlanContext {
            net_position: Money::from_units(-500),
            survival_budget: Money::from_units(120),
            recent_entries: vec!["tired".into()],
            goals: vec![],
        };
        let prompt = context.prompt("₹");
        assert!(prompt.contains("Net -₹500.00"));
        assert!(prompt.contains("tired"));
        assert!(prompt.contains("Goals: none"));
    }

    #[test]
    fn test_generator_success_counts_usage() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .goals
            .upsert(Goal::new("Clear the card", GoalHorizon::Monthly, Utc::now()))
            .unwrap();
        let report = FinanceService::new(&storage).report(today()).unwrap();

        let planner = EchoPlanner;
        let advisor = AdvisorService::new(&storage, &planner, 50);
        let plan = advisor.plan(today(), &report).unwrap();

        assert_eq!(plan.tasks, vec!["Clear the card"]);
        assert_eq!(plan.source, PlanSource::Generator("echo".into()));
        assert_eq!(plan.used_today, 1);
        assert_eq!(advisor.usage(today()).unwrap(), 1);
    }

    #[test]
    fn test_failure_falls_back_without_counting() {
        let (_temp_dir, storage) = create_test_storage();
        let report = FinanceService::new(&storage).report(today()).unwrap();

        let planner = BrokenPlanner;
        let advisor = AdvisorService::new(&storage, &planner, 50);
        let plan = advisor.plan(today(), &report).unwrap();

        assert!(plan.is_fallback());
        assert_eq!(plan.tasks.len(), 5);
        assert_eq!(plan.tasks[0], FALLBACK_PLAN[0]);
        assert_eq!(advisor.usage(today()).unwrap(), 0);
    }

    #[test]
    fn test_limit_reached_falls_back() {
        let (_temp_dir, storage) = create_test_storage();
        let report = FinanceService::new(&storage).report(today()).unwrap();

        let planner = EchoPlanner;
        let advisor = AdvisorService::new(&storage, &planner, 2);
        assert!(!advisor.plan(today(), &report).unwrap().is_fallback());
        assert!(!advisor.plan(today(), &report).unwrap().is_fallback());

        let plan = advisor.plan(today(), &report).unwrap();
        assert!(plan.is_fallback());
        assert_eq!(plan.used_today, 2);

        // The counter is per day
        let tomorrow = today().succ_opt().unwrap();
        assert!(!advisor.plan(tomorrow, &report).unwrap().is_fallback());
    }

    #[test]
    fn test_static_planner_is_unmetered() {
        let (_temp_dir, storage) = create_test_storage();
        let report = FinanceService::new(&storage).report(today()).unwrap();

        let planner = StaticPlanner;
        let advisor = AdvisorService::new(&storage, &planner, 0);
        let plan = advisor.plan(today(), &report).unwrap();

        assert!(!plan.is_fallback());
        assert_eq!(plan.tasks, fallback_plan());
        assert_eq!(advisor.usage(today()).unwrap(), 0);
    }

    #[test]
    fn test_fallback_plan_points_at_commands() {
        assert!(FALLBACK_PLAN[0].contains("journalme status"));
        assert!(FALLBACK_PLAN.iter().all(|task| !task.contains(" tab")));
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandPlanner::from_command_line(&[], "₹").is_err());
        let planner =
            CommandPlanner::from_command_line(&["planner".to_string(), "--fast".to_string()], "$")
                .unwrap();
        assert_eq!(planner.name(), "planner");
    }
}
