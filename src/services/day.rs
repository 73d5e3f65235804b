//! Day boundary processing
//!
//! Two independent once-a-day jobs share the same change detector: clearing
//! the spend log and judging the task board. Each keeps its own marker in
//! the application state so one running never suppresses the other.

use chrono::NaiveDate;
use tracing::info;

use crate::engine::has_day_changed;
use crate::error::JournalResult;
use crate::models::task::MISSED_PENALTY;
use crate::storage::Storage;

use super::finance::FinanceService;

/// Result of judging the previous day's task board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskJudgement {
    /// Tasks moved off the board
    pub archived: usize,
    /// Of those, tasks left unfinished
    pub missed: usize,
    /// Points lost
    pub penalty: i64,
    /// Score after the penalty
    pub score: i64,
}

/// What the boundary run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayOutcome {
    pub spend_reset: bool,
    pub judgement: Option<TaskJudgement>,
}

impl DayOutcome {
    pub fn is_noop(&self) -> bool {
        !self.spend_reset && self.judgement.is_none()
    }
}

pub struct DayService<'a> {
    storage: &'a Storage,
}

impl<'a> DayService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run every boundary job that has not yet run for `today`
    pub fn process(&self, today: NaiveDate) -> JournalResult<DayOutcome> {
        let spend_reset = FinanceService::new(self.storage).reset_day_if_needed(today)?;
        let judgement = self.judge_tasks_if_needed(today)?;

        Ok(DayOutcome {
            spend_reset,
            judgement,
        })
    }

    /// Archive the active board and charge for every unfinished task
    ///
    /// Returns `None` when the board was already judged today.
    pub fn judge_tasks_if_needed(&self, today: NaiveDate) -> JournalResult<Option<TaskJudgement>> {
        let last_judgement = self.storage.state.get()?.last_task_judgement;
        if !has_day_changed(last_judgement, today) {
            return Ok(None);
        }

        let mut archived = 0;
        let mut missed = 0;
        for mut task in self.storage.tasks.get_all()? {
            if !task.is_active() {
                continue;
            }
            if !task.completed {
                missed += 1;
            }
            task.archived = true;
            archived += 1;
            self.storage.tasks.upsert(task)?;
        }

        let penalty = MISSED_PENALTY * missed as i64;
        let score = self.storage.state.update(|state| {
            state.score -= penalty;
            state.last_task_judgement = Some(today);
            state.score
        })?;

        self.storage.tasks.save()?;
        self.storage.state.save()?;

        info!(%today, archived, missed, penalty, score, "task board judged");
        Ok(Some(TaskJudgement {
            archived,
            missed,
            penalty,
            score,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use crate::models::Money;
    use crate::services::TaskService;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_judgement_penalizes_open_tasks() {
        let (_temp_dir, storage) = create_test_storage();
        let tasks = TaskService::new(&storage);
        tasks.add("Study", None, Utc::now()).unwrap();
        tasks.add("Walk", None, Utc::now()).unwrap();
        tasks.add("Read", None, Utc::now()).unwrap();
        tasks.complete("Read").unwrap();

        let service = DayService::new(&storage);
        let judgement = service.judge_tasks_if_needed(date(5)).unwrap().unwrap();

        assert_eq!(judgement.archived, 3);
        assert_eq!(judgement.missed, 2);
        assert_eq!(judgement.penalty, 10);
        // 100 + 5 for "Read" - 10
        assert_eq!(judgement.score, 95);
        assert!(tasks.list_active().unwrap().is_empty());
    }

    #[test]
    fn test_judgement_runs_once_per_day() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DayService::new(&storage);
        let tasks = TaskService::new(&storage);

        assert!(service.judge_tasks_if_needed(date(5)).unwrap().is_some());

        tasks.add("Late addition", None, Utc::now()).unwrap();
        assert!(service.judge_tasks_if_needed(date(5)).unwrap().is_none());
        assert_eq!(tasks.list_active().unwrap().len(), 1);

        let next = service.judge_tasks_if_needed(date(6)).unwrap().unwrap();
        assert_eq!(next.missed, 1);
        assert_eq!(tasks.score().unwrap(), 95);
    }

    #[test]
    fn test_markers_are_independent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DayService::new(&storage);
        let finance = FinanceService::new(&storage);

        // Spend reset already ran today; judgement has not
        assert!(finance.reset_day_if_needed(date(5)).unwrap());
        let outcome = service.process(date(5)).unwrap();
        assert!(!outcome.spend_reset);
        assert!(outcome.judgement.is_some());

        assert!(service.process(date(5)).unwrap().is_noop());
    }

    #[test]
    fn test_process_new_day() {
        let (_temp_dir, storage) = create_test_storage();
        let service = DayService::new(&storage);
        let finance = FinanceService::new(&storage);

        service.process(date(5)).unwrap();
        finance
            .log_spend("Tea", Money::from_units(20), Utc::now())
            .unwrap();

        let outcome = service.process(date(6)).unwrap();
        assert!(outcome.spend_reset);
        assert_eq!(outcome.judgement.unwrap().archived, 0);
        assert!(finance.spend_state().unwrap().is_empty());
    }
}
