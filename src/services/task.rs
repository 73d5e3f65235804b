//! Task service
//!
//! Tasks are the discipline side of the app. Finishing a task earns points,
//! taking the completion back or abandoning an open task costs them. The
//! score lives in the application state.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::task::{ABANDON_PENALTY, COMPLETION_REWARD};
use crate::models::Task;
use crate::storage::Storage;

/// Service for the daily task board
pub struct TaskService<'a> {
    storage: &'a Storage,
}

impl<'a> TaskService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Put a task on today's board
    pub fn add(
        &self,
        label: &str,
        category: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> JournalResult<Task> {
        let label = label.trim();
        if label.is_empty() {
            return Err(JournalError::Validation("Task label cannot be empty".into()));
        }
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let task = Task::new(label, category, created_at);
        self.storage.tasks.upsert(task.clone())?;
        self.storage.tasks.save()?;

        info!(task_id = %task.id, label = %task.label, "task added");
        Ok(task)
    }

    /// Mark an active task done. Returns the task and the new score.
    pub fn complete(&self, reference: &str) -> JournalResult<(Task, i64)> {
        let mut task = self.find_active(reference)?;
        if task.completed {
            return Err(JournalError::Validation(format!(
                "Task '{}' is already completed",
                task.label
            )));
        }

        task.completed = true;
        let score = self.save_with_score(&task, COMPLETION_REWARD)?;

        info!(task_id = %task.id, score, "task completed");
        Ok((task, score))
    }

    /// Undo a completion, giving the reward back
    pub fn reopen(&self, reference: &str) -> JournalResult<(Task, i64)> {
        let mut task = self.find_active(reference)?;
        if !task.completed {
            return Err(JournalError::Validation(format!(
                "Task '{}' is not completed",
                task.label
            )));
        }

        task.completed = false;
        let score = self.save_with_score(&task, -COMPLETION_REWARD)?;

        info!(task_id = %task.id, score, "task reopened");
        Ok((task, score))
    }

    /// Remove a task. Deleting one that was never finished costs points.
    pub fn delete(&self, reference: &str) -> JournalResult<(Task, i64)> {
        let task = self.storage.tasks.find(reference)?;
        self.storage
            .tasks
            .delete(task.id)?
            .ok_or_else(|| JournalError::task_not_found(reference))?;

        let delta = if task.completed || task.archived {
            0
        } else {
            -ABANDON_PENALTY
        };
        let score = self
            .storage
            .state
            .update(|state| {
                state.score += delta;
                state.score
            })?;

        self.storage.tasks.save()?;
        self.storage.state.save()?;

        info!(task_id = %task.id, delta, score, "task deleted");
        Ok((task, score))
    }

    /// Today's board, oldest first
    pub fn list_active(&self) -> JournalResult<Vec<Task>> {
        Ok(self
            .storage
            .tasks
            .get_all()?
            .into_iter()
            .filter(Task::is_active)
            .collect())
    }

    /// Tasks from previous days
    pub fn list_archived(&self) -> JournalResult<Vec<Task>> {
        Ok(self
            .storage
            .tasks
            .get_all()?
            .into_iter()
            .filter(|task| task.archived)
            .collect())
    }

    /// Current discipline score
    pub fn score(&self) -> JournalResult<i64> {
        Ok(self.storage.state.get()?.score)
    }

    fn find_active(&self, reference: &str) -> JournalResult<Task> {
        let task = self.storage.tasks.find(reference)?;
        if !task.is_active() {
            return Err(JournalError::Validation(format!(
                "Task '{}' belongs to a previous day",
                task.label
            )));
        }
        Ok(task)
    }

    fn save_with_score(&self, task: &Task, delta: i64) -> JournalResult<i64> {
        self.storage.tasks.upsert(task.clone())?;
        let score = self.storage.state.update(|state| {
            state.score += delta;
            state.score
        })?;

        self.storage.tasks.save()?;
        self.storage.state.save()?;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::JournalPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_task() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TaskService::new(&storage);

        let task = service.add("Study", Some(" deep work "), Utc::now()).unwrap();
        assert_eq!(task.category.as_deref(), Some("deep work"));

        let task = service.add("Walk", Some(""), Utc::now()).unwrap();
        assert_eq!(task.category, None);

        assert!(service.add("  ", None, Utc::now()).is_err());
        assert_eq!(service.list_active().unwrap().len(), 2);
    }

    #[test]
    fn test_complete_and_reopen_score() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        service.add("Study", None, Utc::now()).unwrap();

        let (task, score) = service.complete("study").unwrap();
        assert!(task.completed);
        assert_eq!(score, 105);
        assert!(service.complete("study").unwrap_err().is_validation());

        let (task, score) = service.reopen("study").unwrap();
        assert!(!task.completed);
        assert_eq!(score, 100);
        assert!(service.reopen("study").is_err());
    }

    #[test]
    fn test_delete_open_task_costs_points() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        service.add("Skip me", None, Utc::now()).unwrap();
        service.add("Done", None, Utc::now()).unwrap();
        service.complete("Done").unwrap();

        let (_, score) = service.delete("Skip me").unwrap();
        assert_eq!(score, 103);

        let (_, score) = service.delete("Done").unwrap();
        assert_eq!(score, 103);
        assert!(service.list_active().unwrap().is_empty());
    }

    #[test]
    fn test_archived_tasks_are_frozen() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        let mut task = service.add("Old", None, Utc::now()).unwrap();
        task.archived = true;
        storage.tasks.upsert(task).unwrap();

        assert!(service.complete("Old").unwrap_err().is_validation());
        assert_eq!(service.list_archived().unwrap().len(), 1);
        assert!(service.list_active().unwrap().is_empty());
    }
}
