//! Discipline task model
//!
//! Tasks live on today's board until the day boundary, when every active task
//! is archived and the ones left undone cost points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TaskId;

/// Points awarded for completing a task (and revoked when reopening it)
pub const COMPLETION_REWARD: i64 = 5;

/// Points lost for deleting a task that was never completed
pub const ABANDON_PENALTY: i64 = 2;

/// Points lost per task still open at the day boundary
pub const MISSED_PENALTY: i64 = 5;

/// A discipline task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub label: String,

    /// Free-form grouping (e.g. "study", "health")
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub completed: bool,

    /// Archived tasks belong to a previous day's board
    #[serde(default)]
    pub archived: bool,

    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        label: impl Into<String>,
        category: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            label: label.into(),
            category,
            completed: false,
            archived: false,
            created_at,
        }
    }

    /// Whether the task is on today's board
    pub fn is_active(&self) -> bool {
        !self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_active_and_open() {
        let task = Task::new("Solve 20 GATE problems", Some("study".into()), Utc::now());
        assert!(task.is_active());
        assert!(!task.completed);
        assert_eq!(task.category.as_deref(), Some("study"));
    }

    #[test]
    fn test_archived_task_is_inactive() {
        let mut task = Task::new("Walk", None, Utc::now());
        task.archived = true;
        assert!(!task.is_active());
    }
}
