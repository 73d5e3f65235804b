//! Goal service

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{Goal, GoalHorizon};
use crate::storage::Storage;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(
        &self,
        label: &str,
        horizon: GoalHorizon,
        created_at: DateTime<Utc>,
    ) -> JournalResult<Goal> {
        let label = label.trim();
        if label.is_empty() {
            return Err(JournalError::Validation("Goal label cannot be empty".into()));
        }

        let goal = Goal::new(label, horizon, created_at);
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(goal_id = %goal.id, %horizon, "goal added");
        Ok(goal)
    }

    /// Flip a goal between open and achieved
    pub fn toggle(&self, reference: &str) -> JournalResult<Goal> {
        let mut goal = self.storage.goals.find(reference)?;
        goal.toggle();

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        info!(goal_id = %goal.id, completed = goal.completed, "goal toggled");
        Ok(goal)
    }

    pub fn delete(&self, reference: &str) -> JournalResult<Goal> {
        let goal = self.storage.goals.find(reference)?;
        self.storage
            .goals
            .delete(goal.id)?
            .ok_or_else(|| JournalError::goal_not_found(reference))?;
        self.storage.goals.save()?;

        info!(goal_id = %goal.id, "goal deleted");
        Ok(goal)
    }

    /// All goals newest first, optionally limited to one horizon
    pub fn list(&self, horizon: Option<GoalHorizon>) -> JournalResult<Vec<Goal>> {
        Ok(self
            .storage
            .goals
            .get_all()?
            .into_iter()
            .filter(|goal| horizon.map_or(true, |h| goal.horizon == h))
            .collect())
    }
}
