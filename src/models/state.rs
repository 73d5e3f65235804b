//! Application state that is not owned by any single record
//!
//! Holds the discipline score, the last day each boundary job ran and the
//! per-day advisor usage counter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Discipline score
    #[serde(default = "default_score")]
    pub score: i64,

    /// Last day the spend log was cleared
    #[serde(default)]
    pub last_spend_reset: Option<NaiveDate>,

    /// Last day open tasks were judged and archived
    #[serde(default)]
    pub last_task_judgement: Option<NaiveDate>,

    /// Last day an automatic backup was taken
    #[serde(default)]
    pub last_auto_backup: Option<NaiveDate>,

    /// Advisor requests per day
    #[serde(default)]
    pub ai_usage: BTreeMap<NaiveDate, u32>,
}

fn default_score() -> i64 {
    100
}

impl AppState {
    pub fn with_score(score: i64) -> Self {
        Self {
            score,
            last_spend_reset: None,
            last_task_judgement: None,
            last_auto_backup: None,
            ai_usage: BTreeMap::new(),
        }
    }

    pub fn usage_on(&self, day: NaiveDate) -> u32 {
        self.ai_usage.get(&day).copied().unwrap_or(0)
    }

    pub fn record_usage(&mut self, day: NaiveDate) {
        *self.ai_usage.entry(day).or_insert(0) += 1;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_score(default_score())
    }
}
