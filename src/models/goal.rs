//! Goal model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;

/// How far out a goal looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalHorizon {
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for GoalHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalHorizon::Weekly => write!(f, "weekly"),
            GoalHorizon::Monthly => write!(f, "monthly"),
            GoalHorizon::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for GoalHorizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" | "w" => Ok(GoalHorizon::Weekly),
            "monthly" | "month" | "m" => Ok(GoalHorizon::Monthly),
            "yearly" | "year" | "y" => Ok(GoalHorizon::Yearly),
            other => Err(format!(
                "Unknown horizon '{}': expected weekly, monthly or yearly",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub label: String,
    pub horizon: GoalHorizon,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(label: impl Into<String>, horizon: GoalHorizon, created_at: DateTime<Utc>) -> Self {
        Self {
            id: GoalId::new(),
            label: label.into(),
            horizon,
            completed: false,
            created_at,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
