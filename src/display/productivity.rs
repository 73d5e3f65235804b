//! Journal, task, goal and plan formatting

use chrono::{Local, NaiveDate};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Goal, JournalEntry, Task};
use crate::services::{Plan, PlanSource};

use super::report::{or_dash, truncate};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    label: String,
    #[tabled(rename = "Category")]
    category: String,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    label: String,
    #[tabled(rename = "Horizon")]
    horizon: String,
}

/// Format journal entries grouped under relative day headings
pub fn format_entry_list(entries: &[JournalEntry], today: NaiveDate) -> String {
    if entries.is_empty() {
        return "No journal entries.".to_string();
    }

    let mut output = String::new();
    let mut current_day = None;
    for entry in entries {
        let day = entry.day();
        if current_day != Some(day) {
            if current_day.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", entry.relative_day_label(today)));
            current_day = Some(day);
        }
        output.push_str(&format!(
            "  {} [{}] {}\n",
            entry.created_at.with_timezone(&Local).format("%H:%M"),
            entry.id,
            truncate(&entry.content, 70)
        ));
    }
    output
}

/// Format tasks with a checkbox column
pub fn format_task_list(tasks: &[Task], score: i64) -> String {
    if tasks.is_empty() {
        return format!("No tasks on the board.\nScore: {}", score);
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|t| TaskRow {
            mark: if t.completed { "[x]" } else { "[ ]" },
            id: t.id.to_string(),
            label: t.label.clone(),
            category: or_dash(t.category.as_deref()),
        })
        .collect();

    let done = tasks.iter().filter(|t| t.completed).count();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n{}/{} done | Score: {}", table, done, tasks.len(), score)
}

/// Format goals with a checkbox column
pub fn format_goal_list(goals: &[Goal]) -> String {
    if goals.is_empty() {
        return "No goals set.".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|g| GoalRow {
            mark: if g.completed { "[x]" } else { "[ ]" },
            id: g.id.to_string(),
            label: g.label.clone(),
            horizon: g.horizon.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format an advisor plan
pub fn format_plan(plan: &Plan) -> String {
    let mut output = String::new();
    match &plan.source {
        PlanSource::Generator(name) => {
            output.push_str(&format!("Plan from {}:\n", name));
        }
        PlanSource::Fallback { reason } => {
            output.push_str(&format!("Fallback plan ({}):\n", reason));
        }
    }
    for (i, task) in plan.tasks.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, task));
    }
    output.push_str(&format!(
        "Advisor usage today: {}/{}\n",
        plan.used_today, plan.daily_limit
    ));
    output
}
