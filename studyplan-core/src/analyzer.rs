//! Urgency analysis: turns raw tasks into scored, explained tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskType};
use crate::time::days_until_ceil;

pub const URGENCY_BASE: i32 = 50;
pub const DUE_TODAY_BONUS: i32 = 50;
pub const DUE_TOMORROW_BONUS: i32 = 40;
pub const DUE_WITHIN_3_DAYS_BONUS: i32 = 25;
pub const DUE_WITHIN_WEEK_BONUS: i32 = 10;
pub const DUE_DISTANT_PENALTY: i32 = -10;
pub const LARGE_EFFORT_HOURS: f64 = 4.0;
pub const LARGE_EFFORT_BONUS: i32 = 10;
pub const SMALL_EFFORT_HOURS: f64 = 1.0;
pub const SMALL_EFFORT_PENALTY: i32 = -5;
pub const COMPLEX_TASK_HOURS: f64 = 3.0;

/// A task plus its urgency metrics. Lives for one run only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTask {
    pub task: Task,
    /// 0..=100
    pub urgency_score: i32,
    /// Whole days until due, rounded up, never negative.
    pub days_until_due: i64,
    /// Display-only explanation.
    pub reasoning: String,
}

fn priority_weight(priority: Priority) -> i32 {
    match priority {
        Priority::High => 20,
        Priority::Medium => 0,
        Priority::Low => -10,
    }
}

fn type_bonus(task_type: TaskType) -> i32 {
    match task_type {
        TaskType::Exam => 15,
        TaskType::Project => 10,
        TaskType::Assignment => 5,
        TaskType::Review => -5,
        TaskType::Reading | TaskType::Personal | TaskType::Study => 0,
    }
}

fn deadline_pressure(days_until_due: i64) -> i32 {
    match days_until_due {
        0 => DUE_TODAY_BONUS,
        1 => DUE_TOMORROW_BONUS,
        2..=3 => DUE_WITHIN_3_DAYS_BONUS,
        4..=7 => DUE_WITHIN_WEEK_BONUS,
        d if d > 14 => DUE_DISTANT_PENALTY,
        _ => 0,
    }
}

/// Urgency score in 0..=100 from deadline proximity, priority, effort and type.
pub fn urgency_score(task: &Task, days_until_due: i64) -> i32 {
    let mut score = URGENCY_BASE;
    score += deadline_pressure(days_until_due);
    score += priority_weight(task.priority);

    let effort = task.effort_hours();
    if effort > LARGE_EFFORT_HOURS {
        score += LARGE_EFFORT_BONUS;
    }
    if effort < SMALL_EFFORT_HOURS {
        score += SMALL_EFFORT_PENALTY;
    }

    score += type_bonus(task.task_type);
    score.clamp(0, 100)
}

fn task_reasoning(task: &Task, urgency: i32, days_until_due: i64) -> String {
    let mut factors: Vec<&str> = Vec::new();

    if days_until_due <= 1 {
        factors.push("due very soon");
    } else if days_until_due <= 3 {
        factors.push("due soon");
    }
    if task.priority == Priority::High {
        factors.push("high priority");
    }
    if task.effort_hours() > COMPLEX_TASK_HOURS {
        factors.push("complex task");
    }
    if task.task_type == TaskType::Exam {
        factors.push("exam preparation");
    }

    let basis = if factors.is_empty() {
        "standard scheduling".to_string()
    } else {
        factors.join(", ")
    };
    format!("Urgency score {urgency}/100 based on: {basis}.")
}

pub fn analyze_task(task: &Task, now: DateTime<Utc>) -> AnalyzedTask {
    let days_until_due = days_until_ceil(now, task.due).max(0);
    let urgency = urgency_score(task, days_until_due);
    AnalyzedTask {
        task: task.clone(),
        urgency_score: urgency,
        days_until_due,
        reasoning: task_reasoning(task, urgency, days_until_due),
    }
}

/// Analyze every task, most urgent first (stable for ties).
pub fn analyze_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<AnalyzedTask> {
    let mut out: Vec<AnalyzedTask> = tasks.iter().map(|t| analyze_task(t, now)).collect();
    out.sort_by(|a, b| b.urgency_score.cmp(&a.urgency_score));
    out
}
