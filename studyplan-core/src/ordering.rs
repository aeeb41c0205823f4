//! Task ordering strategies.
//!
//! Every strategy is a stable sort, so equal keys keep the analyzer's
//! urgency-descending order and the result is fully deterministic.

use crate::analyzer::AnalyzedTask;
use crate::preferences::Algorithm;
use crate::task::{Priority, TaskType};

pub const BALANCED_PRIORITY_WEIGHT: f64 = 0.30;
pub const BALANCED_DEADLINE_WEIGHT: f64 = 0.25;
pub const BALANCED_URGENCY_WEIGHT: f64 = 0.20;
pub const BALANCED_ENERGY_WEIGHT: f64 = 0.15;
pub const BALANCED_COMPLEXITY_WEIGHT: f64 = 0.10;

fn base_type_energy(task_type: TaskType) -> f64 {
    match task_type {
        TaskType::Assignment | TaskType::Exam | TaskType::Project => 3.0,
        TaskType::Study | TaskType::Reading | TaskType::Review => 2.0,
        TaskType::Personal => 1.0,
    }
}

fn priority_multiplier(priority: Priority) -> f64 {
    match priority {
        Priority::High => 1.2,
        Priority::Medium => 1.0,
        Priority::Low => 0.8,
    }
}

/// Focus demand of a task: type energy scaled by priority and urgency.
pub fn energy_level(task: &AnalyzedTask) -> f64 {
    base_type_energy(task.task.task_type)
        * priority_multiplier(task.task.priority)
        * (f64::from(task.urgency_score) / 100.0)
}

/// Weighted multi-criteria score used by [`Algorithm::Balanced`].
pub fn balanced_score(task: &AnalyzedTask) -> f64 {
    let priority_score = match task.task.priority {
        Priority::High => 100.0,
        Priority::Medium => 60.0,
        Priority::Low => 30.0,
    };
    let deadline_score = (100.0 - 10.0 * task.days_until_due as f64).max(0.0);
    let urgency = f64::from(task.urgency_score);
    let energy_score = (energy_level(task) * 25.0).min(100.0);
    let complexity_score = (task.task.effort_hours() * 20.0).min(100.0);

    priority_score * BALANCED_PRIORITY_WEIGHT
        + deadline_score * BALANCED_DEADLINE_WEIGHT
        + urgency * BALANCED_URGENCY_WEIGHT
        + energy_score * BALANCED_ENERGY_WEIGHT
        + complexity_score * BALANCED_COMPLEXITY_WEIGHT
}

/// Order analyzed tasks for placement according to `algorithm`.
pub fn order_tasks(mut tasks: Vec<AnalyzedTask>, algorithm: Algorithm) -> Vec<AnalyzedTask> {
    match algorithm {
        Algorithm::Priority => tasks.sort_by(|a, b| {
            b.task
                .priority
                .rank()
                .cmp(&a.task.priority.rank())
                .then_with(|| b.urgency_score.cmp(&a.urgency_score))
        }),
        Algorithm::Deadline => tasks.sort_by(|a, b| a.task.due.cmp(&b.task.due)),
        Algorithm::Energy => tasks.sort_by(|a, b| energy_level(b).total_cmp(&energy_level(a))),
        Algorithm::Balanced => {
            tasks.sort_by(|a, b| balanced_score(b).total_cmp(&balanced_score(a)))
        }
    }
    tasks
}
