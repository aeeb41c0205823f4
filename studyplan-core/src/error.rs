//! Error taxonomy for the scheduling engine.
//!
//! Only contract violations (malformed tasks or intervals) are returned as `Err`
//! from [`crate::StudyScheduler::generate`]. Everything else is converted into a
//! [`crate::Diagnostic`] and travels inside the result.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid preferences: {}", problems.join("; "))]
    InvalidPreferences { problems: Vec<String> },

    #[error("No tasks selected")]
    NoTasks,

    #[error("No available time slots found. Check your study hours and existing calendar conflicts.")]
    NoAvailability,

    #[error("invalid task '{task_id}': {reason}")]
    InvalidTask { task_id: String, reason: String },

    #[error("invalid busy interval {start} - {end}: end precedes start")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid local datetime '{input}': {reason}")]
    InvalidDateTime { input: String, reason: String },
}

impl ScheduleError {
    pub fn invalid_task(task_id: impl Into<String>, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidTask {
            task_id: task_id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_problems_are_joined() {
        let err = ScheduleError::InvalidPreferences {
            problems: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "invalid preferences: a; b");
    }

    #[test]
    fn invalid_task_names_the_task() {
        let err = ScheduleError::invalid_task("t1", "empty id");
        assert_eq!(err.to_string(), "invalid task 't1': empty id");
    }
}
