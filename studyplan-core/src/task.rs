//! Task model consumed by the scheduling engine.
//!
//! Tasks are owned by an external task store; the engine only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// Effort assumed when a task carries no estimate.
pub const DEFAULT_EFFORT_HOURS: f64 = 1.5;

/// Largest accepted estimate: one full week of clock time.
pub const MAX_EFFORT_HOURS: f64 = 7.0 * 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Ordering rank used by the priority strategy (high first).
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Assignment,
    Personal,
    Study,
    Exam,
    Project,
    Reading,
    Review,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::Assignment => "assignment",
            TaskType::Personal => "personal",
            TaskType::Study => "study",
            TaskType::Exam => "exam",
            TaskType::Project => "project",
            TaskType::Reading => "reading",
            TaskType::Review => "review",
        }
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assignment" => Ok(TaskType::Assignment),
            "personal" => Ok(TaskType::Personal),
            "study" => Ok(TaskType::Study),
            "exam" => Ok(TaskType::Exam),
            "project" => Ok(TaskType::Project),
            "reading" => Ok(TaskType::Reading),
            "review" => Ok(TaskType::Review),
            other => Err(format!("unknown task type: {other}")),
        }
    }
}

/// A student task with a hard due timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,

    /// Due timestamp (UTC).
    pub due: DateTime<Utc>,

    pub priority: Priority,
    pub status: TaskStatus,

    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// Estimated effort in hours. `None` means [`DEFAULT_EFFORT_HOURS`].
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the user picked this task for the next scheduling run.
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, due: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due,
            priority: Priority::Medium,
            status: TaskStatus::Todo,
            task_type: TaskType::Assignment,
            estimated_hours: None,
            tags: Vec::new(),
            selected: true,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_effort_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn effort_hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(DEFAULT_EFFORT_HOURS)
    }

    /// Minutes of study the task asks for (90 when no estimate is set).
    pub fn required_minutes(&self) -> i64 {
        (self.effort_hours() * 60.0).round() as i64
    }

    /// Completed or deselected tasks are never scheduled.
    pub fn is_eligible(&self) -> bool {
        self.status != TaskStatus::Completed && self.selected
    }

    /// Contract check applied before the engine runs.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ScheduleError::invalid_task(&self.id, "id must be non-empty"));
        }
        if let Some(hours) = self.estimated_hours {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(ScheduleError::invalid_task(
                    &self.id,
                    format!("estimated hours must be a positive number, got {hours}"),
                ));
            }
            if hours > MAX_EFFORT_HOURS {
                return Err(ScheduleError::invalid_task(
                    &self.id,
                    format!("estimated hours cannot exceed {MAX_EFFORT_HOURS}, got {hours}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 6, 23, 59, 0).unwrap()
    }

    #[test]
    fn default_effort_is_ninety_minutes() {
        let t = Task::new("t1", "essay", due());
        assert_eq!(t.effort_hours(), 1.5);
        assert_eq!(t.required_minutes(), 90);
        assert_eq!(t.with_effort_hours(0.75).required_minutes(), 45);
    }

    #[test]
    fn completed_or_unselected_tasks_are_not_eligible() {
        let t = Task::new("t1", "essay", due());
        assert!(t.is_eligible());
        assert!(!t.clone().with_status(TaskStatus::Completed).is_eligible());
        assert!(!t.with_selected(false).is_eligible());
    }

    #[test]
    fn validate_rejects_bad_effort_and_empty_id() {
        assert!(Task::new("", "x", due()).validate().is_err());
        assert!(Task::new("t", "x", due()).with_effort_hours(0.0).validate().is_err());
        assert!(Task::new("t", "x", due()).with_effort_hours(f64::NAN).validate().is_err());
        assert!(Task::new("t", "x", due()).with_effort_hours(2.0).validate().is_ok());
    }

    #[test]
    fn validate_caps_effort_at_one_week() {
        assert!(Task::new("t", "x", due()).with_effort_hours(168.0).validate().is_ok());
        assert!(Task::new("t", "x", due()).with_effort_hours(168.5).validate().is_err());
        assert!(Task::new("t", "x", due()).with_effort_hours(1e300).validate().is_err());
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "id": "hw1",
            "title": "Problem set 3",
            "due": "2026-02-06T23:59:00Z",
            "priority": "high",
            "status": "in-progress",
            "type": "exam"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.task_type, TaskType::Exam);
        assert!(t.selected);
        assert!(t.tags.is_empty());
    }

    #[test]
    fn parses_enums_from_strings() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("reading".parse::<TaskType>().unwrap(), TaskType::Reading);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
