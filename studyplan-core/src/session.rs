//! Engine output: placed study sessions, diagnostics and the run result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::task::{Priority, TaskType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionCategory {
    Focused,
    Review,
}

impl SessionCategory {
    pub fn for_task_type(task_type: TaskType) -> Self {
        match task_type {
            TaskType::Exam | TaskType::Reading | TaskType::Study | TaskType::Review => {
                SessionCategory::Review
            }
            TaskType::Project | TaskType::Assignment | TaskType::Personal => {
                SessionCategory::Focused
            }
        }
    }
}

/// A placed block of study time. Immutable once created; approval state is
/// layered on by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    /// Includes the buffer.
    pub end: DateTime<Utc>,
    /// Minutes from `start` to `end`, buffer included.
    pub duration_minutes: i64,
    pub category: SessionCategory,
    pub confidence: f64,
    pub reasoning: String,
    pub priority: Priority,
    pub quality_score: i32,
    pub urgency_score: i32,
    /// False for fallback sessions placed without a qualifying slot.
    pub ai_optimized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    Validation,
    NoTasks,
    SchedulingGap,
    NoAvailability,
}

/// Actionable, non-fatal message for the caller's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            task_id: None,
        }
    }

    pub fn scheduling_gap(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::SchedulingGap,
            message: message.into(),
            task_id: Some(task_id.into()),
        }
    }

    /// One diagnostic per problem; preference errors expand to several.
    pub fn from_error(err: &ScheduleError) -> Vec<Self> {
        match err {
            ScheduleError::InvalidPreferences { problems } => problems
                .iter()
                .map(|p| Diagnostic::new(DiagnosticKind::Validation, p.clone()))
                .collect(),
            ScheduleError::NoTasks => {
                vec![Diagnostic::new(DiagnosticKind::NoTasks, err.to_string())]
            }
            ScheduleError::NoAvailability => {
                vec![Diagnostic::new(DiagnosticKind::NoAvailability, err.to_string())]
            }
            ScheduleError::InvalidTask { task_id, .. } => vec![Diagnostic {
                kind: DiagnosticKind::Validation,
                message: err.to_string(),
                task_id: Some(task_id.clone()),
            }],
            other => vec![Diagnostic::new(DiagnosticKind::Validation, other.to_string())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Sorted by start time.
    pub sessions: Vec<StudySession>,
    pub diagnostics: Vec<Diagnostic>,
    /// 0..=100, informational.
    pub optimization_score: u32,
}

impl ScheduleResult {
    /// Empty result carrying the diagnostics for `err`.
    pub fn rejected(err: &ScheduleError) -> Self {
        Self {
            sessions: Vec::new(),
            diagnostics: Diagnostic::from_error(err),
            optimization_score: 0,
        }
    }

    pub fn fallback_count(&self) -> usize {
        self.sessions.iter().filter(|s| !s.ai_optimized).count()
    }

    pub fn sessions_for_task<'a>(
        &'a self,
        task_id: &'a str,
    ) -> impl Iterator<Item = &'a StudySession> + 'a {
        self.sessions.iter().filter(move |s| s.task_id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_mapping() {
        assert_eq!(SessionCategory::for_task_type(TaskType::Exam), SessionCategory::Review);
        assert_eq!(SessionCategory::for_task_type(TaskType::Study), SessionCategory::Review);
        assert_eq!(SessionCategory::for_task_type(TaskType::Project), SessionCategory::Focused);
        assert_eq!(SessionCategory::for_task_type(TaskType::Personal), SessionCategory::Focused);
    }

    #[test]
    fn preference_errors_expand_per_problem() {
        let err = ScheduleError::InvalidPreferences {
            problems: vec!["one".to_string(), "two".to_string()],
        };
        let result = ScheduleResult::rejected(&err);
        assert!(result.sessions.is_empty());
        assert_eq!(result.diagnostics.len(), 2);
        assert!(result.diagnostics.iter().all(|d| d.kind == DiagnosticKind::Validation));
    }

    #[test]
    fn diagnostic_wire_shape() {
        let d = Diagnostic::scheduling_gap("t1", "No optimal slot found for Essay");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["kind"], "scheduling-gap");
        assert_eq!(json["taskId"], "t1");

        let plain = serde_json::to_value(Diagnostic::new(DiagnosticKind::NoTasks, "x")).unwrap();
        assert!(plain.get("taskId").is_none());
    }
}
