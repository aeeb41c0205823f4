//! User scheduling preferences and their validation gate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// Task ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Priority,
    Deadline,
    Energy,
    #[default]
    Balanced,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Priority,
        Algorithm::Deadline,
        Algorithm::Energy,
        Algorithm::Balanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Priority => "priority",
            Algorithm::Deadline => "deadline",
            Algorithm::Energy => "energy",
            Algorithm::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!("unknown algorithm '{s}' (expected priority, deadline, energy or balanced)")
            })
    }
}

/// Local study window `[start, end)` in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyHours {
    pub start: u32,
    pub end: u32,
}

/// Session length bounds in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDuration {
    pub min: i64,
    pub max: i64,
    pub preferred: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub study_hours: StudyHours,
    pub session_duration: SessionDuration,
    /// Gap between consecutive candidate slots.
    pub break_minutes: i64,
    pub study_days_per_week: u32,
    pub avoid_weekends: bool,
    /// Appended to each placed session's end; does not consume a slot.
    pub buffer_minutes: i64,
    pub algorithm: Algorithm,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            study_hours: StudyHours { start: 9, end: 18 },
            session_duration: SessionDuration {
                min: 30,
                max: 180,
                preferred: 90,
            },
            break_minutes: 15,
            study_days_per_week: 5,
            avoid_weekends: false,
            buffer_minutes: 15,
            algorithm: Algorithm::Balanced,
        }
    }
}

impl Preferences {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_study_hours(mut self, start: u32, end: u32) -> Self {
        self.study_hours = StudyHours { start, end };
        self
    }

    pub fn with_session_duration(mut self, min: i64, max: i64, preferred: i64) -> Self {
        self.session_duration = SessionDuration { min, max, preferred };
        self
    }

    /// Check every invariant and report all violations at once.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        let hours = self.study_hours;
        let durations = self.session_duration;

        if hours.start > 23 || hours.end > 23 {
            problems.push("Study hours must be between 0 and 23".to_string());
        }
        if hours.start >= hours.end {
            problems.push("Study start time must be before end time".to_string());
        }
        if durations.min <= 0 {
            problems.push("Session durations must be positive".to_string());
        }
        if durations.min > durations.max {
            problems.push("Minimum session duration cannot exceed maximum".to_string());
        }
        if durations.preferred < durations.min || durations.preferred > durations.max {
            problems.push("Preferred session duration must be between min and max".to_string());
        }
        if !(1..=7).contains(&self.study_days_per_week) {
            problems.push("Study days per week must be between 1 and 7".to_string());
        }
        if self.break_minutes < 0 || self.buffer_minutes < 0 {
            problems.push("Break and buffer minutes cannot be negative".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ScheduleError::InvalidPreferences { problems })
        }
    }
}
