//! studyplan-core: deterministic study-session scheduling engine

pub mod analyzer;
pub mod availability;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod insights;
pub mod interval;
pub mod ordering;
pub mod placement;
pub mod preferences;
pub mod scoring;
pub mod session;
pub mod task;
pub mod time;

pub use analyzer::{AnalyzedTask, analyze_task, analyze_tasks, urgency_score};
pub use availability::{AvailabilityGenerator, CandidateSlot};
pub use confidence::{estimate_confidence, optimization_score};
pub use engine::StudyScheduler;
pub use error::{Result, ScheduleError};
pub use insights::{ScheduleInsights, summarize};
pub use interval::{BusyInterval, has_conflict, overlaps};
pub use ordering::{balanced_score, energy_level, order_tasks};
pub use placement::{Placement, PlacementEngine};
pub use preferences::{Algorithm, Preferences, SessionDuration, StudyHours};
pub use scoring::score_slot;
pub use session::{Diagnostic, DiagnosticKind, ScheduleResult, SessionCategory, StudySession};
pub use task::{Priority, Task, TaskStatus, TaskType};
pub use time::{Clock, FixedClock, SystemClock};
