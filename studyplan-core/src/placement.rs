//! Greedy, conflict-aware placement of ordered tasks into scored slots.
//!
//! For each task (in strategy order):
//! 1. eligible slots: unused, start <= due, and the would-be session (buffer
//!    included) overlaps neither a busy interval nor an already placed session
//! 2. pick the highest combined score, earliest start on ties
//! 3. tasks longer than one slot are split into ceil(required / part) parts,
//!    where a part is the shorter of the max session and the slot length;
//!    each part takes its own slot
//! 4. a task that gets no slot at all receives a fallback session tomorrow
//!    at the start of the study window (not optimized, fixed confidence)

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::analyzer::AnalyzedTask;
use crate::availability::CandidateSlot;
use crate::confidence::{FALLBACK_CONFIDENCE, estimate_confidence};
use crate::interval::{BusyInterval, has_conflict, overlaps};
use crate::preferences::Preferences;
use crate::session::{Diagnostic, SessionCategory, StudySession};
use crate::task::{Priority, TaskType};
use crate::time::{days_until_ceil, local_at, local_date, local_hour};

pub const EARLY_HALF_BONUS: i32 = 20;
pub const EARLY_WINDOW_BONUS: i32 = 10;
pub const EARLY_HALF_FRACTION: f64 = 0.5;
pub const EARLY_WINDOW_FRACTION: f64 = 0.8;
pub const EXAM_MORNING_BONUS: i32 = 15;
pub const READING_EVENING_BONUS: i32 = 10;
pub const PROJECT_AFTERNOON_BONUS: i32 = 10;
pub const HIGH_PRIORITY_BONUS: i32 = 15;
pub const LOW_PRIORITY_PENALTY: i32 = -5;
pub const FALLBACK_QUALITY: i32 = 40;

const OPTIMAL_QUALITY: i32 = 80;
const GOOD_QUALITY: i32 = 60;
const SOON_DUE_DAYS: i64 = 3;

/// Sessions and per-task diagnostics from one placement pass.
#[derive(Debug, Default)]
pub struct Placement {
    pub sessions: Vec<StudySession>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct PlacementEngine<'a> {
    prefs: &'a Preferences,
    busy: &'a [BusyInterval],
    tz: Tz,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(prefs: &'a Preferences, busy: &'a [BusyInterval], tz: Tz) -> Self {
        Self { prefs, busy, tz }
    }

    /// Slot quality adjusted for this task: early-scheduling, type affinity and priority.
    pub fn combined_score(
        &self,
        slot: &CandidateSlot,
        task: &AnalyzedTask,
        now: DateTime<Utc>,
    ) -> i32 {
        let mut score = slot.quality_score;

        let slot_day_start = local_at(slot.date, 0, self.tz).unwrap_or(slot.start);
        let days_until_slot = days_until_ceil(now, slot_day_start) as f64;
        let days_until_due = task.days_until_due as f64;
        if days_until_slot <= days_until_due * EARLY_HALF_FRACTION {
            score += EARLY_HALF_BONUS;
        } else if days_until_slot <= days_until_due * EARLY_WINDOW_FRACTION {
            score += EARLY_WINDOW_BONUS;
        }

        let hour = local_hour(slot.start, self.tz);
        score += match (task.task.task_type, hour) {
            (TaskType::Exam, 9..=12) => EXAM_MORNING_BONUS,
            (TaskType::Reading, 19..=21) => READING_EVENING_BONUS,
            (TaskType::Project, 14..=17) => PROJECT_AFTERNOON_BONUS,
            _ => 0,
        };

        score += match task.task.priority {
            Priority::High => HIGH_PRIORITY_BONUS,
            Priority::Medium => 0,
            Priority::Low => LOW_PRIORITY_PENALTY,
        };

        score
    }

    /// Place every task in order. Call-local state (used slots, diagnostics)
    /// starts empty on each call. Output is sorted by start time.
    pub fn place(
        &self,
        tasks: &[AnalyzedTask],
        slots: &[CandidateSlot],
        now: DateTime<Utc>,
    ) -> Placement {
        let mut used = vec![false; slots.len()];
        let mut placement = Placement::default();

        for task in tasks {
            self.place_task(task, slots, &mut used, &mut placement, now);
        }

        placement.sessions.sort_by_key(|s| s.start);
        placement
    }

    fn place_task(
        &self,
        task: &AnalyzedTask,
        slots: &[CandidateSlot],
        used: &mut [bool],
        placement: &mut Placement,
        now: DateTime<Utc>,
    ) {
        let required = task.task.required_minutes().max(1);
        let part_minutes = self.part_minutes();
        let parts = (required.saturating_add(part_minutes - 1) / part_minutes).max(1);

        let mut remaining = required;
        let mut placed = 0;

        for part in 1..=parts {
            let Some(idx) =
                self.best_slot(task, slots, used, &placement.sessions, remaining, now)
            else {
                break;
            };
            let slot = &slots[idx];
            used[idx] = true;

            let minutes = self.chunk_minutes(remaining, slot);
            remaining -= minutes;
            placed += 1;

            let session = self.build_session(task, slot, minutes, required, part, parts);
            debug!(
                task_id = %task.task.id,
                part,
                start = %session.start,
                confidence = session.confidence,
                "placed session"
            );
            placement.sessions.push(session);

            if remaining <= 0 {
                break;
            }
        }

        if placed == 0 {
            warn!(task_id = %task.task.id, "no eligible slot; using fallback session");
            let fallback = self.fallback_session(task, &placement.sessions, now);
            placement.diagnostics.push(Diagnostic::scheduling_gap(
                &task.task.id,
                format!("No optimal slot found for {}", task.task.title),
            ));
            placement.sessions.push(fallback);
        } else if remaining > 0 {
            warn!(task_id = %task.task.id, remaining, "task only partially scheduled");
            placement.diagnostics.push(Diagnostic::scheduling_gap(
                &task.task.id,
                format!(
                    "{remaining} of {required} minutes for {} could not be scheduled",
                    task.task.title
                ),
            ));
        }
    }

    /// Longest single part: candidate slots are all `preferred` long.
    fn part_minutes(&self) -> i64 {
        let durations = self.prefs.session_duration;
        durations.max.min(durations.preferred).max(1)
    }

    fn chunk_minutes(&self, remaining: i64, slot: &CandidateSlot) -> i64 {
        remaining
            .min(self.prefs.session_duration.max)
            .min(slot.duration_minutes)
    }

    fn best_slot(
        &self,
        task: &AnalyzedTask,
        slots: &[CandidateSlot],
        used: &[bool],
        placed: &[StudySession],
        remaining: i64,
        now: DateTime<Utc>,
    ) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;

        for (idx, slot) in slots.iter().enumerate() {
            if used[idx] || slot.start > task.task.due {
                continue;
            }

            let minutes = self.chunk_minutes(remaining, slot) + self.prefs.buffer_minutes;
            let end = slot.start + Duration::minutes(minutes);
            if has_conflict(slot.start, end, self.busy)
                || placed.iter().any(|s| overlaps(slot.start, end, s.start, s.end))
            {
                continue;
            }

            let score = self.combined_score(slot, task, now);
            best = match best {
                Some((b, bs)) if bs > score || (bs == score && slots[b].start <= slot.start) => {
                    Some((b, bs))
                }
                _ => Some((idx, score)),
            };
        }

        best.map(|(idx, _)| idx)
    }

    fn build_session(
        &self,
        task: &AnalyzedTask,
        slot: &CandidateSlot,
        minutes: i64,
        required: i64,
        part: i64,
        parts: i64,
    ) -> StudySession {
        let duration = minutes + self.prefs.buffer_minutes;
        let confidence = estimate_confidence(task, slot, required);

        let (id, title) = if parts > 1 {
            (
                format!("session-{}-{part}", task.task.id),
                format!("{} (Part {part})", task.task.title),
            )
        } else {
            (format!("session-{}", task.task.id), task.task.title.clone())
        };

        StudySession {
            id,
            task_id: task.task.id.clone(),
            title,
            start: slot.start,
            end: slot.start + Duration::minutes(duration),
            duration_minutes: duration,
            category: SessionCategory::for_task_type(task.task.task_type),
            confidence,
            reasoning: self.session_reasoning(task, slot, confidence),
            priority: task.task.priority,
            quality_score: slot.quality_score,
            urgency_score: task.urgency_score,
            ai_optimized: true,
        }
    }

    /// Tomorrow at the start of the study window, pushed past any session it
    /// would overlap.
    fn fallback_session(
        &self,
        task: &AnalyzedTask,
        placed: &[StudySession],
        now: DateTime<Utc>,
    ) -> StudySession {
        let tomorrow = local_date(now, self.tz) + Duration::days(1);
        let window_start = i64::from(self.prefs.study_hours.start) * 60;
        let mut start =
            local_at(tomorrow, window_start, self.tz).unwrap_or(now + Duration::days(1));

        let duration = task
            .task
            .required_minutes()
            .max(1)
            .min(self.prefs.session_duration.max)
            + self.prefs.buffer_minutes;

        while let Some(blocking_end) = placed
            .iter()
            .filter(|s| overlaps(start, start + Duration::minutes(duration), s.start, s.end))
            .map(|s| s.end)
            .max()
        {
            start = blocking_end;
        }

        StudySession {
            id: format!("fallback-{}", task.task.id),
            task_id: task.task.id.clone(),
            title: task.task.title.clone(),
            start,
            end: start + Duration::minutes(duration),
            duration_minutes: duration,
            category: SessionCategory::for_task_type(task.task.task_type),
            confidence: FALLBACK_CONFIDENCE,
            reasoning: format!(
                "Fallback scheduling for {} - no optimal slot available.",
                task.task.title
            ),
            priority: task.task.priority,
            quality_score: FALLBACK_QUALITY,
            urgency_score: task.urgency_score,
            ai_optimized: false,
        }
    }

    fn session_reasoning(
        &self,
        task: &AnalyzedTask,
        slot: &CandidateSlot,
        confidence: f64,
    ) -> String {
        let mut reasons: Vec<String> = Vec::new();
        let hour = local_hour(slot.start, self.tz);

        reasons.push(
            if slot.quality_score > OPTIMAL_QUALITY {
                "optimal productivity time"
            } else if slot.quality_score > GOOD_QUALITY {
                "good study time"
            } else {
                "available time slot"
            }
            .to_string(),
        );

        if task.urgency_score > 80 {
            reasons.push("high urgency".to_string());
        }
        if task.days_until_due <= SOON_DUE_DAYS {
            reasons.push(format!("due in {} days", task.days_until_due));
        }
        if task.task.task_type == TaskType::Exam && hour <= 12 {
            reasons.push("morning focus for exam".to_string());
        }
        if task.task.task_type == TaskType::Project && hour >= 14 {
            reasons.push("afternoon project work".to_string());
        }

        let note = if confidence > 90.0 {
            " (high confidence)"
        } else if confidence < 80.0 {
            " (moderate confidence)"
        } else {
            ""
        };

        format!("Scheduled during {}{note}.", reasons.join(", "))
    }
}
