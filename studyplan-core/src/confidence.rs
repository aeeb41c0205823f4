//! Per-session fit confidence and whole-schedule optimization score.

use crate::analyzer::AnalyzedTask;
use crate::availability::CandidateSlot;
use crate::session::StudySession;

pub const CONFIDENCE_BASE: f64 = 75.0;
pub const QUALITY_FACTOR: f64 = 0.2;
pub const QUALITY_BONUS_CAP: f64 = 20.0;
pub const HIGH_URGENCY_THRESHOLD: i32 = 80;
pub const HIGH_URGENCY_BONUS: f64 = 10.0;
pub const TIGHT_DEADLINE_DAYS: i64 = 2;
pub const TIGHT_DEADLINE_PENALTY: f64 = -5.0;
pub const DURATION_FIT_TOLERANCE_MINUTES: i64 = 15;
pub const DURATION_FIT_BONUS: f64 = 10.0;
pub const PLACED_CONFIDENCE_MIN: f64 = 70.0;
pub const PLACED_CONFIDENCE_MAX: f64 = 95.0;

/// Confidence assigned to fallback sessions; bypasses the placed-session clamp.
pub const FALLBACK_CONFIDENCE: f64 = 65.0;

const HIGH_CONFIDENCE_THRESHOLD: f64 = 90.0;
const HIGH_CONFIDENCE_BONUS: i64 = 10;
const OPTIMIZED_BONUS: i64 = 5;
const MAX_SESSION_POINTS: i64 = 100 + HIGH_CONFIDENCE_BONUS + OPTIMIZED_BONUS;

/// Confidence (70..=95) that `slot` is a good fit for `task`.
pub fn estimate_confidence(
    task: &AnalyzedTask,
    slot: &CandidateSlot,
    required_minutes: i64,
) -> f64 {
    let mut confidence = CONFIDENCE_BASE;

    confidence += (f64::from(slot.quality_score) * QUALITY_FACTOR).min(QUALITY_BONUS_CAP);

    if task.urgency_score > HIGH_URGENCY_THRESHOLD {
        confidence += HIGH_URGENCY_BONUS;
    }
    if task.days_until_due <= TIGHT_DEADLINE_DAYS {
        confidence += TIGHT_DEADLINE_PENALTY;
    }
    if (slot.duration_minutes - required_minutes).abs() <= DURATION_FIT_TOLERANCE_MINUTES {
        confidence += DURATION_FIT_BONUS;
    }

    confidence.clamp(PLACED_CONFIDENCE_MIN, PLACED_CONFIDENCE_MAX)
}

/// Aggregate schedule quality in 0..=100. Zero for an empty schedule.
pub fn optimization_score(sessions: &[StudySession]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let total: i64 = sessions
        .iter()
        .map(|s| {
            let mut points = i64::from(s.quality_score);
            if s.confidence > HIGH_CONFIDENCE_THRESHOLD {
                points += HIGH_CONFIDENCE_BONUS;
            }
            if s.ai_optimized {
                points += OPTIMIZED_BONUS;
            }
            points
        })
        .sum();

    let max_possible = sessions.len() as i64 * MAX_SESSION_POINTS;
    (100.0 * total as f64 / max_possible as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_task;
    use crate::session::SessionCategory;
    use crate::task::{Priority, Task};
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 13, 0, 0).unwrap()
    }

    fn slot(quality: i32, minutes: i64) -> CandidateSlot {
        let start = now() + Duration::hours(2);
        CandidateSlot {
            start,
            end: start + Duration::minutes(minutes),
            duration_minutes: minutes,
            quality_score: quality,
            date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
        }
    }

    fn session(quality: i32, confidence: f64, ai_optimized: bool) -> StudySession {
        StudySession {
            id: "s".to_string(),
            task_id: "t".to_string(),
            title: "T".to_string(),
            start: now(),
            end: now() + Duration::minutes(90),
            duration_minutes: 90,
            category: SessionCategory::Focused,
            confidence,
            reasoning: String::new(),
            priority: Priority::Medium,
            quality_score: quality,
            urgency_score: 50,
            ai_optimized,
        }
    }

    #[test]
    fn well_fitting_slot_hits_the_ceiling() {
        let task = analyze_task(
            &Task::new("t", "Essay", now() + Duration::days(5)).with_priority(Priority::High),
            now(),
        );
        // 75 + 16 + 10 (urgency 85) + 10 (fit) -> 95
        assert_eq!(estimate_confidence(&task, &slot(80, 90), 90), 95.0);
    }

    #[test]
    fn mismatched_duration_earns_no_fit_bonus() {
        let task = analyze_task(
            &Task::new("t", "Essay", now() + Duration::days(10)),
            now(),
        );
        // 75 + 0 - 0 + 0 (120 vs 30 mismatch)
        assert_eq!(estimate_confidence(&task, &slot(0, 30), 120), 75.0);

        let urgent_tight = analyze_task(
            &Task::new("u", "Lab", now() + Duration::hours(10)).with_priority(Priority::Low),
            now(),
        );
        // urgency 50+40-10+5 = 85 -> +10, due in 1 day -> -5: 75+0+10-5 = 80
        assert_eq!(estimate_confidence(&urgent_tight, &slot(0, 30), 120), 80.0);
    }

    #[test]
    fn optimization_score_examples() {
        assert_eq!(optimization_score(&[]), 0);
        // (80 + 10 + 5) / 115
        assert_eq!(optimization_score(&[session(80, 95.0, true)]), 83);
        // (80 + 5 + 40) / 230 = 54.3
        assert_eq!(
            optimization_score(&[session(80, 85.0, true), session(40, 65.0, false)]),
            54
        );
    }
}
