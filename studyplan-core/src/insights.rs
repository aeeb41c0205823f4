//! Post-run summary of a schedule for an insights panel.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::session::StudySession;
use crate::task::Priority;
use crate::time::local_date;

pub const HEAVY_DAY_HOURS: f64 = 6.0;
pub const HIGH_PRIORITY_SHARE: f64 = 0.6;

pub const FALLBACK_HINT: &str =
    "Consider adjusting your schedule - some tasks could not be placed before their deadlines";
pub const HEAVY_DAY_HINT: &str = "Some days have heavy study loads - consider redistributing tasks";
pub const HIGH_PRIORITY_HINT: &str =
    "Many high-priority items detected - focus on completing these first";
pub const EMPTY_SCHEDULE_HINT: &str =
    "No study sessions could be scheduled - try adjusting your calendar or task deadlines";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInsights {
    pub total_hours: f64,
    /// Mean session confidence, 0 for an empty schedule.
    pub average_confidence: f64,
    /// Sessions placed without a qualifying slot.
    pub fallback_sessions: usize,
    /// Hours per local calendar day.
    pub workload_by_day: BTreeMap<NaiveDate, f64>,
    pub recommendations: Vec<String>,
}

impl ScheduleInsights {
    pub fn busiest_day(&self) -> Option<(NaiveDate, f64)> {
        self.workload_by_day
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(d, h)| (*d, *h))
    }
}

pub fn summarize(sessions: &[StudySession], tz: Tz) -> ScheduleInsights {
    if sessions.is_empty() {
        return ScheduleInsights {
            recommendations: vec![EMPTY_SCHEDULE_HINT.to_string()],
            ..ScheduleInsights::default()
        };
    }

    let mut workload_by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for s in sessions {
        let hours = s.duration_minutes as f64 / 60.0;
        *workload_by_day.entry(local_date(s.start, tz)).or_default() += hours;
    }

    let total_hours = sessions.iter().map(|s| s.duration_minutes as f64 / 60.0).sum();
    let average_confidence =
        sessions.iter().map(|s| s.confidence).sum::<f64>() / sessions.len() as f64;

    let fallback_sessions = sessions.iter().filter(|s| !s.ai_optimized).count();

    let mut recommendations = Vec::new();
    if fallback_sessions > 0 {
        recommendations.push(FALLBACK_HINT.to_string());
    }
    if workload_by_day.values().any(|h| *h > HEAVY_DAY_HOURS) {
        recommendations.push(HEAVY_DAY_HINT.to_string());
    }
    let high = sessions.iter().filter(|s| s.priority == Priority::High).count();
    if high as f64 > sessions.len() as f64 * HIGH_PRIORITY_SHARE {
        recommendations.push(HIGH_PRIORITY_HINT.to_string());
    }

    ScheduleInsights {
        total_hours,
        average_confidence,
        fallback_sessions,
        workload_by_day,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionCategory;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn chicago() -> Tz {
        "America/Chicago".parse().unwrap()
    }

    fn session(start: DateTime<Utc>, minutes: i64, priority: Priority) -> StudySession {
        StudySession {
            id: format!("session-{start}"),
            task_id: "t".to_string(),
            title: "T".to_string(),
            start,
            end: start + Duration::minutes(minutes),
            duration_minutes: minutes,
            category: SessionCategory::Focused,
            confidence: 85.0,
            reasoning: String::new(),
            priority,
            quality_score: 80,
            urgency_score: 60,
            ai_optimized: true,
        }
    }

    // 2026-02-02 09:00 CST
    fn monday_nine() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 15, 0, 0).unwrap()
    }

    #[test]
    fn empty_schedule_gets_one_hint() {
        let i = summarize(&[], chicago());
        assert_eq!(i.total_hours, 0.0);
        assert_eq!(i.recommendations, vec![EMPTY_SCHEDULE_HINT.to_string()]);
        assert!(i.busiest_day().is_none());
    }

    #[test]
    fn totals_and_local_day_buckets() {
        let sessions = vec![
            session(monday_nine(), 90, Priority::Medium),
            session(monday_nine() + Duration::hours(2), 30, Priority::Low),
            // 23:30 local Monday is already Tuesday in UTC
            session(Utc.with_ymd_and_hms(2026, 2, 3, 5, 30, 0).unwrap(), 60, Priority::High),
        ];
        let i = summarize(&sessions, chicago());

        assert!((i.total_hours - 3.0).abs() < 1e-9);
        assert!((i.average_confidence - 85.0).abs() < 1e-9);
        let monday = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        assert_eq!(i.workload_by_day.len(), 1);
        assert!((i.workload_by_day[&monday] - 3.0).abs() < 1e-9);
        assert!(i.recommendations.is_empty());
    }

    #[test]
    fn heavy_days_and_priority_skew_are_flagged() {
        let sessions: Vec<_> = (0..4)
            .map(|n| session(monday_nine() + Duration::minutes(105 * n), 105, Priority::High))
            .collect();
        let i = summarize(&sessions, chicago());

        assert_eq!(i.busiest_day().map(|(_, h)| h), Some(7.0));
        assert_eq!(
            i.recommendations,
            vec![HEAVY_DAY_HINT.to_string(), HIGH_PRIORITY_HINT.to_string()]
        );
    }

    #[test]
    fn fallback_sessions_are_flagged() {
        let mut s = session(monday_nine(), 60, Priority::Low);
        s.ai_optimized = false;
        s.confidence = 65.0;
        let placed = session(monday_nine() + Duration::hours(2), 60, Priority::Low);
        let i = summarize(&[s, placed], chicago());
        assert_eq!(i.fallback_sessions, 1);
        assert_eq!(i.recommendations, vec![FALLBACK_HINT.to_string()]);
    }
}
