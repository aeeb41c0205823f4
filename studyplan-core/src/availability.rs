//! Candidate slot generation over a bounded window of upcoming days.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interval::{BusyInterval, has_conflict};
use crate::preferences::Preferences;
use crate::scoring::score_slot;
use crate::time::{is_weekend, local_at, local_date};

/// Days scanned from today (inclusive).
pub const SCAN_WINDOW_DAYS: i64 = 7;

/// A fixed-length block offered to placement. Lives for one run only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    /// 0..=100, see [`crate::scoring::score_slot`].
    pub quality_score: i32,
    /// Local calendar date the slot belongs to.
    pub date: NaiveDate,
}

pub struct AvailabilityGenerator<'a> {
    prefs: &'a Preferences,
    busy: &'a [BusyInterval],
    tz: Tz,
}

impl<'a> AvailabilityGenerator<'a> {
    /// `prefs` must already have passed [`Preferences::validate`].
    pub fn new(prefs: &'a Preferences, busy: &'a [BusyInterval], tz: Tz) -> Self {
        Self { prefs, busy, tz }
    }

    /// Enumerate conflict-free slots, chronologically.
    ///
    /// Stops once `study_days_per_week` days have produced at least one slot,
    /// or after [`SCAN_WINDOW_DAYS`] days. Days without a surviving slot do not
    /// count toward the quota. Slots starting before `now` are dropped.
    pub fn generate(&self, now: DateTime<Utc>) -> Vec<CandidateSlot> {
        let today = local_date(now, self.tz);
        let quota = self.prefs.study_days_per_week as usize;

        let mut slots = Vec::new();
        let mut days_used = 0usize;

        for offset in 0..SCAN_WINDOW_DAYS {
            if days_used >= quota {
                break;
            }
            let date = today + Duration::days(offset);

            if self.prefs.avoid_weekends && is_weekend(date) {
                debug!(%date, "skipping weekend");
                continue;
            }

            let day_slots = self.day_slots(date, now);
            debug!(%date, slots = day_slots.len(), "generated day slots");
            if day_slots.is_empty() {
                continue;
            }

            days_used += 1;
            slots.extend(day_slots);
        }

        debug!(total = slots.len(), days = days_used, "availability generated");
        slots
    }

    fn day_slots(&self, date: NaiveDate, now: DateTime<Utc>) -> Vec<CandidateSlot> {
        let length = self.prefs.session_duration.preferred;
        let step = length + self.prefs.break_minutes;
        let window_end = i64::from(self.prefs.study_hours.end) * 60;

        let mut out = Vec::new();
        let mut cursor = i64::from(self.prefs.study_hours.start) * 60;

        while cursor + length <= window_end {
            let minute = cursor;
            cursor += step;

            let Some(start) = local_at(date, minute, self.tz) else {
                continue;
            };
            let end = start + Duration::minutes(length);

            if start < now {
                continue;
            }
            if has_conflict(start, end, self.busy) {
                debug!(start = %start, "slot overlaps busy interval");
                continue;
            }

            out.push(CandidateSlot {
                start,
                end,
                duration_minutes: length,
                quality_score: score_slot(&start.with_timezone(&self.tz)),
                date,
            });
        }

        out
    }
}
