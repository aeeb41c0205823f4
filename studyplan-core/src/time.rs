//! Time utilities: an injectable clock and timezone-aware local-day helpers.
//!
//! The engine works in UTC internally and resolves every "local" notion
//! (midnight, hour of day, weekday) through an explicit `Tz`.

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Source of "now" for a scheduling run.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant; used by tests and replayed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| ScheduleError::InvalidTimezone(tz.to_string()))
}

/// Parse a local time like "2026-02-20 23:59" in an IANA tz like "America/Chicago",
/// returning UTC.
pub fn parse_local_to_utc(local: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M").map_err(|e| {
        ScheduleError::InvalidDateTime {
            input: local.to_string(),
            reason: e.to_string(),
        }
    })?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| ScheduleError::InvalidDateTime {
            input: local.to_string(),
            reason: format!("ambiguous or invalid local time (DST?) in {tz}"),
        })?;

    Ok(local_dt.with_timezone(&Utc))
}

/// Calendar date of `t` in `tz`.
pub fn local_date(t: DateTime<Utc>, tz: Tz) -> NaiveDate {
    t.with_timezone(&tz).date_naive()
}

pub fn local_hour(t: DateTime<Utc>, tz: Tz) -> u32 {
    t.with_timezone(&tz).hour()
}

/// The instant `minutes` after local midnight of `date`.
///
/// Returns `None` when that wall-clock time does not exist (DST gap). For
/// repeated wall-clock times the earlier instant wins.
pub fn local_at(date: NaiveDate, minutes: i64, tz: Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let ndt = midnight.checked_add_signed(Duration::minutes(minutes))?;
    tz.from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whole days from `from` to `to`, rounded up. Negative when `to` is in the past.
pub fn days_until_ceil(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).ceil() as i64
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> Tz {
        parse_timezone("America/Chicago").unwrap()
    }

    #[test]
    fn test_parse_chicago_deadline() {
        // Feb is CST (UTC-6)
        let utc = parse_local_to_utc("2026-02-20 23:59", chicago()).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-21T05:59:00+00:00");
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(ScheduleError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn local_at_skips_dst_gap() {
        // 2026-03-08 02:30 does not exist in Chicago.
        let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert!(local_at(date, 150, chicago()).is_none());
        let nine = local_at(date, 9 * 60, chicago()).unwrap();
        assert_eq!(local_hour(nine, chicago()), 9);
    }

    #[test]
    fn days_until_rounds_up() {
        let now = Utc.with_ymd_and_hms(2026, 2, 2, 13, 0, 0).unwrap();
        assert_eq!(days_until_ceil(now, now + Duration::hours(1)), 1);
        assert_eq!(days_until_ceil(now, now + Duration::days(5)), 5);
        assert_eq!(days_until_ceil(now, now), 0);
        assert_eq!(days_until_ceil(now, now - Duration::hours(30)), -1);
    }

    #[test]
    fn weekend_detection() {
        assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()));
    }
}
