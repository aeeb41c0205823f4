//! Slot quality: assumed productivity of a time block by hour of day and weekday.
//!
//! Scoring (start time only, local clock):
//! - base 50
//! - peak hours: 9-11 +20, else 14-16 +15, else 19-21 +10, else before 8 / after 22 -20
//! - Mon-Thu +10, Sat/Sun -15
//! - meal hours (12, 18) -10
//! - clamped to 0..=100

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

pub const QUALITY_BASE: i32 = 50;
pub const MORNING_PEAK_BONUS: i32 = 20;
pub const AFTERNOON_PEAK_BONUS: i32 = 15;
pub const EVENING_PEAK_BONUS: i32 = 10;
pub const OFF_HOURS_PENALTY: i32 = -20;
pub const MIDWEEK_BONUS: i32 = 10;
pub const WEEKEND_PENALTY: i32 = -15;
pub const MEAL_HOUR_PENALTY: i32 = -10;
pub const QUALITY_MIN: i32 = 0;
pub const QUALITY_MAX: i32 = 100;

/// Score a slot by its local start time.
pub fn score_slot<Tz: TimeZone>(start: &DateTime<Tz>) -> i32 {
    let hour = start.hour();
    let mut quality = QUALITY_BASE;

    quality += match hour {
        9..=11 => MORNING_PEAK_BONUS,
        14..=16 => AFTERNOON_PEAK_BONUS,
        19..=21 => EVENING_PEAK_BONUS,
        h if h < 8 || h > 22 => OFF_HOURS_PENALTY,
        _ => 0,
    };

    quality += match start.weekday() {
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => MIDWEEK_BONUS,
        Weekday::Sat | Weekday::Sun => WEEKEND_PENALTY,
        Weekday::Fri => 0,
    };

    if hour == 12 || hour == 18 {
        quality += MEAL_HOUR_PENALTY;
    }

    quality.clamp(QUALITY_MIN, QUALITY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    // 2026-02-02 is a Monday.
    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn monday_morning_peak() {
        assert_eq!(score_slot(&at(2, 9)), 80);
        assert_eq!(score_slot(&at(2, 11)), 80);
    }

    #[test]
    fn friday_afternoon_and_evening() {
        assert_eq!(score_slot(&at(6, 14)), 65);
        assert_eq!(score_slot(&at(6, 20)), 60);
    }

    #[test]
    fn meal_hours_are_penalized() {
        assert_eq!(score_slot(&at(3, 12)), 50);
        assert_eq!(score_slot(&at(3, 18)), 50);
    }

    #[test]
    fn weekend_night_is_low() {
        // Saturday 23:00: 50 - 20 - 15
        assert_eq!(score_slot(&at(7, 23)), 15);
        // Sunday 06:00
        assert_eq!(score_slot(&at(8, 6)), 15);
    }

    #[test]
    fn uses_the_local_clock_of_the_given_zone() {
        let tz: chrono_tz::Tz = "America/Chicago".parse().unwrap();
        // 15:00 UTC is 09:00 in Chicago (CST).
        let local = at(2, 15).with_timezone(&tz);
        assert_eq!(score_slot(&local), 80);
    }
}
