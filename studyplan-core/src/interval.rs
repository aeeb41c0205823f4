//! Busy time supplied by an external calendar, and the overlap test used to
//! keep study sessions out of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            title: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(ScheduleError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Half-open overlap: `[a_start, a_end)` and `[b_start, b_end)` share at least one instant.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// True if `[start, end)` overlaps any busy interval.
pub fn has_conflict(start: DateTime<Utc>, end: DateTime<Utc>, busy: &[BusyInterval]) -> bool {
    busy.iter().any(|b| overlaps(start, end, b.start, b.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, h, m, 0).unwrap()
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!overlaps(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn partial_and_containing_ranges_overlap() {
        assert!(overlaps(at(9, 0), at(10, 30), at(10, 0), at(11, 0)));
        assert!(overlaps(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
        assert!(overlaps(at(10, 15), at(10, 45), at(10, 0), at(11, 0)));
    }

    #[test]
    fn conflict_against_any_interval() {
        let busy = vec![
            BusyInterval::new(at(8, 0), at(8, 30)),
            BusyInterval::new(at(9, 0), at(10, 30)),
        ];
        assert!(has_conflict(at(10, 0), at(10, 0) + Duration::minutes(90), &busy));
        assert!(!has_conflict(at(10, 30), at(12, 0), &busy));
        assert!(!has_conflict(at(10, 30), at(12, 0), &[]));
    }

    #[test]
    fn inverted_interval_is_a_contract_violation() {
        assert!(BusyInterval::new(at(10, 0), at(9, 0)).validate().is_err());
        assert!(BusyInterval::new(at(9, 0), at(9, 0)).validate().is_ok());
    }
}
