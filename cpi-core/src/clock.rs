//! Wall-clock access and the two timestamp formats used in documents.
//!
//! Everything runs on local naive time truncated to whole seconds, which is
//! what the registry file stores.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Source of "now". Injected so registry timestamps and rendered documents
/// can be frozen in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The local system clock, second precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Both renderings of a single captured instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// `YYYYMMDD-HHMM`, used in file names and titles.
    pub compact: String,
    /// `YYYY-MM-DD HH:MM`, used in document headers.
    pub human: String,
}

impl Stamp {
    pub fn at(instant: NaiveDateTime) -> Self {
        Stamp {
            compact: instant.format("%Y%m%d-%H%M").to_string(),
            human: instant.format("%Y-%m-%d %H:%M").to_string(),
        }
    }

    /// Sample `clock` once.
    pub fn capture(clock: &dyn Clock) -> Self {
        Self::at(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn stamp_formats() {
        let t = NaiveDate::from_ymd_opt(2025, 1, 7)
            .unwrap()
            .and_hms_opt(8, 5, 59)
            .unwrap();
        let stamp = Stamp::at(t);
        assert_eq!(stamp.compact, "20250107-0805");
        assert_eq!(stamp.human, "2025-01-07 08:05");
    }

    #[test]
    fn system_clock_has_no_subseconds() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }
}
