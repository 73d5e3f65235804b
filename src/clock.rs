//! Injectable source of "now"
//!
//! Every date-dependent calculation receives its date from a [`Clock`] so
//! month and day boundaries can be pinned in tests.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub trait Clock {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day
    fn today(&self) -> NaiveDate;
}

/// Wall clock; "today" is the local calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one day, used by tests and the `--today` override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    day: NaiveDate,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self { day }
    }
}

impl Clock for FixedClock {
    /// The pinned day at the current local time of day, so records made in
    /// one session still sort in the order they were made
    fn now(&self) -> DateTime<Utc> {
        let at = |time: NaiveTime| {
            Local
                .from_local_datetime(&self.day.and_time(time))
                .earliest()
                .map(|local| local.with_timezone(&Utc))
        };
        at(Local::now().time())
            .or_else(|| at(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)))
            .unwrap_or_else(|| self.day.and_time(NaiveTime::MIN).and_utc())
    }

    fn today(&self) -> NaiveDate {
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = FixedClock::new(day);

        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().with_timezone(&Local).date_naive(), day);
    }

    #[test]
    fn test_fixed_clock_timestamps_advance() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());

        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.now() >= first);
    }
}
