//! Clock and local calendar helpers.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::ParseError;

/// Date layout accepted at the boundary and used in storage paths.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Zone all Norwegian price zones are bucketed in.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Oslo;

/// Source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current local date in `tz`.
    fn today(&self, tz: Tz) -> NaiveDate {
        self.now().with_timezone(&tz).date_naive()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock that always reports `instant`.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Creates a clock at a local wall-clock time in `tz`.
    ///
    /// Returns `None` if the wall-clock time does not exist in `tz`.
    #[must_use]
    pub fn at_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<Self> {
        tz.from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Returns the first instant of `date` in `tz`.
///
/// Zones that skip midnight on a clock change start the day at the first
/// existing wall-clock hour instead.
#[must_use]
pub fn local_midnight(date: NaiveDate, tz: Tz) -> Option<DateTime<Tz>> {
    (0..3).find_map(|hour| {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        tz.from_local_datetime(&date.and_time(time)).earliest()
    })
}

/// Returns the first instant of the local day following `instant`.
#[must_use]
pub fn next_local_midnight(instant: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let next_day = instant.date_naive().succ_opt()?;
    local_midnight(next_day, instant.timezone())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns an error if the input is not a valid calendar date in that layout.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| ParseError::InvalidDate {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use chrono_tz::Europe::Oslo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_midnight_winter() {
        let midnight = local_midnight(date(2025, 1, 22), Oslo).unwrap();
        assert_eq!(midnight.to_rfc3339(), "2025-01-22T00:00:00+01:00");
        assert_eq!(
            midnight.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 1, 21, 23, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_day_lengths_across_clock_changes() {
        let spring = local_midnight(date(2025, 3, 30), Oslo).unwrap();
        let after_spring = next_local_midnight(&spring).unwrap();
        assert_eq!(after_spring - spring, TimeDelta::hours(23));

        let autumn = local_midnight(date(2025, 10, 26), Oslo).unwrap();
        let after_autumn = next_local_midnight(&autumn).unwrap();
        assert_eq!(after_autumn - autumn, TimeDelta::hours(25));
    }

    #[test]
    fn test_fixed_clock_today() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 21, 23, 30, 0).unwrap());
        assert_eq!(clock.today(Oslo), date(2025, 1, 22));
        assert_eq!(clock.today(chrono_tz::UTC), date(2025, 1, 21));

        let local = FixedClock::at_local(Oslo, date(2025, 1, 22), NaiveTime::MIN).unwrap();
        assert_eq!(local.now(), clock.now() - TimeDelta::minutes(30));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-22").unwrap(), date(2025, 1, 22));
        assert!(matches!(
            parse_date("22.01.2025"),
            Err(ParseError::InvalidDate { .. })
        ));
        assert!(parse_date("2025-02-30").is_err());
    }
}
