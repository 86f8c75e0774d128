//! Calendar timestamps and Julian Date bookkeeping.
//!
//! The conversion uses the Fliegel–Van Flandern integer day-number formula
//! followed by a fractional-day term. Calendar fields are not range-checked:
//! out-of-range months or days still produce a number, just not a meaningful
//! one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc};
use qspace_core::constants::{J2000_JD, MJD_OFFSET};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UTC calendar instant with integer fields and fractional seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarTimestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Errors raised while building timestamps from external representations.
#[derive(Debug, Error)]
pub enum EpochError {
    #[error("failed to parse RFC 3339 timestamp: {0}")]
    Parse(#[from] chrono::ParseError),
    #[error("unix time {0} s is outside the representable calendar range")]
    OutOfRange(i64),
}

impl CalendarTimestamp {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Break a chrono UTC instant into calendar fields, keeping sub-second precision.
    pub fn from_datetime(dt: &DateTime<Utc>) -> Self {
        let second = f64::from(dt.second()) + f64::from(dt.nanosecond()) * 1e-9;
        Self::new(
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            second,
        )
    }

    /// Calendar fields for a count of seconds since 1970-01-01T00:00:00 UTC.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, EpochError> {
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(|dt| Self::from_datetime(&dt))
            .ok_or(EpochError::OutOfRange(seconds))
    }

    /// Julian Date of this timestamp. See [`julian_date`].
    pub fn julian_date(&self) -> f64 {
        julian_date(self)
    }
}

impl FromStr for CalendarTimestamp {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = DateTime::parse_from_rfc3339(s.trim())?.with_timezone(&Utc);
        Ok(Self::from_datetime(&dt))
    }
}

impl fmt::Display for CalendarTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Julian Date (days since the Julian epoch, day boundary at noon).
///
/// The integer day number follows Fliegel–Van Flandern; every division
/// truncates toward zero. Half a day is subtracted to move from noon to
/// midnight before the time of day is added.
pub fn julian_date(ts: &CalendarTimestamp) -> f64 {
    let y = i64::from(ts.year);
    let m = i64::from(ts.month);
    let d = i64::from(ts.day);

    let mterm = (m - 14) / 12;
    let aterm = (1461 * (y + 4800 + mterm)) / 4;
    let bterm = (367 * (m - 2 - 12 * mterm)) / 12;
    let cterm = (3 * ((y + 4900 + mterm) / 100)) / 4;

    let day_number = aterm + bterm - cterm + d - 32075;
    let midnight = day_number as f64 - 0.5;

    let hours = f64::from(ts.hour) + (f64::from(ts.minute) + ts.second / 60.0) / 60.0;
    midnight + hours / 24.0
}

/// Modified Julian Date (`JD - 2400000.5`).
pub fn modified_julian_date(ts: &CalendarTimestamp) -> f64 {
    julian_date(ts) - MJD_OFFSET
}

/// Days elapsed since J2000.0 (`JD - 2451545.0`).
pub fn days_since_j2000(ts: &CalendarTimestamp) -> f64 {
    julian_date(ts) - J2000_JD
}

/// Julian Date for Unix seconds, the epoch encoding used by simulation configs.
pub fn julian_date_from_unix(seconds: i64) -> Result<f64, EpochError> {
    CalendarTimestamp::from_unix_seconds(seconds).map(|ts| julian_date(&ts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_terms_truncate_toward_zero() {
        // January forces mterm = -1, exercising the negative division.
        let jd = julian_date(&CalendarTimestamp::new(2000, 1, 1, 0, 0, 0.0));
        assert_eq!(jd, 2_451_544.5);
    }

    #[test]
    fn display_is_rfc3339_like() {
        let ts = CalendarTimestamp::new(2024, 3, 9, 7, 5, 1.5);
        assert_eq!(ts.to_string(), "2024-03-09T07:05:01.500000Z");
    }
}
