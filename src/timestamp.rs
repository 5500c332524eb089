//! Entry timestamp handling.
//!
//! Zip entries carry an MS-DOS date/time: local fields with two-second
//! resolution, covering the years 1980 through 2107. This crate treats
//! those fields as UTC when converting to and from Unix time.
//!
//! # Example
//!
//! ```rust
//! use zipedit::Timestamp;
//!
//! let ts = Timestamp::from_unix_secs(315_532_800); // 1980-01-01 00:00:00
//! assert_eq!(ts.year(), 1980);
//! assert_eq!(ts.to_string(), "1980-01-01 00:00:00");
//! assert_eq!(ts.as_unix_secs(), 315_532_800);
//! ```

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: i64 = 86_400;

/// A calendar timestamp attached to an archive entry.
///
/// Ordering compares fields from year down to second, which matches
/// chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Timestamp {
    /// Creates a timestamp from Unix seconds (since January 1, 1970 UTC).
    pub fn from_unix_secs(secs: i64) -> Self {
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self {
            year: year.clamp(0, u16::MAX as i64) as u16,
            month: month as u8,
            day: day as u8,
            hour: (rem / 3600) as u8,
            minute: (rem % 3600 / 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Creates a timestamp from a `SystemTime`, truncating sub-second precision.
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs() as i64),
        };
        Self::from_unix_secs(secs)
    }

    /// Returns the current time.
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Converts from the zip crate's date/time representation.
    pub fn from_zip(dt: zip::DateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    /// Converts to the zip crate's date/time representation.
    ///
    /// Returns `None` when the timestamp lies outside the DOS range
    /// (1980-2107).
    pub fn to_zip(self) -> Option<zip::DateTime> {
        zip::DateTime::from_date_and_time(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
        .ok()
    }

    /// Returns seconds since the Unix epoch.
    pub fn as_unix_secs(&self) -> i64 {
        let days = days_from_civil(self.year as i64, self.month as u32, self.day as u32);
        days * SECONDS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }

    /// Returns this timestamp as a `SystemTime`.
    pub fn as_system_time(&self) -> SystemTime {
        let secs = self.as_unix_secs();
        if secs >= 0 {
            UNIX_EPOCH + Duration::from_secs(secs as u64)
        } else {
            UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
        }
    }

    /// Calendar year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Month of the year (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Hour of the day (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute of the hour (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Second of the minute (0-59).
    pub fn second(&self) -> u8 {
        self.second
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Formats `time` as `yyyyMMddHHmmss.SSS` (UTC).
pub(crate) fn compact_millis(time: SystemTime) -> String {
    let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or_default();
    let ts = Timestamp::from_unix_secs(since_epoch.as_secs() as i64);
    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}.{:03}",
        ts.year,
        ts.month,
        ts.day,
        ts.hour,
        ts.minute,
        ts.second,
        since_epoch.subsec_millis()
    )
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = (y - era * 400) as u64;
    let mp = ((month + 9) % 12) as u64;
    let doy = (153 * mp + 2) / 5 + day as u64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe as i64 - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe as i64 + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
