use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::core::MILLIS_PER_DAY;
use crate::error::{TrendError, TrendResult};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// UTC calendar day, ordered chronologically.
///
/// Stored as whole days since the Unix epoch; `Display` renders the
/// `YYYY-MM-DD` form. Ordering of the two representations is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(i64);

impl DayKey {
    #[must_use]
    pub fn from_timestamp_ms(timestamp_ms: i64) -> Self {
        Self(timestamp_ms.div_euclid(MILLIS_PER_DAY))
    }

    /// Epoch milliseconds of the day's UTC midnight.
    #[must_use]
    pub fn start_ms(self) -> i64 {
        self.0.saturating_mul(MILLIS_PER_DAY)
    }

    #[must_use]
    pub fn days_since_epoch(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.start_ms()) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            None => write!(f, "day#{}", self.0),
        }
    }
}

/// Parses a wire timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 with an offset, naive date-times (treated as UTC) with a
/// space or `T` separator, and bare `YYYY-MM-DD` dates.
pub fn parse_timestamp_ms(input: &str) -> TrendResult<i64> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.timestamp_millis());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp_millis());
        }
    }

    Err(TrendError::InvalidTimestamp {
        input: input.to_owned(),
    })
}

#[must_use]
pub fn timestamp_ms_to_datetime(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
}

#[cfg(test)]
mod tests {
    use super::{DayKey, parse_timestamp_ms};

    #[test]
    fn day_key_discards_time_of_day() {
        let morning = parse_timestamp_ms("2024-03-05 01:00:00").expect("morning");
        let night = parse_timestamp_ms("2024-03-05 23:59:59").expect("night");
        assert_eq!(
            DayKey::from_timestamp_ms(morning),
            DayKey::from_timestamp_ms(night)
        );
        assert_eq!(DayKey::from_timestamp_ms(night).to_string(), "2024-03-05");
    }

    #[test]
    fn day_key_floors_pre_epoch_timestamps() {
        let key = DayKey::from_timestamp_ms(-1);
        assert_eq!(key.to_string(), "1969-12-31");
        assert_eq!(key.start_ms(), -86_400_000);
    }

    #[test]
    fn parses_supported_wire_formats() {
        let expected = 1_709_596_800_000;
        assert_eq!(parse_timestamp_ms("2024-03-05").expect("date"), expected);
        assert_eq!(
            parse_timestamp_ms("2024-03-05T00:00:00").expect("naive t"),
            expected
        );
        assert_eq!(
            parse_timestamp_ms("2024-03-05 00:00:00.000").expect("naive fraction"),
            expected
        );
        assert_eq!(
            parse_timestamp_ms("2024-03-05T02:00:00+02:00").expect("offset"),
            expected
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let err = parse_timestamp_ms("yesterday").expect_err("garbage");
        assert!(format!("{err}").contains("yesterday"));
    }
}
