//! Human-readable timestamp parsing.
//!
//! Record feeds hand us their time fields as strings in whatever shape the
//! upstream system prints them ("2020-01-02", "Jan. 1, 1970",
//! "2020-01-02T10:00:00Z", ...). This module turns those into comparable
//! instants and into the integer unix-epoch seconds used as sorted-set scores.
//!
//! Values without a zone are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{ArgentError, Result};

/// Cursor value used when an index has never been written to.
pub const EPOCH_CURSOR: &str = "Jan. 1, 1970";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b. %d, %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a human-readable timestamp into a UTC instant.
///
/// # Examples
///
/// ```
/// use argent::timestamp::parse_timestamp;
///
/// let t = parse_timestamp("Jan. 1, 1970").unwrap();
/// assert_eq!(t.timestamp(), 0);
///
/// let t = parse_timestamp("2020-01-02").unwrap();
/// assert_eq!(t.timestamp(), 1_577_923_200);
/// ```
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArgentError::timestamp_parse(value));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
    }

    // Bare unix seconds, as emitted by feeds that store integer times.
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(dt) = trimmed
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        {
            return Ok(dt);
        }
    }

    Err(ArgentError::timestamp_parse(value))
}

/// Parse a timestamp and return it as unix-epoch seconds (the index score).
pub fn to_score(value: &str) -> Result<i64> {
    parse_timestamp(value).map(|dt| dt.timestamp())
}

/// The instant the epoch cursor sentinel stands for.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_sentinel() {
        assert_eq!(parse_timestamp(EPOCH_CURSOR).unwrap(), epoch());
        assert_eq!(to_score(EPOCH_CURSOR).unwrap(), 0);
    }

    #[test]
    fn test_date_only() {
        assert_eq!(to_score("2020-01-02").unwrap(), 1_577_923_200);
        assert_eq!(to_score("2020/01/02").unwrap(), 1_577_923_200);
    }

    #[test]
    fn test_month_name_forms() {
        let expected = to_score("2021-03-04").unwrap();
        assert_eq!(to_score("Mar. 4, 2021").unwrap(), expected);
        assert_eq!(to_score("Mar 4, 2021").unwrap(), expected);
        assert_eq!(to_score("March 4, 2021").unwrap(), expected);
        assert_eq!(to_score("4 March 2021").unwrap(), expected);
    }

    #[test]
    fn test_datetime_forms() {
        let expected = 1_577_959_200; // 2020-01-02 10:00:00 UTC
        assert_eq!(to_score("2020-01-02 10:00:00").unwrap(), expected);
        assert_eq!(to_score("2020-01-02T10:00:00").unwrap(), expected);
        assert_eq!(to_score("2020-01-02T10:00:00Z").unwrap(), expected);
        assert_eq!(to_score("2020-01-02T12:00:00+02:00").unwrap(), expected);
        assert_eq!(to_score("Thu, 02 Jan 2020 10:00:00 +0000").unwrap(), expected);
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(to_score("1577923200").unwrap(), 1_577_923_200);
    }

    #[test]
    fn test_unparseable() {
        for value in ["", "   ", "yesterday", "2020-13-45"] {
            match parse_timestamp(value) {
                Err(ArgentError::TimestampParse { value: v }) => assert_eq!(v, value),
                other => panic!("expected TimestampParse for {value:?}, got {other:?}"),
            }
        }
    }
}
