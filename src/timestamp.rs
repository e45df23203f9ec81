use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseResult, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an ISO 8601 timestamp. A value without an offset is read as UTC and
/// a date-only value as UTC midnight.
pub fn parse_timestamp(s: &str) -> ParseResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
        return Ok(date_time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::from_str(s) {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    let date = NaiveDate::from_str(s)?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
}

/// For `#[serde(deserialize_with = ...)]` on timestamp fields
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = String::deserialize(deserializer)?;
    parse_timestamp(&value).map_err(Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rfc3339(s: &str) -> String {
        parse_timestamp(s).unwrap().to_rfc3339()
    }

    #[test]
    fn test_with_offset() {
        assert_eq!(rfc3339("2024-01-15T10:30:00Z"), "2024-01-15T10:30:00+00:00");
        assert_eq!(rfc3339("2024-03-05T09:15:00+09:00"), "2024-03-05T00:15:00+00:00");
        assert_eq!(rfc3339("2024-03-05T09:15:00.250Z"), "2024-03-05T09:15:00.250+00:00");
    }

    #[test]
    fn test_without_offset() {
        assert_eq!(rfc3339("2024-01-15T10:30:00"), "2024-01-15T10:30:00+00:00");
        assert_eq!(rfc3339("2024-01-15"), "2024-01-15T00:00:00+00:00");
        assert_eq!(rfc3339(" 2024-01-15 "), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_invalid() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("15/01/2024").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
    }
}
