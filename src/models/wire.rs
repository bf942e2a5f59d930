//! Lenient date parsing for backend payloads.
//!
//! The backend is inconsistent about date shapes: the same field may come
//! back as `2024-05-01`, `2024-05-01T00:00:00` or a full RFC 3339 stamp.
//! These helpers accept all of them and treat an empty string as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the calendar-date prefix of a date or datetime string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Parse a local datetime. Offsets are dropped; the wall-clock time is kept.
/// A bare date is read as midnight.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    if raw.len() == 10 {
        return parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0));
    }
    None
}

pub fn date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
}

pub fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date: {s}"))),
    }
}

pub fn datetime<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse_datetime(&raw).ok_or_else(|| D::Error::custom(format!("invalid datetime: {raw}")))
}

pub fn opt_datetime<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_datetime(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid datetime: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_datetime_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_date("2024-05-01"), Some(expected));
        assert_eq!(parse_date("2024-05-01T09:30:00"), Some(expected));
        assert_eq!(parse_date("bad"), None);
    }

    #[test]
    fn datetime_accepts_common_shapes() {
        let nine = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-05-01T09:00"), Some(nine));
        assert_eq!(parse_datetime("2024-05-01T09:00:00"), Some(nine));
        assert_eq!(parse_datetime("2024-05-01T09:00:00.000"), Some(nine));
        assert_eq!(parse_datetime("2024-05-01T09:00:00+07:00"), Some(nine));
        assert_eq!(
            parse_datetime("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_datetime("tomorrow"), None);
    }

    #[derive(Deserialize)]
    struct DayHolder {
        #[serde(default, deserialize_with = "opt_date")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn empty_string_is_absent() {
        let p: DayHolder = serde_json::from_str(r#"{"day": ""}"#).unwrap();
        assert!(p.day.is_none());
        let p: DayHolder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(p.day.is_none());
        let p: DayHolder = serde_json::from_str(r#"{"day": null}"#).unwrap();
        assert!(p.day.is_none());
    }
}
