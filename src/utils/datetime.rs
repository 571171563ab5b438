//! Date, time and weekday helpers.
//!
//! The HTTP boundary speaks `YYYY-MM-DD`, `HH:MM[:SS]` and Sunday-first
//! weekday indexes (0 = Sunday .. 6 = Saturday). Everything internal uses
//! chrono types; the translation lives here and nowhere else.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

use crate::errors::{LmsError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| LmsError::validation(format!("Invalid date '{input}', expected YYYY-MM-DD")))
}

/// Parse a `HH:MM` or `HH:MM:SS` time.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| LmsError::validation(format!("Invalid time '{input}', expected HH:MM[:SS]")))
}

/// Parse an ISO-8601 date or datetime into a `NaiveDateTime`.
///
/// Bare dates resolve to midnight. Used for test windows where clients send
/// either `2025-01-06` or `2025-01-06T18:00:00`.
pub fn parse_date_or_datetime(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(LmsError::validation(format!(
        "Invalid datetime '{input}', expected ISO-8601 date or datetime"
    )))
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Translate a Sunday-first index (0 = Sunday .. 6 = Saturday) to a weekday.
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Sunday-first index of a date's weekday.
pub fn sunday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-06").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
        );
        assert!(parse_date("06/01/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }

    #[test]
    fn test_parse_time_both_forms() {
        assert_eq!(
            parse_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("18:30:15").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 15).unwrap()
        );
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn test_parse_date_or_datetime() {
        let midnight = parse_date_or_datetime("2025-01-06").unwrap();
        assert_eq!(midnight.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        let evening = parse_date_or_datetime("2025-01-06T18:00:00").unwrap();
        assert_eq!(evening.time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        let spaced = parse_date_or_datetime("2025-01-06 18:00:00").unwrap();
        assert_eq!(spaced, evening);
        assert!(parse_date_or_datetime("next tuesday").is_err());
    }

    #[test]
    fn test_weekday_translation() {
        assert_eq!(weekday_from_sunday_index(0), Some(Weekday::Sun));
        assert_eq!(weekday_from_sunday_index(1), Some(Weekday::Mon));
        assert_eq!(weekday_from_sunday_index(6), Some(Weekday::Sat));
        assert_eq!(weekday_from_sunday_index(7), None);
    }

    #[test]
    fn test_sunday_index_round_trip() {
        // 2025-01-06 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(sunday_index(monday), 1);
        assert_eq!(sunday_index(monday.pred_opt().unwrap()), 0);
    }
}
