//! Best-effort conversion of export timestamps into absolute instants.
//!
//! The captured text (e.g. `1/15/24, 10:30:45 AM` or `01-02-2023 10:00`) is
//! read month-first, the way the exporting apps write US-locale dates.
//! Anything that does not name a real calendar date yields `None`; callers
//! keep the original text and never treat a failure here as an error.
//!
//! No timezone information exists in the exports, so the wall-clock
//! reading is labelled UTC as-is.
//!
//! Two-digit years `00`-`49` are 20xx and `50`-`99` are 19xx.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Two-digit years from here on are read as 19xx.
const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

/// Time layouts, 24-hour and 12-hour.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Normalizes a raw timestamp.
///
/// # Example
///
/// ```rust
/// use chatledger::parsing::normalize_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = normalize_timestamp("1/15/24, 10:30:45 PM");
/// assert_eq!(ts, Some(Utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 45).unwrap()));
///
/// // Not a real date: kept as text by the caller.
/// assert_eq!(normalize_timestamp("32/01/24, 10:00"), None);
/// ```
pub fn normalize_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let cleaned = raw.trim().replacen(',', "", 1);
    let (date_part, time_part) = cleaned.split_once(' ')?;

    let date = parse_date(&date_part.replace('-', "/"))?;
    let time = parse_time(time_part.trim())?;

    Some(date.and_time(time).and_utc())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    if let Ok(short) = NaiveDate::parse_from_str(date, "%m/%d/%y") {
        // chrono reads 00-68 as 20xx
        return if (2000 + TWO_DIGIT_YEAR_PIVOT..2100).contains(&short.year()) {
            short.with_year(short.year() - 100)
        } else {
            Some(short)
        };
    }
    NaiveDate::parse_from_str(date, "%m/%d/%Y").ok()
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_ios_twelve_hour() {
        assert_eq!(
            normalize_timestamp("1/15/24, 10:30:45 AM"),
            Some(utc(2024, 1, 15, 10, 30, 45))
        );
        assert_eq!(
            normalize_timestamp("1/15/24, 12:05 AM"),
            Some(utc(2024, 1, 15, 0, 5, 0))
        );
        assert_eq!(
            normalize_timestamp("3/4/2024, 9:05 pm"),
            Some(utc(2024, 3, 4, 21, 5, 0))
        );
    }

    #[test]
    fn test_android_twenty_four_hour() {
        assert_eq!(
            normalize_timestamp("01/02/23, 10:00"),
            Some(utc(2023, 1, 2, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("12/31/2023, 23:59"),
            Some(utc(2023, 12, 31, 23, 59, 0))
        );
    }

    #[test]
    fn test_hyphen_separators_and_missing_comma() {
        assert_eq!(
            normalize_timestamp("01-02-2023 10:00"),
            Some(utc(2023, 1, 2, 10, 0, 0))
        );
    }

    #[test]
    fn test_two_digit_year_pivot() {
        assert_eq!(
            normalize_timestamp("1/2/49, 10:00"),
            Some(utc(2049, 1, 2, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("1/2/50, 10:00"),
            Some(utc(1950, 1, 2, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("1/2/55, 10:00"),
            Some(utc(1955, 1, 2, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("2/29/52, 10:00"),
            Some(utc(1952, 2, 29, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("1/2/99, 10:00"),
            Some(utc(1999, 1, 2, 10, 0, 0))
        );
        assert_eq!(
            normalize_timestamp("1/2/2055, 10:00"),
            Some(utc(2055, 1, 2, 10, 0, 0))
        );
    }

    #[test]
    fn test_impossible_dates() {
        assert_eq!(normalize_timestamp("32/13/24, 10:00"), None);
        assert_eq!(normalize_timestamp("2/30/23, 10:00"), None);
        // day-first dates beyond the 12th cannot be read month-first
        assert_eq!(normalize_timestamp("15/01/2024, 10:30"), None);
    }

    #[test]
    fn test_impossible_times() {
        assert_eq!(normalize_timestamp("1/2/23, 25:00"), None);
        assert_eq!(normalize_timestamp("1/2/23, 13:00 PM"), None);
    }

    #[test]
    fn test_nonsense() {
        assert_eq!(normalize_timestamp(""), None);
        assert_eq!(normalize_timestamp("yesterday"), None);
        assert_eq!(normalize_timestamp("1/2/23"), None);
    }
}
