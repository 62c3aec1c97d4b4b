//! Timestamp normalization into the run's target timezone.
//!
//! The export carries two timestamp encodings:
//!
//! - epoch milliseconds as a digit-only string (`"1704931800000"`), always UTC
//! - ISO 8601 text, with or without an offset; offset-less values are UTC
//!
//! Both are resolved to a UTC instant first and then shifted into the target
//! zone. Calendar dates are taken only after that shift, so a value just past
//! UTC midnight lands on the correct local day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use thiserror::Error;

use shiptrack_model::{DATETIME_FORMAT, TargetTimezone, parse_utc_offset};

/// Local date-time layouts tried after any offset suffix is split off.
/// Basic-format input (`20240110T235000`) is expanded to these first.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Errors that can occur when reading a raw timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("epoch milliseconds out of range: {0}")]
    OutOfRange(String),
    #[error("unrecognized timestamp: {0}")]
    Unrecognized(String),
}

/// Resolve a raw timestamp to a UTC instant.
///
/// Digit-only input is epoch milliseconds; anything else is ISO 8601.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return parse_epoch_millis(trimmed);
    }
    parse_iso8601(trimmed)
}

/// Parse a raw timestamp and express it in the target timezone.
pub fn to_target_timezone(
    raw: &str,
    timezone: &TargetTimezone,
) -> Result<DateTime<FixedOffset>, TimestampError> {
    parse_instant(raw).map(|instant| timezone.localize(instant))
}

/// Local calendar date of a raw timestamp in the target timezone.
pub fn local_date(raw: &str, timezone: &TargetTimezone) -> Result<NaiveDate, TimestampError> {
    to_target_timezone(raw, timezone).map(|local| local.date_naive())
}

/// Calendar-day difference between two local timestamps.
///
/// Both values are truncated to their local dates before subtracting, so
/// 23:50 on one day to 00:10 on the next is one day, not zero.
pub fn calendar_days_between(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> i64 {
    (end.date_naive() - start.date_naive()).num_days()
}

/// Render a local timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_local(value: &DateTime<FixedOffset>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn parse_epoch_millis(digits: &str) -> Result<DateTime<Utc>, TimestampError> {
    digits
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| TimestampError::OutOfRange(digits.to_string()))
}

fn parse_iso8601(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let unrecognized = || TimestampError::Unrecognized(value.to_string());
    let (local, offset) = split_offset(value);
    let offset = match offset {
        None => None,
        Some("Z" | "z") => Some(Utc.fix()),
        Some(text) => Some(parse_utc_offset(text).ok_or_else(unrecognized)?),
    };
    let naive = parse_local(local).ok_or_else(unrecognized)?;
    match offset {
        None => Ok(naive.and_utc()),
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok_or_else(unrecognized),
    }
}

/// Split a trailing `Z` or numeric offset off the time portion.
///
/// Values without a time portion never carry an offset, so the dashes of a
/// bare date are left alone.
fn split_offset(value: &str) -> (&str, Option<&str>) {
    let Some(time_start) = value.find(['T', 't', ' ']) else {
        return (value, None);
    };
    if value.ends_with(['Z', 'z']) {
        let split = value.len() - 1;
        return (&value[..split], Some(&value[split..]));
    }
    match value[time_start..].rfind(['+', '-']) {
        Some(position) => {
            let split = time_start + position;
            (&value[..split], Some(&value[split..]))
        }
        None => (value, None),
    }
}

fn parse_local(local: &str) -> Option<NaiveDateTime> {
    let expanded = expand_basic_format(local);
    let local = expanded.as_deref().unwrap_or(local);
    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(local, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(local, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Rewrite `YYYYMMDDTHHMM[SS][.fff]` into its extended form.
fn expand_basic_format(local: &str) -> Option<String> {
    let (date, time) = local.split_once(['T', 't'])?;
    let (clock, fraction) = match time.find(['.', ',']) {
        Some(position) => (&time[..position], &time[position + 1..]),
        None => (time, ""),
    };
    let all_digits = |text: &str| text.bytes().all(|b| b.is_ascii_digit());
    if date.len() != 8 || !all_digits(date) || !all_digits(clock) || !all_digits(fraction) {
        return None;
    }
    let mut expanded = format!("{}-{}-{}T", &date[..4], &date[4..6], &date[6..]);
    match clock.len() {
        4 => expanded.push_str(&format!("{}:{}", &clock[..2], &clock[2..])),
        6 => expanded.push_str(&format!("{}:{}:{}", &clock[..2], &clock[2..4], &clock[4..])),
        _ => return None,
    }
    if !fraction.is_empty() {
        expanded.push('.');
        expanded.push_str(fraction);
    }
    Some(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> TargetTimezone {
        TargetTimezone::fixed(5, 30).unwrap()
    }

    #[test]
    fn epoch_millis_are_utc() {
        let instant = parse_instant("1704931200000").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn iso_without_offset_is_utc() {
        let instant = parse_instant("2024-01-10T23:50:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap());
    }

    #[test]
    fn iso_with_offset_is_converted() {
        let instant = parse_instant("2024-01-11T05:20:00+05:30").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap());
        let instant = parse_instant("2024-01-11T05:20:00+0530").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap());
    }

    #[test]
    fn iso_fractional_seconds_and_space_separator() {
        let instant = parse_instant("2024-01-10 23:50:00.250").unwrap();
        assert_eq!(instant.timestamp_millis(), 1704930600250);
    }

    #[test]
    fn minute_precision_with_zulu() {
        let instant = parse_instant("2024-01-10T23:50Z").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap());
        let instant = parse_instant("2024-01-11 05:20+05:30").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap());
    }

    #[test]
    fn hour_only_offset() {
        let instant = parse_instant("2024-01-10T23:50:00+05").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 18, 50, 0).unwrap());
        let instant = parse_instant("2024-01-10T03:00:00-08").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 11, 0, 0).unwrap());
    }

    #[test]
    fn basic_format() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 10, 23, 50, 0).unwrap();
        assert_eq!(parse_instant("20240110T235000Z").unwrap(), expected);
        assert_eq!(parse_instant("20240110T235000").unwrap(), expected);
        assert_eq!(parse_instant("20240111T0520+0530").unwrap(), expected);
        assert_eq!(
            parse_instant("20240110T235000.5Z").unwrap().timestamp_millis(),
            expected.timestamp_millis() + 500
        );
    }

    #[test]
    fn malformed_offsets_are_rejected() {
        for raw in ["2024-01-10T23:50:00+05:3", "2024-01-10T23:50:00+5:30", "2024-01-10T23:50:00+"] {
            assert!(
                matches!(parse_instant(raw), Err(TimestampError::Unrecognized(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let instant = parse_instant("2024-01-10").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn utc_midnight_crossing_moves_local_date() {
        let local = to_target_timezone("2024-01-10T23:50:00Z", &ist()).unwrap();
        assert_eq!(format_local(&local), "2024-01-11 05:20:00");
        assert_eq!(
            local_date("2024-01-10T23:50:00Z", &ist()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
        );
    }

    #[test]
    fn named_zone_matches_fixed_ist() {
        let named = to_target_timezone("1704930600000", &TargetTimezone::default()).unwrap();
        let fixed = to_target_timezone("1704930600000", &ist()).unwrap();
        assert_eq!(format_local(&named), format_local(&fixed));
    }

    #[test]
    fn calendar_days_ignore_clock_time() {
        let pickup = to_target_timezone("2024-01-10T23:50:00Z", &ist()).unwrap();
        let delivery = to_target_timezone("2024-01-12T01:00:00Z", &ist()).unwrap();
        assert_eq!(format_local(&delivery), "2024-01-12 06:30:00");
        assert_eq!(calendar_days_between(&pickup, &delivery), 1);
        assert_eq!(calendar_days_between(&delivery, &pickup), -1);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_instant("  "), Err(TimestampError::Empty));
        assert!(matches!(
            parse_instant("99999999999999999999999"),
            Err(TimestampError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_instant("next tuesday"),
            Err(TimestampError::Unrecognized(_))
        ));
        assert!(matches!(
            parse_instant("-1704931200000"),
            Err(TimestampError::Unrecognized(_))
        ));
    }
}
