//! Target timezone configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;

use crate::error::ModelError;

/// Timezone used when none is configured (India Standard Time).
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// The single timezone all output timestamps and calendar dates are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTimezone {
    /// A constant UTC offset such as `+05:30`.
    Fixed(FixedOffset),
    /// An IANA zone such as `Asia/Kolkata`.
    Named(Tz),
}

impl TargetTimezone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Build a fixed-offset zone from hours and minutes east of UTC.
    pub fn fixed(hours: i32, minutes: i32) -> Option<Self> {
        let sign = if hours < 0 { -1 } else { 1 };
        let seconds = hours * 3600 + sign * minutes.abs() * 60;
        FixedOffset::east_opt(seconds).map(Self::Fixed)
    }

    /// Convert a UTC instant into this zone.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Fixed(offset) => instant.with_timezone(offset),
            Self::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        }
    }
}

impl Default for TargetTimezone {
    fn default() -> Self {
        Self::Named(chrono_tz::Asia::Kolkata)
    }
}

impl fmt::Display for TargetTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) if offset.local_minus_utc() == 0 => write!(f, "UTC"),
            Self::Fixed(offset) => write!(f, "UTC{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

impl FromStr for TargetTimezone {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidTimezone(value.to_string()));
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        let offset_text = trimmed
            .strip_prefix("UTC")
            .or_else(|| trimmed.strip_prefix("utc"))
            .unwrap_or(trimmed);
        if offset_text.starts_with('+') || offset_text.starts_with('-') {
            return parse_utc_offset(offset_text)
                .map(Self::Fixed)
                .ok_or_else(|| ModelError::InvalidTimezone(value.to_string()));
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| ModelError::InvalidTimezone(value.to_string()))
    }
}

/// Parse a signed UTC offset: `+HH`, `+HHMM` or `+HH:MM` (or `-`).
///
/// Any other shape is rejected, including single-digit hours.
pub fn parse_utc_offset(text: &str) -> Option<FixedOffset> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => rest.split_at(2),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
