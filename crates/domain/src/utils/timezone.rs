//! Resolve wall-clock datetimes into offset-aware instants
//!
//! Create-event requests carry naive local datetimes plus either an IANA zone
//! name (`Asia/Kolkata`) or a UTC offset (`+5:30`, `-7:00`). The offset wins
//! when both are given.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::errors::{PauseCalError, Result};

/// Where a wall-clock time should be anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSpec {
    Named(Tz),
    Offset(FixedOffset),
}

impl ZoneSpec {
    /// Pick the zone for a request: the offset if present, else the name.
    pub fn resolve(time_zone: &str, utc_offset: Option<&str>) -> Result<Self> {
        match utc_offset {
            Some(offset) => parse_utc_offset(offset).map(Self::Offset),
            None => time_zone
                .parse::<Tz>()
                .map(Self::Named)
                .map_err(|_| PauseCalError::InvalidInput(format!("unknown time zone: {time_zone}"))),
        }
    }

    /// Label sent to the calendar store alongside the instants.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Named(tz) => tz.name().to_string(),
            Self::Offset(offset) => format!("UTC{offset}"),
        }
    }

    /// Anchor `naive` in this zone. Ambiguous local times take the earlier
    /// instant; times skipped by a DST jump are rejected.
    pub fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
        match self {
            Self::Offset(offset) => single(offset.from_local_datetime(&naive), naive),
            Self::Named(tz) => single(tz.from_local_datetime(&naive), naive)
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
        }
    }
}

/// Parse `+5:30`, `-07:00`, `+0:00` style offsets.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || PauseCalError::InvalidInput(format!("invalid UTC offset: {raw}"));
    let trimmed = raw.trim();
    let (sign, body) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = body.split_once(':').unwrap_or((body, "0"));
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Parse an ISO 8601 datetime. Offset-qualified strings keep their offset;
/// naive ones are anchored in `zone`.
pub fn parse_datetime(raw: &str, zone: &ZoneSpec) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| PauseCalError::InvalidInput(format!("invalid datetime '{raw}': {e}")))?;
    zone.localize(naive)
}

fn single<T: TimeZone>(result: LocalResult<DateTime<T>>, naive: NaiveDateTime) -> Result<DateTime<T>> {
    match result {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
        LocalResult::None => Err(PauseCalError::InvalidInput(format!(
            "local time {naive} does not exist in the requested zone"
        ))),
    }
}
