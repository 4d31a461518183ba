//! Duration formatting helpers
//!
//! Durations cross the API boundary as `H:MM:SS` strings (hours are not
//! wrapped at 24), e.g. `0:20:00` or `26:05:09`. Negative spans get a leading
//! `-`.

use chrono::TimeDelta;

/// Format a duration as `H:MM:SS`, truncating sub-second precision.
///
/// ```
/// use chrono::TimeDelta;
/// use pausecal_domain::utils::duration::format_hms;
///
/// assert_eq!(format_hms(TimeDelta::minutes(20)), "0:20:00");
/// assert_eq!(format_hms(TimeDelta::seconds(93_909)), "26:05:09");
/// ```
#[must_use]
pub fn format_hms(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{sign}{hours}:{minutes:02}:{seconds:02}")
}

/// Parse a `H:MM:SS` string produced by [`format_hms`].
///
/// Returns `None` for anything that does not have exactly three numeric
/// components with minutes and seconds below 60.
#[must_use]
pub fn parse_hms(value: &str) -> Option<TimeDelta> {
    let (negative, body) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let mut parts = body.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }

    let secs = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    let total = TimeDelta::try_seconds(secs)?;
    Some(if negative { -total } else { total })
}

/// Hours as a float, used in human-readable descriptions.
#[must_use]
pub fn fractional_hours(duration: TimeDelta) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}

/// Minutes as a float.
#[must_use]
pub fn fractional_minutes(duration: TimeDelta) -> f64 {
    duration.num_seconds() as f64 / 60.0
}

/// Serde adapter for `TimeDelta` fields rendered as `H:MM:SS`.
pub mod hms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hms(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hms(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid H:MM:SS duration: {raw}")))
    }
}
