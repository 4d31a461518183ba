//! Calendar event types shared by the gateway port and its adapters

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{PauseCalError, Result};

/// Status reported by the calendar store for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Tentative => "tentative",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event as it exists in the calendar store.
///
/// Both instants keep the offset the store reported them in; "now" checks
/// are done in that offset rather than the process-local one.
///
/// Date-only (all-day) entries are flagged with `all_day`. Their instants are
/// day boundaries, not a time anyone is busy, so they are never paused and
/// never block a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub all_day: bool,
}

impl Event {
    /// Build an event, rejecting empty or inverted intervals.
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self> {
        ensure_ordered(start, end)?;
        Ok(Self {
            id: id.into(),
            summary: summary.into(),
            description: None,
            start,
            end,
            status: EventStatus::Confirmed,
            all_day: false,
        })
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The event's own offset (taken from its start instant).
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        *self.start.offset()
    }

    /// Express `now` in this event's offset.
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset())
    }

    /// True when `now` falls inside `[start, end)`.
    #[must_use]
    pub fn is_ongoing_at(&self, now: DateTime<Utc>) -> bool {
        let local = self.local_now(now);
        self.start <= local && local < self.end
    }

    /// True when the two intervals share any time.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> bool {
        self.start < end && start < self.end
    }

    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.summary.starts_with(prefix)
    }
}

/// Request body for inserting an event; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// IANA zone name sent alongside the instants, if any.
    pub time_zone: Option<String>,
    #[serde(default)]
    pub recurrence: Vec<String>,
}

impl NewEvent {
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Self> {
        ensure_ordered(start, end)?;
        Ok(Self {
            summary: summary.into(),
            description: None,
            start,
            end,
            time_zone: None,
            recurrence: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Vec<String>) -> Self {
        self.recurrence = recurrence;
        self
    }
}

/// Metadata returned when validating access to a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMetadata {
    pub id: String,
    pub summary: Option<String>,
    pub time_zone: Option<String>,
}

/// Range filter for listing events. Results are always ordered by start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub time_min: Option<DateTime<FixedOffset>>,
    pub time_max: Option<DateTime<FixedOffset>>,
    pub max_results: Option<u32>,
}

impl EventQuery {
    /// Everything the calendar holds.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Events ending after `start`, optionally capped at `max_results`.
    #[must_use]
    pub fn starting_at(start: DateTime<FixedOffset>) -> Self {
        Self { time_min: Some(start), ..Self::default() }
    }

    #[must_use]
    pub fn between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { time_min: Some(start), time_max: Some(end), max_results: None }
    }

    #[must_use]
    pub const fn limit(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

fn ensure_ordered(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<()> {
    if start < end {
        Ok(())
    } else {
        Err(PauseCalError::InvalidInput(format!(
            "event start {} must be before end {}",
            start.to_rfc3339(),
            end.to_rfc3339()
        )))
    }
}
