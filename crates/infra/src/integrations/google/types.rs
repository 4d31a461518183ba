//! Google Calendar v3 wire types and their mapping to domain types

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use pausecal_domain::{CalendarMetadata, Event, EventStatus, NewEvent, PauseCalError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEventsResponse {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// All-day events carry a date instead of a timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleCalendar {
    pub id: String,
    pub summary: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorBody {
    #[serde(default)]
    pub message: String,
}

impl EventDateTime {
    /// Dates carry no zone here, so all-day bounds are read as UTC midnight.
    /// Callers only see them through the `all_day` flag.
    fn instant(&self) -> Result<DateTime<FixedOffset>> {
        if let Some(raw) = &self.date_time {
            return DateTime::parse_from_rfc3339(raw).map_err(|err| {
                PauseCalError::Gateway(format!("bad event timestamp '{raw}': {err}"))
            });
        }
        let raw = self
            .date
            .as_deref()
            .ok_or_else(|| PauseCalError::Gateway("event without start or end".into()))?;
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|err| PauseCalError::Gateway(format!("bad event date '{raw}': {err}")))?;
        Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
    }

    fn from_instant(instant: DateTime<FixedOffset>, time_zone: Option<&str>) -> Self {
        Self {
            date_time: Some(instant.to_rfc3339()),
            date: None,
            time_zone: time_zone.map(str::to_string),
        }
    }
}

impl TryFrom<GoogleEvent> for Event {
    type Error = PauseCalError;

    fn try_from(raw: GoogleEvent) -> Result<Self> {
        let id = raw.id.ok_or_else(|| PauseCalError::Gateway("event without id".into()))?;
        let all_day = raw.start.date_time.is_none();
        let mut event = Event::new(
            id,
            raw.summary.unwrap_or_else(|| "No Title".to_string()),
            raw.start.instant()?,
            raw.end.instant()?,
        )
        .map_err(|err| PauseCalError::Gateway(err.to_string()))?;
        event.description = raw.description;
        event.all_day = all_day;
        event.status = match raw.status.as_deref() {
            Some("tentative") => EventStatus::Tentative,
            Some("cancelled") => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        };
        Ok(event)
    }
}

impl From<&NewEvent> for GoogleEvent {
    fn from(event: &NewEvent) -> Self {
        let zone = event.time_zone.as_deref();
        Self {
            id: None,
            summary: Some(event.summary.clone()),
            description: event.description.clone(),
            start: EventDateTime::from_instant(event.start, zone),
            end: EventDateTime::from_instant(event.end, zone),
            status: None,
            recurrence: event.recurrence.clone(),
        }
    }
}

impl From<GoogleCalendar> for CalendarMetadata {
    fn from(raw: GoogleCalendar) -> Self {
        Self { id: raw.id, summary: raw.summary, time_zone: raw.time_zone }
    }
}
