//! Process-local calendar store
//!
//! Backs `CALENDAR_PROVIDER=memory` for local runs and API tests. Range
//! filtering follows the same convention as the remote store: `time_min`
//! matches on end, `time_max` on start.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use pausecal_core::CalendarGateway;
use pausecal_domain::{CalendarMetadata, Event, EventQuery, NewEvent, PauseCalError, Result};
use tracing::debug;
use uuid::Uuid;

/// In-memory calendars keyed by calendar id. Any non-empty id is accepted and
/// starts out empty.
#[derive(Debug, Default)]
pub struct InMemoryCalendarGateway {
    calendars: RwLock<HashMap<String, Vec<Event>>>,
}

impl InMemoryCalendarGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event directly, bypassing id assignment.
    pub fn seed(&self, calendar_id: &str, event: Event) {
        self.calendars.write().entry(calendar_id.to_string()).or_default().push(event);
    }

    /// Snapshot of a calendar, ordered by start.
    pub fn snapshot(&self, calendar_id: &str) -> Vec<Event> {
        let mut events = self.calendars.read().get(calendar_id).cloned().unwrap_or_default();
        events.sort_by_key(|event| event.start);
        events
    }
}

#[async_trait]
impl CalendarGateway for InMemoryCalendarGateway {
    async fn list_events(&self, calendar_id: &str, query: EventQuery) -> Result<Vec<Event>> {
        let calendars = self.calendars.read();
        let mut events: Vec<Event> = calendars
            .get(calendar_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| query.time_min.map_or(true, |min| event.end > min))
                    .filter(|event| query.time_max.map_or(true, |max| event.start < max))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        events.sort_by_key(|event| event.start);
        if let Some(limit) = query.max_results {
            events.truncate(limit as usize);
        }
        Ok(events)
    }

    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<Event> {
        let id = Uuid::new_v4().simple().to_string();
        let mut created = Event::new(id, event.summary, event.start, event.end)?;
        created.description = event.description;

        self.calendars.write().entry(calendar_id.to_string()).or_default().push(created.clone());
        debug!(calendar_id, event_id = %created.id, "stored event in memory");
        Ok(created)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let mut calendars = self.calendars.write();
        let events = calendars
            .get_mut(calendar_id)
            .ok_or_else(|| PauseCalError::NotFound(format!("calendar {calendar_id}")))?;

        let before = events.len();
        events.retain(|event| event.id != event_id);
        if events.len() == before {
            return Err(PauseCalError::NotFound(format!("event {event_id}")));
        }
        Ok(())
    }

    async fn get_calendar(&self, calendar_id: &str) -> Result<CalendarMetadata> {
        if calendar_id.trim().is_empty() {
            return Err(PauseCalError::NotFound("calendar id is empty".into()));
        }
        self.calendars.write().entry(calendar_id.to_string()).or_default();
        Ok(CalendarMetadata {
            id: calendar_id.to_string(),
            summary: Some(calendar_id.to_string()),
            time_zone: None,
        })
    }
}
