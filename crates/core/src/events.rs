//! Event administration on the configured calendar
//!
//! Create, list and delete-by-name. These sit beside the pause engine and
//! share its session and gateway but not its lock.

use std::sync::Arc;

use pausecal_domain::{Event, EventQuery, NewEvent, Result};
use tracing::info;

use crate::calendar_ports::CalendarGateway;
use crate::session::CalendarSession;

pub struct CalendarEventsService {
    gateway: Arc<dyn CalendarGateway>,
    session: Arc<CalendarSession>,
}

impl CalendarEventsService {
    pub fn new(gateway: Arc<dyn CalendarGateway>, session: Arc<CalendarSession>) -> Self {
        Self { gateway, session }
    }

    pub async fn create(&self, event: NewEvent) -> Result<Event> {
        let calendar_id = self.session.current()?;
        let created = self.gateway.insert_event(&calendar_id, event).await?;
        info!(event_id = %created.id, event_name = %created.summary, "event created");
        Ok(created)
    }

    /// Every event on the calendar, ordered by start.
    pub async fn list_all(&self) -> Result<Vec<Event>> {
        let calendar_id = self.session.current()?;
        self.gateway.list_events(&calendar_id, EventQuery::all()).await
    }

    /// Delete every event whose summary is exactly `name`.
    ///
    /// Returns the deleted events; an empty list means nothing matched.
    /// Stops at the first failing delete, leaving earlier deletions in place.
    pub async fn delete_by_name(&self, name: &str) -> Result<Vec<Event>> {
        let calendar_id = self.session.current()?;
        let events = self.gateway.list_events(&calendar_id, EventQuery::all()).await?;

        let mut deleted = Vec::new();
        for event in events.into_iter().filter(|event| event.summary == name) {
            self.gateway.delete_event(&calendar_id, &event.id).await?;
            deleted.push(event);
        }
        info!(event_name = name, deleted = deleted.len(), "events deleted by name");
        Ok(deleted)
    }
}
