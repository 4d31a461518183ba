//! Calendar gateway port interfaces
//!
//! The remote event store is reached only through [`CalendarGateway`].
//! Adapters live in `pausecal-infra` (Google Calendar, in-memory).

use async_trait::async_trait;
use pausecal_domain::{CalendarMetadata, Event, EventQuery, NewEvent, Result};

/// Read/write access to a remote calendar.
///
/// `list_events` follows the calendar-store convention for range filters:
/// `time_min` keeps events that *end* after it and `time_max` keeps events
/// that *start* before it, so an event already in progress at `time_min` is
/// returned. Results are ordered by start.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// List events in `calendar_id` matching `query`, ordered by start.
    async fn list_events(&self, calendar_id: &str, query: EventQuery) -> Result<Vec<Event>>;

    /// Insert `event` and return it with the store-assigned identifier.
    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<Event>;

    /// Delete a single event by identifier.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()>;

    /// Fetch calendar metadata; used to validate that a calendar is reachable.
    async fn get_calendar(&self, calendar_id: &str) -> Result<CalendarMetadata>;
}
