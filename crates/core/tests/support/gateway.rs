use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use pausecal_core::CalendarGateway;
use pausecal_domain::{
    CalendarMetadata, Event, EventQuery, NewEvent, PauseCalError, Result as DomainResult,
};

/// Number of calls made to each gateway operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub list: usize,
    pub insert: usize,
    pub delete: usize,
    pub get_calendar: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.list + self.insert + self.delete + self.get_calendar
    }
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    next_id: u64,
    calls: CallCounts,
    rejected_calendars: Vec<String>,
    failing_insert_prefix: Option<String>,
    fail_deletes: bool,
}

/// In-memory mock for `CalendarGateway`.
///
/// Range filters follow the calendar-store convention (`time_min` matches
/// on end, `time_max` on start). Failures can be scripted per operation.
#[derive(Default, Clone)]
pub struct MockCalendarGateway {
    state: Arc<Mutex<State>>,
}

impl MockCalendarGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> Arc<dyn CalendarGateway> {
        Arc::new(self.clone())
    }

    /// Seed an event with a fixed id.
    pub fn seed(
        &self,
        id: &str,
        summary: &str,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) {
        let event = Event::new(id, summary, start, end).unwrap();
        self.state.lock().unwrap().events.push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        let mut events = self.state.lock().unwrap().events.clone();
        events.sort_by_key(|e| e.start);
        events
    }

    pub fn find(&self, summary: &str) -> Option<Event> {
        self.events().into_iter().find(|e| e.summary == summary)
    }

    pub fn calls(&self) -> CallCounts {
        self.state.lock().unwrap().calls
    }

    pub fn reset_calls(&self) {
        self.state.lock().unwrap().calls = CallCounts::default();
    }

    pub fn reject_calendar(&self, calendar_id: &str) {
        self.state.lock().unwrap().rejected_calendars.push(calendar_id.to_string());
    }

    /// Fail inserts whose summary starts with `prefix`.
    pub fn fail_inserts_starting_with(&self, prefix: &str) {
        self.state.lock().unwrap().failing_insert_prefix = Some(prefix.to_string());
    }

    pub fn fail_deletes(&self) {
        self.state.lock().unwrap().fail_deletes = true;
    }

    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap();
        state.failing_insert_prefix = None;
        state.fail_deletes = false;
    }
}

#[async_trait]
impl CalendarGateway for MockCalendarGateway {
    async fn list_events(&self, _calendar_id: &str, query: EventQuery) -> DomainResult<Vec<Event>> {
        let mut state = self.state.lock().unwrap();
        state.calls.list += 1;

        let mut events: Vec<Event> = state
            .events
            .iter()
            .filter(|e| query.time_min.map_or(true, |min| e.end > min))
            .filter(|e| query.time_max.map_or(true, |max| e.start < max))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start);
        if let Some(limit) = query.max_results {
            events.truncate(limit as usize);
        }
        Ok(events)
    }

    async fn insert_event(&self, _calendar_id: &str, event: NewEvent) -> DomainResult<Event> {
        let mut state = self.state.lock().unwrap();
        state.calls.insert += 1;

        if let Some(prefix) = &state.failing_insert_prefix {
            if event.summary.starts_with(prefix.as_str()) {
                return Err(PauseCalError::Gateway("insert rejected".into()));
            }
        }

        state.next_id += 1;
        let mut created =
            Event::new(format!("mock-{}", state.next_id), event.summary, event.start, event.end)?;
        created.description = event.description;
        state.events.push(created.clone());
        Ok(created)
    }

    async fn delete_event(&self, _calendar_id: &str, event_id: &str) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.delete += 1;

        if state.fail_deletes {
            return Err(PauseCalError::Gateway("delete rejected".into()));
        }
        let before = state.events.len();
        state.events.retain(|e| e.id != event_id);
        if state.events.len() == before {
            return Err(PauseCalError::NotFound(format!("event {event_id}")));
        }
        Ok(())
    }

    async fn get_calendar(&self, calendar_id: &str) -> DomainResult<CalendarMetadata> {
        let mut state = self.state.lock().unwrap();
        state.calls.get_calendar += 1;

        if state.rejected_calendars.iter().any(|c| c == calendar_id) {
            return Err(PauseCalError::Gateway("calendar not accessible".into()));
        }
        Ok(CalendarMetadata {
            id: calendar_id.to_string(),
            summary: Some(format!("{calendar_id} calendar")),
            time_zone: Some("UTC".to_string()),
        })
    }
}
