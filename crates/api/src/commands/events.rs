//! Event administration routes

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, FixedOffset};
use pausecal_domain::utils::{parse_datetime, ZoneSpec};
use pausecal_domain::{Event, NewEvent, Result};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::execute_command;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub event_name: String,
    /// `YYYY-MM-DDTHH:MM[:SS]`, local to the zone below, or RFC 3339.
    pub start_datetime: String,
    pub end_datetime: String,
    /// IANA zone name; falls back to the configured default.
    pub timezone: Option<String>,
    /// `±H:MM`; wins over `timezone` when present.
    pub utc_offset: Option<String>,
    pub recurrence: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub message: String,
    pub event_id: String,
    pub event_name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub timezone_used: String,
    pub original_timezone: String,
    pub utc_offset: Option<String>,
    pub recurrence: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub event_id: String,
    pub event_name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub status: String,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.id,
            event_name: event.summary,
            start_time: event.start,
            end_time: event.end,
            status: event.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub message: String,
    pub total_events: usize,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteEventRequest {
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub message: String,
    pub deleted_count: usize,
    pub deleted_events: Vec<EventSummary>,
}

/// `POST /create-event`
pub async fn create_event(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Json<CreateEventResponse>> {
    let original_timezone =
        request.timezone.clone().unwrap_or_else(|| ctx.config.server.default_timezone.clone());

    execute_command("events::create_event", || async {
        let zone = ZoneSpec::resolve(&original_timezone, request.utc_offset.as_deref())?;
        let event = build_new_event(&request, &zone)?;
        let created = ctx.events.create(event).await?;

        Ok(CreateEventResponse {
            message: "Event created successfully".to_string(),
            event_id: created.id,
            event_name: created.summary,
            start_time: created.start,
            end_time: created.end,
            timezone_used: zone.label(),
            original_timezone: original_timezone.clone(),
            utc_offset: request.utc_offset.clone(),
            recurrence: request.recurrence.clone(),
        })
    })
    .await
    .map(Json)
}

fn build_new_event(request: &CreateEventRequest, zone: &ZoneSpec) -> Result<NewEvent> {
    let start = parse_datetime(&request.start_datetime, zone)?;
    let end = parse_datetime(&request.end_datetime, zone)?;
    let mut event = NewEvent::new(request.event_name.clone(), start, end)?;

    // The store only understands IANA names; offsets travel in the instants.
    if let ZoneSpec::Named(tz) = zone {
        event = event.with_time_zone(tz.name());
    }
    if let Some(recurrence) = &request.recurrence {
        event = event.with_recurrence(recurrence.clone());
    }
    Ok(event)
}

/// `GET /events`
pub async fn list_events(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<EventsResponse>> {
    let events = execute_command("events::list_events", || ctx.events.list_all()).await?;
    let events: Vec<EventSummary> = events.into_iter().map(EventSummary::from).collect();

    Ok(Json(EventsResponse {
        message: format!("Found {} events in calendar", events.len()),
        total_events: events.len(),
        events,
    }))
}

/// `DELETE /delete-event`
pub async fn delete_event(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<DeleteEventRequest>,
) -> ApiResult<Json<DeleteEventResponse>> {
    let deleted = execute_command("events::delete_event", || {
        ctx.events.delete_by_name(&request.event_name)
    })
    .await?;

    let message = if deleted.is_empty() {
        format!("No events found with name '{}'", request.event_name)
    } else {
        format!(
            "Successfully deleted {} event(s) with name '{}'",
            deleted.len(),
            request.event_name
        )
    };

    Ok(Json(DeleteEventResponse {
        message,
        deleted_count: deleted.len(),
        deleted_events: deleted.into_iter().map(EventSummary::from).collect(),
    }))
}
