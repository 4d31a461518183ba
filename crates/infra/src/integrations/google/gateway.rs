//! Google Calendar adapter for the calendar gateway port

use std::sync::Arc;

use async_trait::async_trait;
use pausecal_core::CalendarGateway;
use pausecal_domain::{CalendarMetadata, Event, EventQuery, NewEvent, PauseCalError, Result};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::auth::AccessTokenProvider;
use super::types::{GoogleCalendar, GoogleErrorEnvelope, GoogleEvent, GoogleEventsResponse};
use crate::errors::conversions::status_error;
use crate::http::HttpClient;

/// Calendar gateway backed by the Google Calendar v3 REST API.
pub struct GoogleCalendarGateway {
    http: HttpClient,
    api_base: Url,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GoogleCalendarGateway {
    pub fn new(
        http: HttpClient,
        api_base: &str,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let api_base = Url::parse(api_base).map_err(|err| {
            PauseCalError::Config(format!("invalid calendar API base '{api_base}': {err}"))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(PauseCalError::Config(format!(
                "calendar API base '{api_base}' is not a base URL"
            )));
        }
        Ok(Self { http, api_base, tokens })
    }

    /// `{api_base}/calendars/{calendar_id}/...` with each segment escaped.
    fn url(&self, calendar_id: &str, rest: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| PauseCalError::Config("calendar API base is not a base URL".into()))?
            .pop_if_empty()
            .push("calendars")
            .push(calendar_id)
            .extend(rest);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&GoogleEvent>) -> Result<Response> {
        let token = self.tokens.access_token().await?;
        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.http.send(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<GoogleErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or(text);
        warn!(%status, detail = %detail, "calendar API request failed");
        Err(status_error(status, Some(detail.trim())))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&GoogleEvent>,
    ) -> Result<T> {
        self.send(method, url, body).await?.json::<T>().await.map_err(|err| {
            PauseCalError::Gateway(format!("unexpected calendar API response: {err}"))
        })
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarGateway {
    async fn list_events(&self, calendar_id: &str, query: EventQuery) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.url(calendar_id, &["events"])?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("singleEvents", "true").append_pair("orderBy", "startTime");
                if let Some(min) = query.time_min {
                    pairs.append_pair("timeMin", &min.to_rfc3339());
                }
                if let Some(max) = query.time_max {
                    pairs.append_pair("timeMax", &max.to_rfc3339());
                }
                if let Some(limit) = query.max_results {
                    pairs.append_pair("maxResults", &limit.to_string());
                }
                if let Some(token) = &page_token {
                    pairs.append_pair("pageToken", token);
                }
            }

            let page: GoogleEventsResponse = self.send_json(Method::GET, url, None).await?;
            for raw in page.items {
                match Event::try_from(raw) {
                    Ok(event) => events.push(event),
                    Err(err) => warn!(calendar_id, error = %err, "skipping unreadable event"),
                }
            }

            let limit_reached =
                query.max_results.is_some_and(|limit| events.len() >= limit as usize);
            match page.next_page_token {
                Some(token) if !limit_reached => page_token = Some(token),
                _ => break,
            }
        }

        if let Some(limit) = query.max_results {
            events.truncate(limit as usize);
        }
        debug!(calendar_id, count = events.len(), "listed events");
        Ok(events)
    }

    async fn insert_event(&self, calendar_id: &str, event: NewEvent) -> Result<Event> {
        let url = self.url(calendar_id, &["events"])?;
        let body = GoogleEvent::from(&event);
        let created: GoogleEvent = self.send_json(Method::POST, url, Some(&body)).await?;
        Event::try_from(created)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let url = self.url(calendar_id, &["events", event_id])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn get_calendar(&self, calendar_id: &str) -> Result<CalendarMetadata> {
        let url = self.url(calendar_id, &[])?;
        let calendar: GoogleCalendar = self.send_json(Method::GET, url, None).await?;
        Ok(calendar.into())
    }
}
