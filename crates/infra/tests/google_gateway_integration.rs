//! Google Calendar gateway against a mock REST server.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use pausecal_core::{
    CalendarGateway, CalendarSession, EngineSettings, ManualClock, PauseResumeEngine, SlotFinder,
};
use pausecal_domain::{EventQuery, NewEvent, PauseCalError};
use pausecal_infra::http::HttpClient;
use pausecal_infra::integrations::{
    GoogleCalendarGateway, ServiceAccountKey, ServiceAccountTokenProvider, StaticTokenProvider,
};
use serde_json::json;
use wiremock::matchers::{
    body_partial_json, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";

fn http() -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .base_backoff(Duration::from_millis(1))
        .build()
        .expect("http client")
}

fn gateway(server: &MockServer) -> GoogleCalendarGateway {
    let tokens = Arc::new(StaticTokenProvider::new("test-token"));
    GoogleCalendarGateway::new(http(), &format!("{}/calendar/v3", server.uri()), tokens)
        .expect("gateway")
}

fn google_event(id: &str, summary: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "id": id,
        "summary": summary,
        "start": { "dateTime": start },
        "end": { "dateTime": end },
        "status": "confirmed"
    })
}

#[tokio::test]
async fn list_events_sends_range_and_follows_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [google_event(
                "evt-2", "Review", "2025-11-13T11:00:00+05:30", "2025-11-13T12:00:00+05:30"
            )]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .and(query_param("timeMin", "2025-11-13T09:00:00+05:30"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                google_event(
                    "evt-1", "Standup", "2025-11-13T09:30:00+05:30", "2025-11-13T10:00:00+05:30"
                ),
                { "id": "broken", "start": {}, "end": {} }
            ],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let start = DateTime::parse_from_rfc3339("2025-11-13T09:00:00+05:30").unwrap();
    let events =
        gateway(&server).list_events("primary", EventQuery::starting_at(start)).await.unwrap();

    let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["evt-1", "evt-2"]);
    assert_eq!(events[0].start.offset().local_minus_utc(), 19_800);
}

#[tokio::test]
async fn pause_skips_all_day_entries_listed_before_the_meeting() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar/v3/calendars/primary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "primary" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "bday",
                    "summary": "Mom's birthday",
                    "start": { "date": "2025-11-13" },
                    "end": { "date": "2025-11-14" }
                },
                google_event(
                    "review",
                    "Design review",
                    "2025-11-13T15:00:00+05:30",
                    "2025-11-13T16:00:00+05:30"
                )
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(body_partial_json(json!({ "summary": "[COMPLETED] Design review" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_event(
            "done-1",
            "[COMPLETED] Design review",
            "2025-11-13T15:00:00+05:30",
            "2025-11-13T15:30:00+05:30",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{EVENTS_PATH}/review")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{EVENTS_PATH}/bday")))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let gateway: Arc<dyn CalendarGateway> = Arc::new(gateway(&server));
    let session = Arc::new(CalendarSession::new(gateway.clone()));
    session.configure("primary").await.unwrap();
    // 10:00 UTC == 15:30 IST
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 11, 13, 10, 0, 0).unwrap()));
    let engine = PauseResumeEngine::new(
        gateway.clone(),
        session,
        clock,
        SlotFinder::new(gateway, TimeDelta::days(1)),
        EngineSettings::default(),
    );

    let outcome = engine.pause().await.unwrap();
    assert_eq!(outcome.event_id, "review");
    assert_eq!(outcome.remaining_duration, TimeDelta::minutes(30));
    assert_eq!(outcome.completed_event_id.as_deref(), Some("done-1"));
}

#[tokio::test]
async fn list_events_stops_at_max_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [google_event(
                "evt-1", "Standup", "2025-11-13T09:30:00Z", "2025-11-13T10:00:00Z"
            )],
            "nextPageToken": "never-followed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let start = DateTime::parse_from_rfc3339("2025-11-13T09:00:00Z").unwrap();
    let events = gateway(&server)
        .list_events("primary", EventQuery::starting_at(start).limit(1))
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn insert_event_posts_body_and_returns_created_event() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(EVENTS_PATH))
        .and(body_partial_json(json!({
            "summary": "[COMPLETED] Deep work",
            "start": { "dateTime": "2025-11-13T09:00:00+00:00", "timeZone": "UTC" },
            "end": { "dateTime": "2025-11-13T09:40:00+00:00" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(google_event(
            "created-1",
            "[COMPLETED] Deep work",
            "2025-11-13T09:00:00Z",
            "2025-11-13T09:40:00Z",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let start = DateTime::parse_from_rfc3339("2025-11-13T09:00:00Z").unwrap();
    let end = DateTime::parse_from_rfc3339("2025-11-13T09:40:00Z").unwrap();
    let event = NewEvent::new("[COMPLETED] Deep work", start, end).unwrap().with_time_zone("UTC");

    let created = gateway(&server).insert_event("primary", event).await.unwrap();
    assert_eq!(created.id, "created-1");
    assert_eq!(created.end, end);
}

#[tokio::test]
async fn delete_event_hits_event_path() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{EVENTS_PATH}/evt-1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).delete_event("primary", "evt-1").await.unwrap();
}

#[tokio::test]
async fn missing_event_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "Not Found" }
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).delete_event("primary", "gone").await.unwrap_err();
    assert!(matches!(err, PauseCalError::NotFound(ref msg) if msg.contains("Not Found")));
}

#[tokio::test]
async fn get_calendar_returns_metadata_and_maps_forbidden() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/calendar/v3/calendars/primary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "primary",
            "summary": "Student",
            "timeZone": "Asia/Kolkata"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/calendar/v3/calendars/locked"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Insufficient permissions" }
        })))
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let metadata = gateway.get_calendar("primary").await.unwrap();
    assert_eq!(metadata.summary.as_deref(), Some("Student"));
    assert_eq!(metadata.time_zone.as_deref(), Some("Asia/Kolkata"));

    let err = gateway.get_calendar("locked").await.unwrap_err();
    assert!(matches!(err, PauseCalError::Auth(_)));
}

#[tokio::test]
async fn server_errors_on_listing_are_retried_then_surface_as_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = gateway(&server).list_events("primary", EventQuery::all()).await.unwrap_err();
    assert!(matches!(err, PauseCalError::Gateway(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn service_account_token_is_exchanged_once_and_reused() {
    let server = MockServer::start().await;

    let fixture = include_str!("fixtures/service_account.json");
    let mut key_json: serde_json::Value = serde_json::from_str(fixture).unwrap();
    key_json["token_uri"] = json!(format!("{}/token", server.uri()));
    let key = ServiceAccountKey::from_json(&key_json.to_string()).unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.service-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/calendar/v3/calendars/primary"))
        .and(header("authorization", "Bearer ya29.service-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "primary" })))
        .expect(2)
        .mount(&server)
        .await;

    let scopes = vec!["https://www.googleapis.com/auth/calendar".to_string()];
    let tokens = Arc::new(ServiceAccountTokenProvider::new(key, &scopes, http()).unwrap());
    let gateway =
        GoogleCalendarGateway::new(http(), &format!("{}/calendar/v3", server.uri()), tokens)
            .unwrap();

    gateway.get_calendar("primary").await.unwrap();
    gateway.get_calendar("primary").await.unwrap();
}

#[tokio::test]
async fn rejected_token_exchange_is_auth_error() {
    let server = MockServer::start().await;

    let fixture = include_str!("fixtures/service_account.json");
    let mut key_json: serde_json::Value = serde_json::from_str(fixture).unwrap();
    key_json["token_uri"] = json!(format!("{}/token", server.uri()));
    let key = ServiceAccountKey::from_json(&key_json.to_string()).unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let tokens = Arc::new(ServiceAccountTokenProvider::new(key, &[], http()).unwrap());
    let gateway =
        GoogleCalendarGateway::new(http(), &format!("{}/calendar/v3", server.uri()), tokens)
            .unwrap();

    let err = gateway.get_calendar("primary").await.unwrap_err();
    assert!(matches!(err, PauseCalError::Auth(ref msg) if msg.contains("invalid_grant")));
}
