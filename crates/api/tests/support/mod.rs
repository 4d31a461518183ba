#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use http_body_util::BodyExt;
use pausecal_api::{build_router, AppContext};
use pausecal_core::ManualClock;
use pausecal_domain::{Config, Event};
use pausecal_infra::integrations::InMemoryCalendarGateway;
use serde_json::Value;
use tower::ServiceExt;

pub const CALENDAR: &str = "student@example.com";

/// 2025-11-13 09:00 UTC
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 13, 9, 0, 0).unwrap()
}

pub fn utc_at(minutes: i64) -> DateTime<FixedOffset> {
    (t0() + TimeDelta::minutes(minutes)).fixed_offset()
}

pub fn parse_instant(value: &Value) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value.as_str().expect("instant string")).expect("rfc3339")
}

/// Router over an in-memory store and a manual clock.
pub struct TestApp {
    pub gateway: Arc<InMemoryCalendarGateway>,
    pub clock: Arc<ManualClock>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let gateway = Arc::new(InMemoryCalendarGateway::new());
        let clock = Arc::new(ManualClock::new(t0()));
        let ctx = AppContext::with_parts(config, gateway.clone(), clock.clone());
        Self { gateway, clock, router: build_router(Arc::new(ctx)) }
    }

    /// Router with [`CALENDAR`] already configured.
    pub async fn configured() -> Self {
        let app = Self::new();
        let body = serde_json::json!({ "gmail": CALENDAR });
        let (status, _) = app.send(Method::POST, "/configure-calendar", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    pub fn seed(&self, id: &str, summary: &str, start_min: i64, end_min: i64) {
        let event = Event::new(id, summary, utc_at(start_min), utc_at(end_min)).unwrap();
        self.gateway.seed(CALENDAR, event);
    }

    pub fn at(&self, minutes: i64) {
        self.clock.set(t0() + TimeDelta::minutes(minutes));
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json =
            if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, None).await
    }
}
