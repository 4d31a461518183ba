//! Shared test helpers for `pausecal-core` integration tests.
//!
//! A scripted gateway plus a harness that wires it to the session, clock and
//! engine the way the API layer does.

#![allow(dead_code)]

pub mod gateway;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use pausecal_core::{
    CalendarEventsService, CalendarSession, EngineSettings, ManualClock, PauseResumeEngine,
    SlotFinder,
};
use pausecal_domain::Config;

pub use gateway::{CallCounts, MockCalendarGateway};

pub const CALENDAR: &str = "student@example.com";

/// 09:00 UTC on a fixed day; scenarios are expressed relative to it.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 13, 9, 0, 0).unwrap()
}

pub fn utc_at(offset_minutes: i64) -> DateTime<FixedOffset> {
    (t0() + TimeDelta::minutes(offset_minutes)).fixed_offset()
}

pub struct Harness {
    pub gateway: MockCalendarGateway,
    pub clock: Arc<ManualClock>,
    pub session: Arc<CalendarSession>,
    pub engine: PauseResumeEngine,
    pub events: CalendarEventsService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let gateway = MockCalendarGateway::new();
        let shared = gateway.shared();
        let clock = Arc::new(ManualClock::new(t0()));
        let session = Arc::new(CalendarSession::new(shared.clone()));
        let slots = SlotFinder::new(shared.clone(), config.reschedule.look_ahead());
        let engine = PauseResumeEngine::new(
            shared.clone(),
            session.clone(),
            clock.clone(),
            slots,
            EngineSettings::from_config(config),
        );
        let events = CalendarEventsService::new(shared, session.clone());
        Self { gateway, clock, session, engine, events }
    }

    /// Harness with the test calendar already configured and call counters reset.
    pub async fn configured() -> Self {
        Self::configured_with(&Config::default()).await
    }

    pub async fn configured_with(config: &Config) -> Self {
        let harness = Self::with_config(config);
        harness.session.configure(CALENDAR).await.unwrap();
        harness.gateway.reset_calls();
        harness
    }

    pub fn at(&self, offset_minutes: i64) {
        self.clock.set(t0() + TimeDelta::minutes(offset_minutes));
    }
}
