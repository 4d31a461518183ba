//! Pause bookkeeping and the outcomes reported by pause/resume operations

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::event::Event;
use crate::errors::PauseCalError;
use crate::utils::duration::hms;

/// State captured when an event is paused.
///
/// `remaining_duration` is fixed at creation: it is the time still owed to the
/// event, independent of how long the pause lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseRecord {
    pub event_id: String,
    pub event_name: String,
    pub original_event: Event,
    /// Pause instant, in the paused event's own offset.
    pub pause_time: DateTime<FixedOffset>,
    pub original_end_time: DateTime<FixedOffset>,
    pub remaining_duration: TimeDelta,
}

impl PauseRecord {
    /// Snapshot `event` as paused at `now`.
    ///
    /// Pausing at or after the nominal end leaves zero time owed.
    #[must_use]
    pub fn capture(event: Event, now: DateTime<Utc>) -> Self {
        let pause_time = event.local_now(now);
        let original_end_time = event.end;
        let remaining_duration = (original_end_time - pause_time).max(TimeDelta::zero());
        Self {
            event_id: event.id.clone(),
            event_name: event.summary.clone(),
            original_event: event,
            pause_time,
            original_end_time,
            remaining_duration,
        }
    }

    #[must_use]
    pub fn time_since_pause(&self, now: DateTime<Utc>) -> TimeDelta {
        now.with_timezone(self.pause_time.offset()) - self.pause_time
    }

    #[must_use]
    pub fn time_since_original_end(&self, now: DateTime<Utc>) -> TimeDelta {
        now.with_timezone(self.original_end_time.offset()) - self.original_end_time
    }

    /// Express `now` in the paused event's offset.
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(self.pause_time.offset())
    }
}

/// Why a paused event was considered abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    /// The original end plus the grace period has passed.
    MissedOriginalEnd,
    /// The pause has outlived the maximum pause age.
    PauseTooOld,
}

/// Result of a successful pause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseOutcome {
    pub message: String,
    pub event_name: String,
    pub event_id: String,
    pub paused_at: DateTime<FixedOffset>,
    #[serde(with = "hms")]
    pub remaining_duration: TimeDelta,
    /// Absent when the pause landed on the event's start.
    pub completed_event_id: Option<String>,
    pub original_end_time: DateTime<FixedOffset>,
}

/// Result of a successful resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeOutcome {
    pub message: String,
    pub event_name: String,
    pub resumed_at: DateTime<FixedOffset>,
    pub ends_at: DateTime<FixedOffset>,
    #[serde(with = "hms")]
    pub duration: TimeDelta,
    #[serde(with = "hms")]
    pub pause_duration: TimeDelta,
    pub event_id: String,
    /// True when a conflict pushed the event away from "now".
    pub rescheduled: bool,
}

/// One entry of the paused-events listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedEventView {
    pub event_id: String,
    pub event_name: String,
    pub paused_at: DateTime<FixedOffset>,
    pub original_end_time: DateTime<FixedOffset>,
    #[serde(with = "hms")]
    pub remaining_duration: TimeDelta,
    pub is_last_paused: bool,
}

/// Snapshot of the pause registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausedEventsView {
    pub paused_events: Vec<PausedEventView>,
    pub last_paused_event_id: Option<String>,
}

/// Preview of a paused event the next sweep would reschedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiredEventView {
    pub event_id: String,
    pub event_name: String,
    pub paused_at: DateTime<FixedOffset>,
    pub original_end_time: DateTime<FixedOffset>,
    pub time_since_original_end_minutes: f64,
    pub time_since_pause_hours: f64,
    #[serde(with = "hms")]
    pub remaining_duration: TimeDelta,
    pub reason: AbandonReason,
    pub will_be_labeled: String,
}

/// An abandoned pause that the sweep turned into a new event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduledEvent {
    pub original_event_id: String,
    pub event_name: String,
    pub new_event_id: String,
    pub label: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// An abandoned pause the sweep could not reschedule; it stays registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepFailure {
    pub event_id: String,
    pub event_name: String,
    pub error: String,
}

/// Outcome of one abandonment sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub rescheduled: Vec<RescheduledEvent>,
    pub failed: Vec<SweepFailure>,
}

impl SweepReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rescheduled.is_empty() && self.failed.is_empty()
    }

    /// `PartialFailure` naming every entry left paused, or `None` when the
    /// sweep had no failures.
    #[must_use]
    pub fn partial_failure(&self) -> Option<PauseCalError> {
        if self.failed.is_empty() {
            return None;
        }
        let entries: Vec<String> = self
            .failed
            .iter()
            .map(|failure| {
                format!("'{}' ({}): {}", failure.event_name, failure.event_id, failure.error)
            })
            .collect();
        Some(PauseCalError::PartialFailure(format!(
            "{} of {} abandoned event(s) not rescheduled: {}",
            self.failed.len(),
            self.failed.len() + self.rescheduled.len(),
            entries.join("; ")
        )))
    }
}
