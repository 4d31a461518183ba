//! Pause/resume engine
//!
//! Every mutating operation holds the registry lock for its whole duration,
//! gateway round-trips included, so at most one pause, resume or sweep is in
//! flight at a time. There is no rollback: a gateway failure part-way through
//! a multi-step operation is surfaced as-is.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pausecal_domain::utils::duration::{fractional_hours, fractional_minutes};
use pausecal_domain::{
    AbandonReason, Config, Event, EventQuery, ExpiredEventView, LabelConfig, NewEvent,
    PauseCalError, PauseOutcome, PauseRecord, PausedEventView, PausedEventsView, RescheduledEvent,
    Result, ResumeOutcome, SweepFailure, SweepReport,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::policy::AbandonmentPolicy;
use super::registry::PauseRegistry;
use crate::calendar_ports::CalendarGateway;
use crate::clock::Clock;
use crate::scheduling::SlotFinder;
use crate::session::CalendarSession;

/// Tunables taken from [`Config`].
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub policy: AbandonmentPolicy,
    pub labels: LabelConfig,
    pub max_events_to_fetch: u32,
    /// Sweep before each pause.
    pub auto_reschedule: bool,
    pub log_reschedules: bool,
}

impl EngineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            policy: AbandonmentPolicy::from_config(&config.reschedule),
            labels: config.labels.clone(),
            max_events_to_fetch: config.gateway.max_events_to_fetch,
            auto_reschedule: config.reschedule.enabled,
            log_reschedules: config.reschedule.log_reschedules,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Owns the pause registry and drives the gateway through pause, resume and
/// the abandonment sweep.
pub struct PauseResumeEngine {
    gateway: Arc<dyn CalendarGateway>,
    session: Arc<CalendarSession>,
    clock: Arc<dyn Clock>,
    slots: SlotFinder,
    settings: EngineSettings,
    registry: Mutex<PauseRegistry>,
}

impl PauseResumeEngine {
    pub fn new(
        gateway: Arc<dyn CalendarGateway>,
        session: Arc<CalendarSession>,
        clock: Arc<dyn Clock>,
        slots: SlotFinder,
        settings: EngineSettings,
    ) -> Self {
        Self { gateway, session, clock, slots, settings, registry: Mutex::new(PauseRegistry::new()) }
    }

    /// Pause whatever event is running right now.
    ///
    /// The time already spent is written back as a completed-labelled event
    /// and the original is deleted. Pausing at the very start owes the whole
    /// event, so no completed event is written. If the completed insert
    /// fails, nothing has changed. If the delete fails afterwards, the
    /// completed event stays and the error is returned without registering a
    /// pause.
    pub async fn pause(&self) -> Result<PauseOutcome> {
        let calendar_id = self.session.current()?;
        let mut registry = self.registry.lock().await;

        if self.settings.auto_reschedule {
            let report = self.sweep_locked(&mut registry, &calendar_id, self.clock.now()).await;
            if !report.is_empty() {
                debug!(
                    rescheduled = report.rescheduled.len(),
                    failed = report.failed.len(),
                    "sweep before pause"
                );
            }
        }

        let now = self.clock.now();
        let event = self.find_ongoing(&calendar_id, now).await?;
        let paused_at = event.local_now(now);

        let completed_event_id = if paused_at > event.start {
            let completed = NewEvent::new(
                LabelConfig::label(&self.settings.labels.completed, &event.summary),
                event.start,
                paused_at,
            )?;
            Some(self.gateway.insert_event(&calendar_id, completed).await?.id)
        } else {
            None
        };

        if let Err(err) = self.gateway.delete_event(&calendar_id, &event.id).await {
            error!(
                event_id = %event.id,
                completed_event_id = ?completed_event_id,
                error = %err,
                "original event not deleted after recording completed part; reconcile manually"
            );
            return Err(err);
        }

        let record = PauseRecord::capture(event, now);
        let outcome = PauseOutcome {
            message: "Event paused successfully".to_string(),
            event_name: record.event_name.clone(),
            event_id: record.event_id.clone(),
            paused_at: record.pause_time,
            remaining_duration: record.remaining_duration,
            completed_event_id,
            original_end_time: record.original_end_time,
        };
        info!(
            event_id = %outcome.event_id,
            event_name = %outcome.event_name,
            remaining_secs = outcome.remaining_duration.num_seconds(),
            "event paused"
        );
        registry.insert(record);
        Ok(outcome)
    }

    /// Resume the most recently paused event in the next free slot from now.
    pub async fn resume(&self) -> Result<ResumeOutcome> {
        let calendar_id = self.session.current()?;
        let mut registry = self.registry.lock().await;
        let record = registry.last().cloned().ok_or(PauseCalError::NoPausedEvent)?;

        let now = self.clock.now();
        let proposed_start = record.local_now(now);
        let pause_duration = proposed_start - record.pause_time;

        let (start, end) =
            self.slots.find_slot(&calendar_id, proposed_start, record.remaining_duration).await?;
        let mut resumed = NewEvent::new(record.event_name.clone(), start, end)?;
        if let Some(description) = &record.original_event.description {
            resumed = resumed.with_description(description.clone());
        }
        let created = self.gateway.insert_event(&calendar_id, resumed).await?;

        registry.remove(&record.event_id);
        let rescheduled = start != proposed_start;
        info!(
            event_id = %record.event_id,
            new_event_id = %created.id,
            rescheduled,
            "event resumed"
        );

        Ok(ResumeOutcome {
            message: if rescheduled {
                "Event resumed in the next available slot".to_string()
            } else {
                "Event resumed successfully".to_string()
            },
            event_name: record.event_name,
            resumed_at: start,
            ends_at: end,
            duration: record.remaining_duration,
            pause_duration,
            event_id: created.id,
            rescheduled,
        })
    }

    /// Reschedule every abandoned pause.
    ///
    /// A no-op when no calendar is configured. Entries that fail stay
    /// registered and are reported in [`SweepReport::failed`].
    pub async fn auto_reschedule_abandoned_events(&self) -> Result<SweepReport> {
        let Some(calendar_id) = self.session.peek() else {
            return Ok(SweepReport::default());
        };
        let mut registry = self.registry.lock().await;
        Ok(self.sweep_locked(&mut registry, &calendar_id, self.clock.now()).await)
    }

    /// Sweep on explicit request; requires a configured calendar.
    pub async fn force_reschedule(&self) -> Result<SweepReport> {
        let calendar_id = self.session.current()?;
        let mut registry = self.registry.lock().await;
        Ok(self.sweep_locked(&mut registry, &calendar_id, self.clock.now()).await)
    }

    /// Paused events the next sweep would reschedule, without touching them.
    pub async fn expired_events(&self) -> Vec<ExpiredEventView> {
        let now = self.clock.now();
        let registry = self.registry.lock().await;
        let labels = &self.settings.labels;

        let mut expired: Vec<ExpiredEventView> = registry
            .iter()
            .filter_map(|record| {
                let reason = self.settings.policy.evaluate(record, now)?;
                let prefix = AbandonmentPolicy::label_prefix(reason, labels);
                Some(ExpiredEventView {
                    event_id: record.event_id.clone(),
                    event_name: record.event_name.clone(),
                    paused_at: record.pause_time,
                    original_end_time: record.original_end_time,
                    time_since_original_end_minutes: fractional_minutes(
                        record.time_since_original_end(now),
                    ),
                    time_since_pause_hours: fractional_hours(record.time_since_pause(now)),
                    remaining_duration: record.remaining_duration,
                    reason,
                    will_be_labeled: LabelConfig::label(prefix, &record.event_name),
                })
            })
            .collect();
        expired.sort_by_key(|view| view.paused_at);
        expired
    }

    /// Snapshot of the registry, oldest pause first.
    pub async fn list_paused(&self) -> PausedEventsView {
        let registry = self.registry.lock().await;
        let last = registry.last_paused_id();

        let mut paused_events: Vec<PausedEventView> = registry
            .iter()
            .map(|record| PausedEventView {
                event_id: record.event_id.clone(),
                event_name: record.event_name.clone(),
                paused_at: record.pause_time,
                original_end_time: record.original_end_time,
                remaining_duration: record.remaining_duration,
                is_last_paused: last == Some(record.event_id.as_str()),
            })
            .collect();
        paused_events.sort_by_key(|view| view.paused_at);

        PausedEventsView { paused_events, last_paused_event_id: last.map(str::to_string) }
    }

    /// First timed, non-completed event whose interval contains `now`.
    async fn find_ongoing(&self, calendar_id: &str, now: DateTime<Utc>) -> Result<Event> {
        let query =
            EventQuery::starting_at(now.fixed_offset()).limit(self.settings.max_events_to_fetch);
        let events = self.gateway.list_events(calendar_id, query).await?;

        events
            .into_iter()
            .filter(|event| !event.all_day)
            .filter(|event| !event.has_prefix(&self.settings.labels.completed))
            .find(|event| event.is_ongoing_at(now))
            .ok_or(PauseCalError::NoOngoingEvent)
    }

    async fn sweep_locked(
        &self,
        registry: &mut PauseRegistry,
        calendar_id: &str,
        now: DateTime<Utc>,
    ) -> SweepReport {
        let abandoned: Vec<_> = registry
            .iter()
            .filter_map(|record| {
                self.settings.policy.evaluate(record, now).map(|reason| (record.clone(), reason))
            })
            .collect();

        let mut report = SweepReport::default();
        for (record, reason) in abandoned {
            match self.reschedule_one(calendar_id, &record, reason, now).await {
                Ok(rescheduled) => {
                    registry.remove(&record.event_id);
                    if self.settings.log_reschedules {
                        info!(
                            event_id = %record.event_id,
                            new_event_id = %rescheduled.new_event_id,
                            label = %rescheduled.label,
                            start = %rescheduled.start,
                            "abandoned pause rescheduled"
                        );
                    }
                    report.rescheduled.push(rescheduled);
                }
                Err(err) => {
                    warn!(
                        event_id = %record.event_id,
                        error = %err,
                        "failed to reschedule abandoned pause"
                    );
                    report.failed.push(SweepFailure {
                        event_id: record.event_id.clone(),
                        event_name: record.event_name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }

    async fn reschedule_one(
        &self,
        calendar_id: &str,
        record: &PauseRecord,
        reason: AbandonReason,
        now: DateTime<Utc>,
    ) -> Result<RescheduledEvent> {
        let local_now = record.local_now(now);
        let (start, end) =
            self.slots.find_slot(calendar_id, local_now, record.remaining_duration).await?;

        let prefix = AbandonmentPolicy::label_prefix(reason, &self.settings.labels);
        let label = LabelConfig::label(prefix, &record.event_name);
        let description = format!(
            "Auto-rescheduled after {:.1} hours pause. Original end time was {}",
            fractional_hours(record.time_since_pause(now)),
            record.original_end_time.format("%Y-%m-%d %H:%M")
        );

        let event = NewEvent::new(label.clone(), start, end)?.with_description(description);
        let created = self.gateway.insert_event(calendar_id, event).await?;

        Ok(RescheduledEvent {
            original_event_id: record.event_id.clone(),
            event_name: record.event_name.clone(),
            new_event_id: created.id,
            label,
            start,
            end,
        })
    }
}
