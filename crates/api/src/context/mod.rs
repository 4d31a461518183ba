//! Application context - dependency injection container

use std::sync::Arc;

use pausecal_core::{
    CalendarEventsService, CalendarGateway, CalendarSession, Clock, EngineSettings,
    PauseResumeEngine, SlotFinder, SystemClock,
};
use pausecal_domain::{Config, Result};
use pausecal_infra::build_gateway;
use pausecal_infra::scheduling::{SweepJob, SweepScheduler};
use tracing::{info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub session: Arc<CalendarSession>,
    pub engine: Arc<PauseResumeEngine>,
    pub events: Arc<CalendarEventsService>,
}

impl AppContext {
    /// Wire the gateway named by `config` against the system clock.
    pub fn new(config: Config) -> Result<Self> {
        let gateway = build_gateway(&config.gateway)?;
        Ok(Self::with_parts(config, gateway, Arc::new(SystemClock)))
    }

    /// Wire the services around an explicit gateway and clock.
    pub fn with_parts(
        config: Config,
        gateway: Arc<dyn CalendarGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let session = Arc::new(CalendarSession::new(Arc::clone(&gateway)));
        let slots = SlotFinder::new(Arc::clone(&gateway), config.reschedule.look_ahead());
        let engine = Arc::new(PauseResumeEngine::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
            clock,
            slots,
            EngineSettings::from_config(&config),
        ));
        let events = Arc::new(CalendarEventsService::new(gateway, Arc::clone(&session)));

        Self { config, session, engine, events }
    }

    /// Configure the startup calendar, if one is set.
    ///
    /// Failure is logged and leaves the session unset.
    pub async fn configure_default_calendar(&self) {
        let Some(calendar_id) = self.config.gateway.default_calendar_id.as_deref() else {
            return;
        };

        match self.session.configure(calendar_id).await {
            Ok(metadata) => info!(
                calendar_id = %metadata.id,
                calendar_name = ?metadata.summary,
                "default calendar configured"
            ),
            Err(err) => warn!(calendar_id, error = %err, "default calendar not configured"),
        }
    }

    /// Start the periodic sweep when a cron expression is configured and
    /// auto-rescheduling is enabled.
    pub async fn start_sweep_scheduler(&self) -> Result<Option<SweepScheduler>> {
        let reschedule = &self.config.reschedule;
        let Some(cron) = reschedule.sweep_cron.clone().filter(|_| reschedule.enabled) else {
            info!("periodic sweep disabled");
            return Ok(None);
        };

        let job: Arc<dyn SweepJob> = Arc::clone(&self.engine) as Arc<dyn SweepJob>;
        let mut scheduler = SweepScheduler::new(cron, job).await?;
        scheduler.start().await?;
        Ok(Some(scheduler))
    }
}
