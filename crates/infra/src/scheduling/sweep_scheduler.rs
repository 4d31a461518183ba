//! Periodic abandonment sweep.
//!
//! Runs a [`SweepJob`] on a cron schedule. Join handles are tracked,
//! cancellation is explicit and every lifecycle step runs under a timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pausecal_core::PauseResumeEngine;
//! use pausecal_infra::scheduling::{SchedulerResult, SweepScheduler};
//!
//! # async fn example(engine: Arc<PauseResumeEngine>) -> SchedulerResult<()> {
//! let mut scheduler = SweepScheduler::new("0 */5 * * * *".into(), engine).await?;
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pausecal_core::PauseResumeEngine;
use pausecal_domain::{Result, SweepReport};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Work performed on every tick.
#[async_trait]
pub trait SweepJob: Send + Sync {
    /// Run one sweep.
    async fn run(&self) -> Result<SweepReport>;
}

#[async_trait]
impl SweepJob for PauseResumeEngine {
    async fn run(&self) -> Result<SweepReport> {
        self.auto_reschedule_abandoned_events().await
    }
}

/// Configuration for the sweep scheduler.
#[derive(Debug, Clone)]
pub struct SweepSchedulerConfig {
    /// Cron expression (with seconds field) describing the schedule.
    pub cron_expression: String,
    /// How long a tick waits on its sweep before logging and moving on. The
    /// sweep itself is never cancelled.
    pub job_timeout: Duration,
    pub start_timeout: Duration,
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for SweepSchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 */5 * * * *".into(), // every 5 minutes
            job_timeout: Duration::from_secs(120),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

/// Sweep scheduler with explicit lifecycle management.
pub struct SweepScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    config: SweepSchedulerConfig,
    job_id: Uuid,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    job: Arc<dyn SweepJob>,
}

impl SweepScheduler {
    /// Create a scheduler with default timeouts.
    pub async fn new(cron_expression: String, job: Arc<dyn SweepJob>) -> SchedulerResult<Self> {
        let config = SweepSchedulerConfig { cron_expression, ..Default::default() };
        Self::with_config(config, job).await
    }

    /// Create a scheduler with a custom configuration.
    ///
    /// Fails with [`SchedulerError::JobRegistrationFailed`] when the cron
    /// expression does not parse.
    pub async fn with_config(
        config: SweepSchedulerConfig,
        job: Arc<dyn SweepJob>,
    ) -> SchedulerResult<Self> {
        let raw_scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;

        let mut scheduler = Self {
            scheduler: Arc::new(RwLock::new(raw_scheduler)),
            config,
            job_id: Uuid::nil(),
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            job,
        };

        scheduler.job_id = scheduler.register_sweep_job().await?;
        Ok(scheduler)
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler = self.scheduler.clone();
        let start_timeout = self.config.start_timeout;
        tokio::time::timeout(start_timeout, async move {
            let guard = scheduler.write().await;
            guard.start().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { duration: start_timeout })?
        .map_err(|source| SchedulerError::StartFailed { source })?;

        let cancel = self.cancellation.clone();
        self.monitor_handle = Some(tokio::spawn(Self::monitor_task(cancel)));
        info!(cron = %self.config.cron_expression, "Sweep scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let scheduler = self.scheduler.clone();
        let stop_timeout = self.config.stop_timeout;
        tokio::time::timeout(stop_timeout, async move {
            let mut guard = scheduler.write().await;
            guard.shutdown().await
        })
        .await
        .map_err(|_| SchedulerError::Timeout { duration: stop_timeout })?
        .map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { duration: join_timeout })??;
        }

        info!("Sweep scheduler stopped");
        Ok(())
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn register_sweep_job(&self) -> SchedulerResult<Uuid> {
        let job = self.job.clone();
        let job_timeout = self.config.job_timeout;

        let job_definition =
            Job::new_async(self.config.cron_expression.as_str(), move |_id, _lock| {
                let job = job.clone();

                Box::pin(async move {
                    let started = Instant::now();
                    // The sweep runs on its own task so a timeout never drops it
                    // between a calendar insert and the registry update.
                    let mut sweep = tokio::spawn(async move { job.run().await });
                    match tokio::time::timeout(job_timeout, &mut sweep).await {
                        Ok(Ok(Ok(report))) if report.is_empty() => {
                            debug!("Sweep found nothing to reschedule");
                        }
                        Ok(Ok(Ok(report))) => {
                            info!(
                                rescheduled = report.rescheduled.len(),
                                failed = report.failed.len(),
                                elapsed_ms = started.elapsed().as_millis(),
                                "Sweep finished"
                            );
                            if let Some(partial) = report.partial_failure() {
                                warn!(error = %partial, "Sweep left entries paused");
                            }
                        }
                        Ok(Ok(Err(err))) => {
                            error!(error = %err, "Sweep failed");
                        }
                        Ok(Err(join_err)) => {
                            error!(error = %join_err, "Sweep task aborted");
                        }
                        Err(_) => {
                            warn!(
                                timeout_secs = job_timeout.as_secs(),
                                "Sweep still running after timeout; left to finish"
                            );
                        }
                    }
                })
            })
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        let scheduler = self.scheduler.write().await;
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, %job_id, "Registered sweep job");
        Ok(job_id)
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Sweep scheduler monitor cancelled");
    }
}

impl Drop for SweepScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("SweepScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
