//! Cron-driven background work
//!
//! The only scheduled task is the abandonment sweep. Lifecycle is explicit
//! (start/stop), spawned tasks are joined and every async step is wrapped in
//! a timeout.

pub mod error;
pub mod sweep_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use sweep_scheduler::{SweepJob, SweepScheduler, SweepSchedulerConfig};
