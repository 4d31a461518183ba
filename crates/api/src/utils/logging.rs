use std::time::Duration;

use pausecal_domain::PauseCalError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,pausecal=debug";
const JSON_LOGS_VAR: &str = "PAUSECAL_LOG_JSON";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter; `PAUSECAL_LOG_JSON=1` switches to
/// JSON lines. Calling this twice is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(JSON_LOGS_VAR)
        .is_ok_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };
    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"pause::pause_event"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Failure label, `None` on success.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&'static str>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert a `PauseCalError` into a stable label suitable for logging.
#[inline]
#[must_use]
pub const fn error_label(error: &PauseCalError) -> &'static str {
    match error {
        PauseCalError::NotConfigured => "not_configured",
        PauseCalError::NoOngoingEvent => "no_ongoing_event",
        PauseCalError::NoPausedEvent => "no_paused_event",
        PauseCalError::Gateway(_) => "gateway",
        PauseCalError::PartialFailure(_) => "partial_failure",
        PauseCalError::BadRequest(_) => "bad_request",
        PauseCalError::Config(_) => "config",
        PauseCalError::Auth(_) => "auth",
        PauseCalError::NotFound(_) => "not_found",
        PauseCalError::InvalidInput(_) => "invalid_input",
        PauseCalError::Internal(_) => "internal",
    }
}
