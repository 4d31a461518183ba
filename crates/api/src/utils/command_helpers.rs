//! Command execution helpers
//!
//! Every route handler goes through [`execute_command`] so timing and
//! outcome logging stay uniform.

use std::future::Future;
use std::time::Instant;

use pausecal_domain::Result as DomainResult;
use tracing::debug;

use crate::error::ApiResult;
use crate::utils::logging::{error_label, log_command_execution};

/// Run a command, logging its duration and outcome.
///
/// Expected business outcomes (no calendar, nothing to pause or resume) are
/// still logged as failures but only surface at debug level here.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn pause_event(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<PauseOutcome>> {
///     execute_command("pause::pause_event", || async { ctx.engine.pause().await })
///         .await
///         .map(Json)
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;
    let elapsed = start.elapsed();

    match &result {
        Ok(_) => log_command_execution(command_name, elapsed, None),
        Err(err) => {
            if err.is_business_outcome() {
                debug!(command = command_name, error = %err, "command precondition not met");
            }
            log_command_execution(command_name, elapsed, Some(error_label(err)));
        }
    }

    result.map_err(Into::into)
}
