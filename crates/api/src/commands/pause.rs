//! Pause, resume and abandonment routes

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use pausecal_domain::{
    ExpiredEventView, PauseOutcome, PausedEventsView, RescheduledEvent, ResumeOutcome,
    SweepFailure,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::execute_command;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiredEventsResponse {
    pub expired_events: Vec<ExpiredEventView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceRescheduleResponse {
    pub message: String,
    pub rescheduled: Vec<RescheduledEvent>,
    pub failed: Vec<SweepFailure>,
}

/// `POST /pause-event`
pub async fn pause_event(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<PauseOutcome>> {
    execute_command("pause::pause_event", || ctx.engine.pause()).await.map(Json)
}

/// `POST /resume-event`
pub async fn resume_event(State(ctx): State<Arc<AppContext>>) -> ApiResult<Json<ResumeOutcome>> {
    execute_command("pause::resume_event", || ctx.engine.resume()).await.map(Json)
}

/// `GET /paused-events`
pub async fn list_paused(State(ctx): State<Arc<AppContext>>) -> Json<PausedEventsView> {
    Json(ctx.engine.list_paused().await)
}

/// `GET /check-expired-events`
pub async fn check_expired_events(
    State(ctx): State<Arc<AppContext>>,
) -> Json<ExpiredEventsResponse> {
    Json(ExpiredEventsResponse { expired_events: ctx.engine.expired_events().await })
}

/// `POST /force-reschedule-expired`
///
/// Entries that could not be rescheduled are listed in `failed` and stay
/// paused; the response is still a success.
pub async fn force_reschedule_expired(
    State(ctx): State<Arc<AppContext>>,
) -> ApiResult<Json<ForceRescheduleResponse>> {
    let report =
        execute_command("pause::force_reschedule_expired", || ctx.engine.force_reschedule())
            .await?;

    let mut message = format!("Rescheduled {} expired event(s)", report.rescheduled.len());
    if let Some(partial) = report.partial_failure() {
        warn!(error = %partial, "forced sweep left entries paused");
        message.push_str(&format!("; {} failed and remain paused", report.failed.len()));
    }

    Ok(Json(ForceRescheduleResponse {
        message,
        rescheduled: report.rescheduled,
        failed: report.failed,
    }))
}
