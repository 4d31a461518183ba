//! HTTP routes

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::commands;
use crate::context::AppContext;

/// Build the application router over a shared context.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(commands::root))
        .route("/configure-calendar", post(commands::configure_calendar))
        .route("/create-event", post(commands::create_event))
        .route("/events", get(commands::list_events))
        .route("/delete-event", delete(commands::delete_event))
        .route("/pause-event", post(commands::pause_event))
        .route("/resume-event", post(commands::resume_event))
        .route("/paused-events", get(commands::list_paused))
        .route("/check-expired-events", get(commands::check_expired_events))
        .route("/force-reschedule-expired", post(commands::force_reschedule_expired))
        .with_state(ctx)
}
