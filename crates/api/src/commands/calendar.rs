//! Calendar selection and service root

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::execute_command;

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureCalendarRequest {
    /// Calendar identifier; for personal calendars this is the account email.
    pub gmail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureCalendarResponse {
    pub message: String,
    pub calendar_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub configured_calendar: Option<String>,
}

/// `POST /configure-calendar`
pub async fn configure_calendar(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<ConfigureCalendarRequest>,
) -> ApiResult<Json<ConfigureCalendarResponse>> {
    let metadata = execute_command("calendar::configure_calendar", || async {
        ctx.session.configure(&request.gmail).await
    })
    .await?;

    Ok(Json(ConfigureCalendarResponse {
        message: format!("Calendar configured successfully for {}", metadata.id),
        calendar_name: metadata.summary,
    }))
}

/// `GET /`
pub async fn root(State(ctx): State<Arc<AppContext>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "PauseCal calendar server".to_string(),
        configured_calendar: ctx.session.peek(),
    })
}
