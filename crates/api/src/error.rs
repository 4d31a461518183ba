//! Domain errors rendered as HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pausecal_domain::PauseCalError;
use serde_json::json;

/// Wrapper that turns a [`PauseCalError`] into `{"detail": ...}` with the
/// matching status code.
#[derive(Debug)]
pub struct ApiError(pub PauseCalError);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match &self.0 {
            PauseCalError::NotConfigured
            | PauseCalError::BadRequest(_)
            | PauseCalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PauseCalError::NoOngoingEvent
            | PauseCalError::NoPausedEvent
            | PauseCalError::NotFound(_) => StatusCode::NOT_FOUND,
            PauseCalError::Gateway(_) | PauseCalError::Auth(_) => StatusCode::BAD_GATEWAY,
            PauseCalError::PartialFailure(_) => StatusCode::OK,
            PauseCalError::Config(_) | PauseCalError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<PauseCalError> for ApiError {
    fn from(err: PauseCalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
