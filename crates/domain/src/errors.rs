//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PauseCal
///
/// Every variant renders a message that is safe to show to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PauseCalError {
    /// No calendar has been configured for this process yet.
    #[error("Calendar not configured. Please call /configure-calendar first.")]
    NotConfigured,

    /// Nothing on the calendar is running right now.
    #[error("No ongoing event found at this time")]
    NoOngoingEvent,

    /// There is no paused event to resume.
    #[error("No paused event found to resume")]
    NoPausedEvent,

    /// The remote calendar store failed or rejected a request.
    #[error("Calendar gateway error: {0}")]
    Gateway(String),

    /// A sweep processed some entries but could not reschedule others.
    #[error("Partial failure: {0}")]
    PartialFailure(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PauseCalError {
    /// Whether the error is an expected business outcome rather than a fault.
    ///
    /// Precondition and empty-result errors fall in this bucket; callers log
    /// them at a lower level and never retry them.
    #[must_use]
    pub const fn is_business_outcome(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::NoOngoingEvent | Self::NoPausedEvent)
    }
}

/// Result type alias for PauseCal operations
pub type Result<T> = std::result::Result<T, PauseCalError>;
