//! Process-wide calendar selection
//!
//! Holds the single calendar every other operation works against. The cell
//! starts empty; callers treat that as a precondition failure.

use std::sync::Arc;

use parking_lot::RwLock;
use pausecal_domain::{CalendarMetadata, PauseCalError, Result};
use tracing::{info, warn};

use crate::calendar_ports::CalendarGateway;

pub struct CalendarSession {
    gateway: Arc<dyn CalendarGateway>,
    calendar_id: RwLock<Option<String>>,
}

impl CalendarSession {
    pub fn new(gateway: Arc<dyn CalendarGateway>) -> Self {
        Self { gateway, calendar_id: RwLock::new(None) }
    }

    /// Verify `calendar_id` is reachable, then make it the current calendar.
    ///
    /// The previous selection is kept when validation fails.
    pub async fn configure(&self, calendar_id: &str) -> Result<CalendarMetadata> {
        let calendar_id = calendar_id.trim();
        if calendar_id.is_empty() {
            return Err(PauseCalError::InvalidInput("calendar id must not be empty".into()));
        }

        let metadata = self.gateway.get_calendar(calendar_id).await.map_err(|err| {
            warn!(calendar_id, error = %err, "calendar validation failed");
            PauseCalError::BadRequest(format!("Failed to access calendar {calendar_id}: {err}"))
        })?;

        *self.calendar_id.write() = Some(calendar_id.to_string());
        info!(calendar_id, name = ?metadata.summary, "calendar configured");
        Ok(metadata)
    }

    /// The configured calendar id.
    pub fn current(&self) -> Result<String> {
        self.calendar_id.read().clone().ok_or(PauseCalError::NotConfigured)
    }

    /// The configured calendar id, if any, without treating absence as an error.
    pub fn peek(&self) -> Option<String> {
        self.calendar_id.read().clone()
    }
}
