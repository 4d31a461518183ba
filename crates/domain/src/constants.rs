//! Application constants
//!
//! Centralized location for the defaults every configuration layer falls
//! back to.

// Server defaults
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

// Calendar gateway defaults
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const GOOGLE_CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
pub const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service_account.json";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 30;
pub const MAX_EVENTS_TO_FETCH: u32 = 10;

// Abandonment thresholds
pub const AUTO_RESCHEDULE_AFTER_ORIGINAL_END_MINUTES: i64 = 30;
pub const AUTO_RESCHEDULE_AFTER_PAUSE_HOURS: i64 = 2;
pub const AUTO_RESCHEDULE_SEARCH_DAYS: i64 = 7;

// Event labels
pub const COMPLETED_EVENT_PREFIX: &str = "[COMPLETED]";
pub const MISSED_EVENT_PREFIX: &str = "[MISSED]";
pub const RESCHEDULED_EVENT_PREFIX: &str = "[RESCHEDULED]";
