//! Configuration structures
//!
//! Every section has serde defaults so a partial file (or none at all) still
//! yields a usable configuration. Loading lives in `pausecal-infra`.

use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTO_RESCHEDULE_AFTER_ORIGINAL_END_MINUTES, AUTO_RESCHEDULE_AFTER_PAUSE_HOURS,
    AUTO_RESCHEDULE_SEARCH_DAYS, COMPLETED_EVENT_PREFIX, DEFAULT_GATEWAY_TIMEOUT_SECS,
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SERVICE_ACCOUNT_FILE, DEFAULT_TIMEZONE,
    GOOGLE_CALENDAR_API_BASE, GOOGLE_CALENDAR_SCOPE, MAX_EVENTS_TO_FETCH, MISSED_EVENT_PREFIX,
    RESCHEDULED_EVENT_PREFIX,
};
use crate::errors::{PauseCalError, Result};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub reschedule: RescheduleConfig,
    pub labels: LabelConfig,
}

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.reschedule.original_end_grace_minutes <= 0 {
            return Err(PauseCalError::Config(
                "original end grace must be a positive number of minutes".into(),
            ));
        }
        if self.reschedule.max_pause_age_hours <= 0 {
            return Err(PauseCalError::Config(
                "maximum pause age must be a positive number of hours".into(),
            ));
        }
        if self.reschedule.search_days <= 0 {
            return Err(PauseCalError::Config(
                "slot search window must be a positive number of days".into(),
            ));
        }
        if self.gateway.max_events_to_fetch == 0 {
            return Err(PauseCalError::Config("max events to fetch must be positive".into()));
        }
        if self.gateway.timeout_secs == 0 {
            return Err(PauseCalError::Config("gateway timeout must be positive".into()));
        }
        self.labels.validate()
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Zone used for create-event requests that name none.
    pub default_timezone: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Which calendar store backs the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayProvider {
    #[default]
    Google,
    /// Process-local store, for local runs and tests.
    Memory,
}

impl FromStr for GatewayProvider {
    type Err = PauseCalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "memory" => Ok(Self::Memory),
            other => Err(PauseCalError::Config(format!("unknown calendar provider: {other}"))),
        }
    }
}

/// Calendar gateway settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub provider: GatewayProvider,
    pub api_base: String,
    pub service_account_file: Option<String>,
    pub scopes: Vec<String>,
    /// Pre-issued bearer token; takes precedence over the service account.
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    /// Upper bound on events fetched while looking for the ongoing one.
    pub max_events_to_fetch: u32,
    /// Calendar configured at startup, if any.
    pub default_calendar_id: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: GatewayProvider::Google,
            api_base: GOOGLE_CALENDAR_API_BASE.to_string(),
            service_account_file: Some(DEFAULT_SERVICE_ACCOUNT_FILE.to_string()),
            scopes: vec![GOOGLE_CALENDAR_SCOPE.to_string()],
            access_token: None,
            timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
            max_events_to_fetch: MAX_EVENTS_TO_FETCH,
            default_calendar_id: None,
        }
    }
}

/// Abandonment and slot search settings
///
/// The sweep and the expired-events preview both read these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RescheduleConfig {
    pub original_end_grace_minutes: i64,
    pub max_pause_age_hours: i64,
    pub search_days: i64,
    /// Run the sweep before each pause and on the periodic schedule.
    pub enabled: bool,
    pub log_reschedules: bool,
    /// Cron expression for the periodic sweep; `None` disables it.
    pub sweep_cron: Option<String>,
}

impl Default for RescheduleConfig {
    fn default() -> Self {
        Self {
            original_end_grace_minutes: AUTO_RESCHEDULE_AFTER_ORIGINAL_END_MINUTES,
            max_pause_age_hours: AUTO_RESCHEDULE_AFTER_PAUSE_HOURS,
            search_days: AUTO_RESCHEDULE_SEARCH_DAYS,
            enabled: true,
            log_reschedules: true,
            sweep_cron: None,
        }
    }
}

impl RescheduleConfig {
    #[must_use]
    pub fn original_end_grace(&self) -> TimeDelta {
        TimeDelta::minutes(self.original_end_grace_minutes)
    }

    #[must_use]
    pub fn max_pause_age(&self) -> TimeDelta {
        TimeDelta::hours(self.max_pause_age_hours)
    }

    #[must_use]
    pub fn look_ahead(&self) -> TimeDelta {
        TimeDelta::days(self.search_days)
    }
}

/// Summary prefixes for generated events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub completed: String,
    pub missed: String,
    pub rescheduled: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            completed: COMPLETED_EVENT_PREFIX.to_string(),
            missed: MISSED_EVENT_PREFIX.to_string(),
            rescheduled: RESCHEDULED_EVENT_PREFIX.to_string(),
        }
    }
}

impl LabelConfig {
    /// `"{prefix} {name}"`
    #[must_use]
    pub fn label(prefix: &str, name: &str) -> String {
        format!("{prefix} {name}")
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in
            [("completed", &self.completed), ("missed", &self.missed), ("rescheduled", &self.rescheduled)]
        {
            if value.trim().is_empty() {
                return Err(PauseCalError::Config(format!("{name} label prefix must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = Config::default();
        assert_eq!(config.reschedule.original_end_grace(), TimeDelta::minutes(30));
        assert_eq!(config.reschedule.max_pause_age(), TimeDelta::hours(2));
        assert_eq!(config.reschedule.look_ahead(), TimeDelta::days(7));
        assert_eq!(config.labels.completed, "[COMPLETED]");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config: Config = parse_json(r#"{"reschedule": {"original_end_grace_minutes": 10}}"#);
        assert_eq!(config.reschedule.original_end_grace_minutes, 10);
        assert_eq!(config.reschedule.max_pause_age_hours, 2);
        assert_eq!(config.gateway.max_events_to_fetch, 10);
    }

    #[test]
    fn validate_rejects_empty_prefix() {
        let mut config = Config::default();
        config.labels.missed = "  ".into();
        assert!(matches!(config.validate(), Err(PauseCalError::Config(_))));
    }

    #[test]
    fn validate_rejects_non_positive_thresholds() {
        let mut config = Config::default();
        config.reschedule.max_pause_age_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("MEMORY".parse::<GatewayProvider>().unwrap(), GatewayProvider::Memory);
        assert!("outlook".parse::<GatewayProvider>().is_err());
    }

    fn parse_json(raw: &str) -> Config {
        serde_json::from_str(raw).unwrap()
    }
}
