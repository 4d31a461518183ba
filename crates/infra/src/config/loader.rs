//! Configuration loader
//!
//! Builds the application configuration in layers.
//!
//! ## Loading Strategy
//! 1. Load `.env` from the working directory, if present
//! 2. Start from the built-in defaults
//! 3. Overlay a config file (`PAUSECAL_CONFIG`, or the first probed path)
//! 4. Overlay individual environment variables
//! 5. Validate the result
//!
//! ## Environment Variables
//! - `DEFAULT_HOST`, `DEFAULT_PORT`, `DEFAULT_TIMEZONE`: HTTP server settings
//! - `CALENDAR_PROVIDER`: `google` or `memory`
//! - `CALENDAR_API_BASE`: Calendar REST API base URL
//! - `SERVICE_ACCOUNT_FILE`: Google service account key file
//! - `SCOPES`: OAuth scopes, comma or space separated
//! - `GOOGLE_CALENDAR_ACCESS_TOKEN`: Pre-issued bearer token
//! - `GATEWAY_TIMEOUT_SECS`: Per-request timeout for calendar calls
//! - `MAX_EVENTS_TO_FETCH`: Events inspected when looking for the ongoing one
//! - `DEFAULT_CALENDAR_ID`: Calendar configured at startup
//! - `AUTO_RESCHEDULE_AFTER_ORIGINAL_END_MINUTES`: Grace after the original end
//! - `AUTO_RESCHEDULE_AFTER_PAUSE_HOURS`: Maximum pause age
//! - `AUTO_RESCHEDULE_SEARCH_DAYS`: Slot search window
//! - `ENABLE_AUTO_RESCHEDULE`, `LOG_AUTO_RESCHEDULE`: Sweep flags (true/false)
//! - `SWEEP_CRON`: Cron expression for the periodic sweep
//! - `COMPLETED_EVENT_PREFIX`, `MISSED_EVENT_PREFIX`, `RESCHEDULED_EVENT_PREFIX`
//!
//! ## File Locations
//! Without `PAUSECAL_CONFIG`, the loader probes (in order) `pausecal.toml`,
//! `pausecal.json`, `config.toml` and `config.json` in the working directory,
//! its parent, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pausecal_domain::{Config, GatewayProvider, PauseCalError, Result};

const CONFIG_PATH_VAR: &str = "PAUSECAL_CONFIG";
const CONFIG_FILE_NAMES: [&str; 4] =
    ["pausecal.toml", "pausecal.json", "config.toml", "config.json"];

/// Load configuration from `.env`, an optional file and the environment.
///
/// # Errors
/// Returns `PauseCalError::Config` if:
/// - `PAUSECAL_CONFIG` names a file that does not exist
/// - The file format is invalid
/// - An environment variable has an invalid value
/// - The merged configuration fails validation
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let mut config = match std::env::var(CONFIG_PATH_VAR).ok().filter(|p| !p.trim().is_empty()) {
        Some(path) => load_from_file(Some(PathBuf::from(path)))?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    tracing::info!(
        provider = ?config.gateway.provider,
        port = config.server.port,
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML (detected by file extension). Missing sections keep their defaults.
///
/// # Errors
/// Returns `PauseCalError::Config` if the file is missing, unreadable or
/// malformed, or if no file is found when probing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PauseCalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PauseCalError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PauseCalError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Overlay environment variables onto `config`.
///
/// Unset or empty variables leave the current value alone.
///
/// # Errors
/// Returns `PauseCalError::Config` for values that fail to parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let server = &mut config.server;
    if let Some(host) = env_string("DEFAULT_HOST") {
        server.host = host;
    }
    if let Some(port) = env_parse("DEFAULT_PORT")? {
        server.port = port;
    }
    if let Some(zone) = env_string("DEFAULT_TIMEZONE") {
        server.default_timezone = zone;
    }

    let gateway = &mut config.gateway;
    if let Some(provider) = env_parse::<GatewayProvider>("CALENDAR_PROVIDER")? {
        gateway.provider = provider;
    }
    if let Some(base) = env_string("CALENDAR_API_BASE") {
        gateway.api_base = base;
    }
    if let Some(file) = env_string("SERVICE_ACCOUNT_FILE") {
        gateway.service_account_file = Some(file);
    }
    if let Some(scopes) = env_string("SCOPES") {
        gateway.scopes = split_list(&scopes);
    }
    if let Some(token) = env_string("GOOGLE_CALENDAR_ACCESS_TOKEN") {
        gateway.access_token = Some(token);
    }
    if let Some(timeout) = env_parse("GATEWAY_TIMEOUT_SECS")? {
        gateway.timeout_secs = timeout;
    }
    if let Some(max) = env_parse("MAX_EVENTS_TO_FETCH")? {
        gateway.max_events_to_fetch = max;
    }
    if let Some(calendar) = env_string("DEFAULT_CALENDAR_ID") {
        gateway.default_calendar_id = Some(calendar);
    }

    let reschedule = &mut config.reschedule;
    if let Some(minutes) = env_parse("AUTO_RESCHEDULE_AFTER_ORIGINAL_END_MINUTES")? {
        reschedule.original_end_grace_minutes = minutes;
    }
    if let Some(hours) = env_parse("AUTO_RESCHEDULE_AFTER_PAUSE_HOURS")? {
        reschedule.max_pause_age_hours = hours;
    }
    if let Some(days) = env_parse("AUTO_RESCHEDULE_SEARCH_DAYS")? {
        reschedule.search_days = days;
    }
    reschedule.enabled = env_bool("ENABLE_AUTO_RESCHEDULE", reschedule.enabled);
    reschedule.log_reschedules = env_bool("LOG_AUTO_RESCHEDULE", reschedule.log_reschedules);
    if let Some(cron) = env_string("SWEEP_CRON") {
        reschedule.sweep_cron = Some(cron);
    }

    let labels = &mut config.labels;
    if let Some(prefix) = env_string("COMPLETED_EVENT_PREFIX") {
        labels.completed = prefix;
    }
    if let Some(prefix) = env_string("MISSED_EVENT_PREFIX") {
        labels.missed = prefix;
    }
    if let Some(prefix) = env_string("RESCHEDULED_EVENT_PREFIX") {
        labels.rescheduled = prefix;
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `PauseCalError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PauseCalError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PauseCalError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PauseCalError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Non-empty value of an environment variable.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `PauseCalError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| PauseCalError::Config(format!("Invalid value for {key} ({raw}): {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
