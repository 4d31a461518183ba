//! Calendar store adapters
//!
//! [`build_gateway`] picks the adapter named by the configuration.

pub mod google;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use pausecal_core::CalendarGateway;
use pausecal_domain::{GatewayConfig, GatewayProvider, PauseCalError, Result};
use tracing::info;

pub use google::{
    GoogleCalendarGateway, ServiceAccountKey, ServiceAccountTokenProvider, StaticTokenProvider,
};
pub use memory::InMemoryCalendarGateway;

use self::google::auth::TOKEN_EXCHANGE_TIMEOUT;
use self::google::AccessTokenProvider;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("pausecal/", env!("CARGO_PKG_VERSION"));

/// Build the calendar gateway described by `config`.
///
/// A static access token wins over the service account file.
pub fn build_gateway(config: &GatewayConfig) -> Result<Arc<dyn CalendarGateway>> {
    match config.provider {
        GatewayProvider::Memory => {
            info!("using in-memory calendar store");
            Ok(Arc::new(InMemoryCalendarGateway::new()))
        }
        GatewayProvider::Google => {
            let http = HttpClient::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(USER_AGENT)
                .build()?;
            let tokens = token_provider(config)?;
            info!(api_base = %config.api_base, "using Google Calendar store");
            Ok(Arc::new(GoogleCalendarGateway::new(http, &config.api_base, tokens)?))
        }
    }
}

fn token_provider(config: &GatewayConfig) -> Result<Arc<dyn AccessTokenProvider>> {
    if let Some(token) = config.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
        return Ok(Arc::new(StaticTokenProvider::new(token)));
    }

    let path = config.service_account_file.as_deref().ok_or_else(|| {
        PauseCalError::Config(
            "Google provider needs SERVICE_ACCOUNT_FILE or GOOGLE_CALENDAR_ACCESS_TOKEN".into(),
        )
    })?;
    let key = ServiceAccountKey::from_file(path)?;
    let http =
        HttpClient::builder().timeout(TOKEN_EXCHANGE_TIMEOUT).user_agent(USER_AGENT).build()?;
    Ok(Arc::new(ServiceAccountTokenProvider::new(key, &config.scopes, http)?))
}
