//! Access tokens for the Google Calendar API
//!
//! Two sources are supported: a pre-issued bearer token, or a service account
//! key exchanged for short-lived tokens through the OAuth JWT-bearer grant.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use pausecal_domain::{PauseCalError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::conversions::status_error;
use crate::errors::InfraError;
use crate::http::HttpClient;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before the provider says they expire.
const REFRESH_MARGIN_SECS: i64 = 60;
/// Timeout for token exchanges, independent of the gateway timeout.
pub const TOKEN_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token, refreshing it if needed.
    async fn access_token(&self) -> Result<String>;
}

/// A fixed bearer token, e.g. from `GOOGLE_CALENDAR_ACCESS_TOKEN`.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// The fields of a Google service account key file that matter here.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| {
            PauseCalError::Config(format!(
                "cannot read service account file {}: {err}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|err| PauseCalError::from(InfraError::from(err)))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Service account token source with an in-process cache.
pub struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    http: HttpClient,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key: ServiceAccountKey, scopes: &[String], http: HttpClient) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|err| PauseCalError::from(InfraError::from(err)))?;
        Ok(Self { key, encoding_key, scope: scopes.join(" "), http, cached: Mutex::new(None) })
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key.private_key_id);

        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        encode(&header, &claims, &self.encoding_key)
            .map_err(|err| PauseCalError::from(InfraError::from(err)))
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken> {
        let assertion = self.sign_assertion(now)?;
        let request = self
            .http
            .request(reqwest::Method::POST, &self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())]);

        let response = self.http.send(request).await.map_err(as_auth_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(as_auth_error(status_error(status, Some(body.trim()))));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| PauseCalError::Auth(format!("invalid token response: {err}")))?;
        debug!(expires_in = token.expires_in, "service account token issued");

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + TimeDelta::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.token.clone());
        }

        let fresh = self.exchange(now).await?;
        info!(client_email = %self.key.client_email, "obtained calendar access token");
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}

fn as_auth_error(err: PauseCalError) -> PauseCalError {
    match err {
        PauseCalError::Auth(_) => err,
        other => PauseCalError::Auth(format!("token exchange failed: {other}")),
    }
}
