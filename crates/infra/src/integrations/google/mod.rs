//! Google Calendar integration

pub mod auth;
pub mod gateway;
mod types;

pub use auth::{
    AccessTokenProvider, ServiceAccountKey, ServiceAccountTokenProvider, StaticTokenProvider,
};
pub use gateway::GoogleCalendarGateway;
