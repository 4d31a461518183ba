//! # PauseCal Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading (`.env`, TOML/JSON file, environment)
//! - HTTP client with timeouts and retries
//! - Calendar gateways (Google Calendar REST, in-memory)
//! - The cron-driven abandonment sweep
//!
//! ## Architecture
//! - Implements traits defined in `pausecal-core`
//! - Contains all "impure" code (network, filesystem, timers)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;

pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::build_gateway;
