//! # PauseCal API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - Route handlers (HTTP → services)
//! - Application context (dependency injection)
//! - Error → HTTP response mapping
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod error;
pub mod router;
pub mod utils;

pub use context::AppContext;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
