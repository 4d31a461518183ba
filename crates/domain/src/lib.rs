//! # PauseCal Domain
//!
//! Business domain types and models for PauseCal.
//!
//! This crate contains:
//! - Calendar event and pause bookkeeping types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Duration and time zone helpers
//!
//! ## Architecture
//! - No dependencies on other PauseCal crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
