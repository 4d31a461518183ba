//! Logging and command helpers shared by the route handlers

pub mod command_helpers;
pub mod logging;

pub use command_helpers::execute_command;
pub use logging::{error_label, init_tracing, log_command_execution};
