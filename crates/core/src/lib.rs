//! # PauseCal Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (calendar gateway, clock)
//! - The calendar session
//! - Slot search and the pause/resume engine
//! - Event administration
//!
//! ## Architecture Principles
//! - Only depends on `pausecal-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar_ports;
pub mod clock;
pub mod events;
pub mod pause;
pub mod scheduling;
pub mod session;

pub use calendar_ports::CalendarGateway;
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::CalendarEventsService;
pub use pause::{AbandonmentPolicy, EngineSettings, PauseRegistry, PauseResumeEngine};
pub use scheduling::{first_free_slot, SlotFinder};
pub use session::CalendarSession;
