//! Pause/resume state machine
//!
//! A running event has no state here; it lives in the calendar. Pausing
//! records what is still owed in the [`PauseRegistry`]; resuming or the
//! abandonment sweep turns that record back into a calendar event.

pub mod engine;
pub mod policy;
pub mod registry;

pub use engine::{EngineSettings, PauseResumeEngine};
pub use policy::AbandonmentPolicy;
pub use registry::PauseRegistry;
