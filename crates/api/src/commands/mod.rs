//! Route handlers
//!
//! One module per resource. Handlers stay thin: decode the request, call the
//! service through [`execute_command`](crate::utils::execute_command), shape
//! the response.

pub mod calendar;
pub mod events;
pub mod pause;

pub use calendar::{configure_calendar, root};
pub use events::{create_event, delete_event, list_events};
pub use pause::{
    check_expired_events, force_reschedule_expired, list_paused, pause_event, resume_event,
};
