//! Domain types and models

pub mod event;
pub mod pause;

pub use event::{CalendarMetadata, Event, EventQuery, EventStatus, NewEvent};
pub use pause::{
    AbandonReason, ExpiredEventView, PauseOutcome, PauseRecord, PausedEventView,
    PausedEventsView, RescheduledEvent, ResumeOutcome, SweepFailure, SweepReport,
};
