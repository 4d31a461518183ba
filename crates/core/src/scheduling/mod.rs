//! Free-slot search over the calendar

pub mod slot_finder;

pub use slot_finder::{first_free_slot, SlotFinder};
