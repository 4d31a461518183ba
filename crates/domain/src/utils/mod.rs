//! Pure helpers shared across layers

pub mod duration;
pub mod timezone;

pub use duration::{format_hms, parse_hms};
pub use timezone::{parse_datetime, parse_utc_offset, ZoneSpec};
