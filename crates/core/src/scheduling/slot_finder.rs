//! Find the next conflict-free interval of a given length
//!
//! The search is a single greedy pass over the events in the look-ahead
//! window. Whatever the pass ends on is returned, so a window packed solid
//! yields a slot right after the last conflicting event rather than an error.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeDelta};
use pausecal_domain::{Event, EventQuery, Result};
use tracing::debug;

use crate::calendar_ports::CalendarGateway;

/// Slot search backed by the calendar gateway.
pub struct SlotFinder {
    gateway: Arc<dyn CalendarGateway>,
    look_ahead: TimeDelta,
}

impl SlotFinder {
    pub fn new(gateway: Arc<dyn CalendarGateway>, look_ahead: TimeDelta) -> Self {
        Self { gateway, look_ahead }
    }

    /// Next free `[start, start + duration)` at or after `desired_start`.
    ///
    /// Gateway failures propagate unchanged; nothing is retried here.
    pub async fn find_slot(
        &self,
        calendar_id: &str,
        desired_start: DateTime<FixedOffset>,
        duration: TimeDelta,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let query = EventQuery::between(desired_start, desired_start + self.look_ahead);
        let events = self.gateway.list_events(calendar_id, query).await?;

        let slot = first_free_slot(&events, desired_start, duration);
        debug!(
            calendar_id,
            desired = %desired_start,
            start = %slot.0,
            scanned = events.len(),
            "slot search finished"
        );
        Ok(slot)
    }
}

/// Greedy scan over `events` (ordered by start).
///
/// The returned start is never before `desired_start`, and the interval
/// overlaps none of the timed `events` as long as they are sorted. All-day
/// entries do not block anything.
#[must_use]
pub fn first_free_slot(
    events: &[Event],
    desired_start: DateTime<FixedOffset>,
    duration: TimeDelta,
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let mut cursor = desired_start;
    for event in events.iter().filter(|event| !event.all_day) {
        if cursor + duration <= event.start {
            break;
        }
        if event.end > cursor {
            cursor = event.end.with_timezone(desired_start.offset());
        }
    }
    (cursor, cursor + duration)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2025, 11, 13, hour, minute, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Event {
        Event::new(id, id, start, end).unwrap()
    }

    #[test]
    fn empty_calendar_keeps_desired_start() {
        let slot = first_free_slot(&[], at(9, 0), TimeDelta::minutes(20));
        assert_eq!(slot, (at(9, 0), at(9, 20)));
    }

    #[test]
    fn fits_in_gap_before_first_event() {
        let events = [event("a", at(10, 0), at(11, 0))];
        let slot = first_free_slot(&events, at(9, 0), TimeDelta::minutes(60));
        assert_eq!(slot, (at(9, 0), at(10, 0)));
    }

    #[test]
    fn skips_past_conflicts_into_first_gap() {
        let events = [
            event("a", at(9, 0), at(9, 30)),
            event("b", at(9, 30), at(10, 0)),
            event("c", at(11, 0), at(12, 0)),
        ];
        let slot = first_free_slot(&events, at(9, 10), TimeDelta::minutes(45));
        assert_eq!(slot, (at(10, 0), at(10, 45)));
    }

    #[test]
    fn too_small_gap_is_skipped() {
        let events = [event("a", at(9, 0), at(9, 30)), event("b", at(9, 45), at(10, 30))];
        let slot = first_free_slot(&events, at(9, 0), TimeDelta::minutes(30));
        assert_eq!(slot, (at(10, 30), at(11, 0)));
    }

    #[test]
    fn event_in_progress_at_desired_start_pushes_cursor() {
        let events = [event("a", at(8, 0), at(9, 20))];
        let slot = first_free_slot(&events, at(9, 0), TimeDelta::minutes(10));
        assert_eq!(slot, (at(9, 20), at(9, 30)));
    }

    #[test]
    fn nested_event_does_not_move_cursor_backwards() {
        let events = [event("a", at(9, 0), at(11, 0)), event("b", at(9, 30), at(10, 0))];
        let slot = first_free_slot(&events, at(9, 0), TimeDelta::minutes(15));
        assert_eq!(slot, (at(11, 0), at(11, 15)));
    }

    #[test]
    fn result_never_overlaps_and_never_precedes_desired_start() {
        let events: Vec<Event> = (0..8)
            .map(|i| {
                let start = at(9, 0) + TimeDelta::minutes(i * 25);
                event(&format!("e{i}"), start, start + TimeDelta::minutes(20))
            })
            .collect();

        for minutes in [1, 5, 10, 30] {
            let desired = at(9, 3);
            let (start, end) = first_free_slot(&events, desired, TimeDelta::minutes(minutes));
            assert!(start >= desired);
            assert!(events.iter().all(|e| !e.overlaps(start, end)), "overlap for {minutes}m");
        }
    }

    #[test]
    fn all_day_entries_do_not_block() {
        let mut holiday = event("holiday", at(0, 0), at(0, 0) + TimeDelta::days(1));
        holiday.all_day = true;
        let events = [holiday, event("a", at(9, 0), at(9, 30))];

        let slot = first_free_slot(&events, at(9, 10), TimeDelta::minutes(15));
        assert_eq!(slot, (at(9, 30), at(9, 45)));
    }

    #[test]
    fn keeps_desired_offset_when_events_use_another() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let desired = ist.with_ymd_and_hms(2025, 11, 13, 14, 30, 0).unwrap();
        // 09:00-09:30 UTC == 14:30-15:00 IST
        let events = [event("a", at(9, 0), at(9, 30))];

        let (start, _) = first_free_slot(&events, desired, TimeDelta::minutes(10));
        assert_eq!(start.offset(), &ist);
        assert_eq!(start, at(9, 30));
    }
}
