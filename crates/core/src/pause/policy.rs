//! When a paused event counts as abandoned

use chrono::{DateTime, TimeDelta, Utc};
use pausecal_domain::{AbandonReason, LabelConfig, PauseRecord, RescheduleConfig};

/// Thresholds shared by the sweep and the expired-events preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbandonmentPolicy {
    original_end_grace: TimeDelta,
    max_pause_age: TimeDelta,
}

impl AbandonmentPolicy {
    pub const fn new(original_end_grace: TimeDelta, max_pause_age: TimeDelta) -> Self {
        Self { original_end_grace, max_pause_age }
    }

    pub fn from_config(config: &RescheduleConfig) -> Self {
        Self::new(config.original_end_grace(), config.max_pause_age())
    }

    /// `Some(reason)` when `record` should be rescheduled at `now`.
    ///
    /// Overrunning the original end wins over pause age, since it decides
    /// the "missed" label.
    pub fn evaluate(&self, record: &PauseRecord, now: DateTime<Utc>) -> Option<AbandonReason> {
        if record.time_since_original_end(now) > self.original_end_grace {
            Some(AbandonReason::MissedOriginalEnd)
        } else if record.time_since_pause(now) > self.max_pause_age {
            Some(AbandonReason::PauseTooOld)
        } else {
            None
        }
    }

    pub fn label_prefix(reason: AbandonReason, labels: &LabelConfig) -> &str {
        match reason {
            AbandonReason::MissedOriginalEnd => &labels.missed,
            AbandonReason::PauseTooOld => &labels.rescheduled,
        }
    }
}

impl Default for AbandonmentPolicy {
    fn default() -> Self {
        Self::from_config(&RescheduleConfig::default())
    }
}
