//! In-memory bookkeeping of paused events

use std::collections::BTreeMap;

use pausecal_domain::PauseRecord;

/// Paused events keyed by their original event id, plus a pointer to the
/// most recently paused one.
///
/// The pointer is moved on every insert and cleared whenever the entry it
/// names is removed, so it never dangles.
#[derive(Debug, Default)]
pub struct PauseRegistry {
    records: BTreeMap<String, PauseRecord>,
    last_paused: Option<String>,
}

impl PauseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PauseRecord) {
        self.last_paused = Some(record.event_id.clone());
        self.records.insert(record.event_id.clone(), record);
    }

    pub fn remove(&mut self, event_id: &str) -> Option<PauseRecord> {
        let removed = self.records.remove(event_id);
        if self.last_paused.as_deref() == Some(event_id) {
            self.last_paused = None;
        }
        removed
    }

    /// The most recently paused record, if it is still registered.
    pub fn last(&self) -> Option<&PauseRecord> {
        self.last_paused.as_deref().and_then(|id| self.records.get(id))
    }

    pub fn last_paused_id(&self) -> Option<&str> {
        self.last_paused.as_deref()
    }

    pub fn get(&self, event_id: &str) -> Option<&PauseRecord> {
        self.records.get(event_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PauseRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
