use super::{entry_type::EntryType, location::Location};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: String,
    pub entry_type: EntryType, // ⇔ time_entries.entry_type
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub notes: Option<String>,
}

impl TimeEntry {
    /// Entry ready to be appended; the id is assigned by the store.
    pub fn new(user_id: &str, entry_type: EntryType, location: Location, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            entry_type,
            timestamp: now,
            location,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
