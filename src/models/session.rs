use super::location::Location;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Work,
    Break,
}

impl SessionType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionType::Work => "work",
            SessionType::Break => "break",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(SessionType::Work),
            "break" => Some(SessionType::Break),
            _ => None,
        }
    }
}

/// The single open session of a user (⇔ one `active_sessions` row).
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSession {
    pub user_id: String,
    pub session_type: SessionType,
    pub start_time: DateTime<Utc>,
    pub location: Location,
}

impl ActiveSession {
    /// Whole seconds elapsed until `now`, never negative.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_seconds().max(0)
    }
}
