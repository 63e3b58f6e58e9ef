use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Unset until the user runs a command.
    pub last_active: Option<DateTime<Utc>>,
}
