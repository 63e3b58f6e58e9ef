use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the internal `audit_log` table.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub action: String,
    pub target: String,
    pub details: String,
}
