use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VacationBalance {
    pub user_id: String,
    pub total_days: i64,
    pub used_days: i64,
    pub pending_days: i64,
    pub carried_over_days: i64,
    pub last_updated: DateTime<Utc>,
}

impl VacationBalance {
    /// total - used - pending, not clamped.
    pub fn available_days(&self) -> i64 {
        self.total_days - self.used_days - self.pending_days
    }
}

/// Administrator adjustment applied to `total_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceOp {
    Add,
    Remove,
    Set,
}

impl BalanceOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceOp::Add => "add",
            BalanceOp::Remove => "remove",
            BalanceOp::Set => "set",
        }
    }

    /// New total after applying the operation; `remove` floors at zero.
    pub fn apply(&self, total: i64, days: i64) -> i64 {
        match self {
            BalanceOp::Add => total + days,
            BalanceOp::Remove => (total - days).max(0),
            BalanceOp::Set => days,
        }
    }
}
