use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    PmApproved,
    AdminApproved,
    Rejected,
}

impl RequestStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::PmApproved => "pm_approved",
            RequestStatus::AdminApproved => "admin_approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "pm_approved" => Some(RequestStatus::PmApproved),
            "admin_approved" => Some(RequestStatus::AdminApproved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::AdminApproved | RequestStatus::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Vacation,
    Sick,
}

impl RequestKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestKind::Vacation => "vacation",
            RequestKind::Sick => "sick",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "vacation" => Some(RequestKind::Vacation),
            "sick" => Some(RequestKind::Sick),
            _ => None,
        }
    }
}

/// A leave application (⇔ one `vacation_requests` row).
#[derive(Debug, Clone, Serialize)]
pub struct VacationRequest {
    pub id: i64,
    pub user_id: String,
    pub kind: RequestKind,
    pub requested_days: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: RequestStatus,
    pub pm_approved_by: Option<String>,
    pub pm_approved_at: Option<DateTime<Utc>>,
    pub admin_approved_by: Option<String>,
    pub admin_approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
