use crate::core::users::Actor;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

pub const MAX_DELAY_MINUTES: i64 = 1440;

#[derive(Debug, Clone, Serialize)]
pub struct ReminderRecorded {
    pub sender: String,
    pub target_user: String,
    pub message: String,
    pub delay_minutes: i64,
    pub scheduled_for: DateTime<Utc>,
}

/// Reminders are recorded in the audit log only; delivery is up to the host.
pub struct RemindLogic;

impl RemindLogic {
    pub fn record(
        pool: &mut DbPool,
        sender: &Actor,
        target_user: &str,
        message: &str,
        minutes: i64,
        now: DateTime<Utc>,
    ) -> AppResult<ReminderRecorded> {
        if !(1..=MAX_DELAY_MINUTES).contains(&minutes) {
            return Err(AppError::InvalidOption {
                name: "minutes".into(),
                value: minutes.to_string(),
            });
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::MissingOption("message".into()));
        }

        let scheduled_for = now + Duration::minutes(minutes);
        let details = serde_json::json!({
            "target_user": target_user,
            "message": message,
            "delay_minutes": minutes,
            "scheduled_for": scheduled_for,
        });
        audit(
            &pool.conn,
            &sender.id,
            "reminder_sent",
            target_user,
            &details.to_string(),
            now,
        )?;

        info!(sender = %sender.id, target = %target_user, minutes, "reminder recorded");

        Ok(ReminderRecorded {
            sender: sender.id.clone(),
            target_user: target_user.to_string(),
            message: message.to_string(),
            delay_minutes: minutes,
            scheduled_for,
        })
    }
}
