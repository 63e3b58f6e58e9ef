use crate::db::balance::{insert_balance, load_balance, update_total};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::balance::{BalanceOp, VacationBalance};
use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct BalanceAdjusted {
    pub op: BalanceOp,
    pub days: i64,
    pub previous_total: Option<i64>,
    pub balance: VacationBalance,
}

/// Vacation balance ledger: reads and administrator adjustments.
pub struct BalanceLogic;

impl BalanceLogic {
    pub fn get(pool: &mut DbPool, user_id: &str) -> AppResult<Option<VacationBalance>> {
        load_balance(&pool.conn, user_id)
    }

    /// Same as `get`, but a missing row is `BalanceNotFound`.
    pub fn require(pool: &mut DbPool, user_id: &str) -> AppResult<VacationBalance> {
        Self::get(pool, user_id)?.ok_or_else(|| AppError::BalanceNotFound(user_id.to_string()))
    }

    /// Apply `op` to the target's total_days.
    ///
    /// `set` grants a first balance when the user has none; `add` and
    /// `remove` need an existing row. `remove` never goes below zero.
    pub fn adjust(
        pool: &mut DbPool,
        actor_id: &str,
        target_id: &str,
        op: BalanceOp,
        days: i64,
        now: DateTime<Utc>,
    ) -> AppResult<BalanceAdjusted> {
        if days < 0 {
            return Err(AppError::InvalidOption {
                name: "days".into(),
                value: days.to_string(),
            });
        }

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let previous = load_balance(&tx, target_id)?;
        let previous_total = previous.as_ref().map(|b| b.total_days);

        match (&previous, op) {
            (Some(b), _) => {
                update_total(&tx, target_id, op.apply(b.total_days, days), now)?;
            }
            (None, BalanceOp::Set) => {
                insert_balance(&tx, target_id, days, now)?;
            }
            (None, _) => return Err(AppError::BalanceNotFound(target_id.to_string())),
        }

        let details = serde_json::json!({
            "op": op.as_str(),
            "days": days,
            "previous_total": previous_total,
        });
        audit(
            &tx,
            actor_id,
            &format!("balance_{}", op.as_str()),
            target_id,
            &details.to_string(),
            now,
        )?;

        let balance = load_balance(&tx, target_id)?
            .ok_or_else(|| AppError::BalanceNotFound(target_id.to_string()))?;

        tx.commit()?;

        info!(
            actor = %actor_id,
            target = %target_id,
            op = op.as_str(),
            days,
            total = balance.total_days,
            "vacation balance adjusted"
        );

        Ok(BalanceAdjusted {
            op,
            days,
            previous_total,
            balance,
        })
    }
}
