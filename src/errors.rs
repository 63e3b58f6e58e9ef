//! Unified application error type.
//! All modules (db, core, cli, ui) return AppError so that domain failures
//! and store failures travel the same way up to the dispatcher.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Session tracker
    // ---------------------------
    #[error("Already clocked in. Use `clock-out` to end the working day.")]
    AlreadyWorking,

    #[error("Not clocked in. Use `clock-in` to start the working day.")]
    NotWorking,

    #[error("Already on a break. Use `pauza-end` to finish it.")]
    AlreadyOnBreak,

    #[error("Not on a break. Use `pauza-start` to begin one.")]
    NotOnBreak,

    // ---------------------------
    // Vacation balance / workflow
    // ---------------------------
    #[error("Not enough vacation days: {available} day(s) available")]
    InsufficientBalance { available: i64 },

    #[error("No vacation balance recorded for user {0}")]
    BalanceNotFound(String),

    #[error("Request {0} not found")]
    RequestNotFound(i64),

    #[error("Request {id} is {from}; cannot {action}")]
    InvalidTransition {
        id: i64,
        from: String,
        action: &'static str,
    },

    #[error("A reason is required when rejecting a request")]
    ReasonRequired,

    // ---------------------------
    // Input / parsing
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid location: {0} (expected office or home)")]
    InvalidLocation(String),

    #[error("Invalid value for option `{name}`: {value}")]
    InvalidOption { name: String, value: String },

    #[error("Missing required option `{0}`")]
    MissingOption(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    // ---------------------------
    // Store / environment
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Expected conditions the acting user can fix; they never leave a
    /// persisted change behind.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            AppError::AlreadyWorking
                | AppError::NotWorking
                | AppError::AlreadyOnBreak
                | AppError::NotOnBreak
                | AppError::InsufficientBalance { .. }
                | AppError::BalanceNotFound(_)
                | AppError::RequestNotFound(_)
                | AppError::InvalidTransition { .. }
                | AppError::ReasonRequired
        )
    }

    /// The store-unavailable class: logged and surfaced generically.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, AppError::Db(_) | AppError::Migration(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
