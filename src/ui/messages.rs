use crate::errors::AppError;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn success<T: fmt::Display>(msg: T) {
    println!("{FG_GREEN}{BOLD}{ICON_OK}{RESET} {msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{FG_YELLOW}{BOLD}{ICON_WARN}{RESET} {msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{FG_RED}{BOLD}{ICON_ERR}{RESET} {msg}");
}

/// Text shown to the user for a failed command. Store failures hide
/// the driver message, which goes to the tracing log instead.
pub fn describe(err: &AppError) -> String {
    if err.is_store_failure() {
        "The time tracking store is unavailable, please try again later.".to_string()
    } else {
        err.to_string()
    }
}
