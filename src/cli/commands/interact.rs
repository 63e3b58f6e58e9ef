//! Chat interactions as JSON: the payload names one command, the user who
//! invoked it and the options given. It is routed to the same handlers as
//! the command line.
//!
//! ```json
//! { "command": "clock-in",
//!   "user": { "id": "42", "username": "amra" },
//!   "options": [ { "name": "location", "value": "home" } ] }
//! ```

use crate::cli::commands::Ctx;
use crate::cli::parser::Commands;
use crate::core::reports::{ReportKind, ScheduleKind, StatusKind};
use crate::core::users::Actor;
use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::ops::RangeInclusive;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Interaction {
    pub command: String,
    pub user: InteractionUser,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionUser {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: Value,
}

/// Option lookup with the validation clap applies on the command line.
struct Options<'a>(&'a [InteractionOption]);

impl Options<'_> {
    fn raw(&self, names: &[&str]) -> Option<&Value> {
        self.0
            .iter()
            .find(|o| names.contains(&o.name.as_str()))
            .map(|o| &o.value)
    }

    fn text(&self, name: &str) -> Option<String> {
        match self.raw(&[name])? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn require_text(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::MissingOption(name.to_string()))
    }

    /// Integers may arrive as JSON numbers or numeric strings.
    fn int_in(&self, names: &[&str], range: RangeInclusive<i64>) -> AppResult<Option<i64>> {
        let Some(value) = self.raw(names) else {
            return Ok(None);
        };
        let invalid = || AppError::InvalidOption {
            name: names[0].to_string(),
            value: value.to_string(),
        };
        let n = match value {
            Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid())?,
            Value::Null => return Ok(None),
            _ => return Err(invalid()),
        };
        if !range.contains(&n) {
            return Err(invalid());
        }
        Ok(Some(n))
    }

    fn require_int_in(&self, names: &[&str], range: RangeInclusive<i64>) -> AppResult<i64> {
        self.int_in(names, range)?
            .ok_or_else(|| AppError::MissingOption(names[0].to_string()))
    }

    fn kind<T: ValueEnum>(&self, name: &str) -> AppResult<T> {
        let s = self.require_text(name)?;
        <T as ValueEnum>::from_str(&s, true).map_err(|_| AppError::InvalidOption {
            name: name.to_string(),
            value: s,
        })
    }
}

/// Translate an interaction into the acting user and a command.
pub fn route(it: &Interaction) -> AppResult<(Actor, Commands)> {
    let o = Options(&it.options);
    let actor = Actor::new(it.user.id.clone(), it.user.username.clone());

    let cmd = match it.command.as_str() {
        "clock-in" => Commands::ClockIn {
            location: o.text("location"),
        },
        "wfh" => Commands::Wfh,
        "wfo" => Commands::Wfo,
        "clock-out" => Commands::ClockOut,
        "pauza-start" => Commands::PauzaStart,
        "pauza-end" => Commands::PauzaEnd,
        "off" => Commands::Off,
        "vacation-request" => Commands::VacationRequest {
            start_date: o.require_text("start_date")?,
            end_date: o.require_text("end_date")?,
            working_days: o.require_int_in(&["working_days"], 1..=365)?,
            reason: o.text("reason"),
        },
        "sick-leave" => Commands::SickLeave {
            start_date: o.require_text("start_date")?,
            end_date: o.require_text("end_date")?,
            working_days: o.require_int_in(&["working_days"], 1..=365)?,
            reason: o.require_text("reason")?,
        },
        "vacation-status" => Commands::VacationStatus,
        "time-log" => Commands::TimeLog {
            days: o.int_in(&["days"], 1..=30)?.unwrap_or(7),
        },
        "admin-set-balance" => Commands::AdminSetBalance {
            target: o.require_text("user")?,
            days: o.require_int_in(&["days"], 0..=365)?,
            target_name: o.text("user_name"),
        },
        "admin-add-days" => Commands::AdminAddDays {
            target: o.require_text("user")?,
            days: o.require_int_in(&["days"], 1..=100)?,
            target_name: o.text("user_name"),
        },
        "admin-remove-days" => Commands::AdminRemoveDays {
            target: o.require_text("user")?,
            days: o.require_int_in(&["days"], 1..=100)?,
            target_name: o.text("user_name"),
        },
        "pm-pending" => Commands::PmPending,
        "pm-approve" => Commands::PmApprove {
            request_id: o.require_int_in(&["request_id"], 1..=i64::MAX)?,
        },
        "pm-deny" => Commands::PmDeny {
            request_id: o.require_int_in(&["request_id"], 1..=i64::MAX)?,
            reason: o.text("reason"),
        },
        "admin-approve" => Commands::AdminApprove {
            request_id: o.require_int_in(&["request_id"], 1..=i64::MAX)?,
        },
        "admin-deny" => Commands::AdminDeny {
            request_id: o.require_int_in(&["request_id"], 1..=i64::MAX)?,
            reason: o.text("reason"),
        },
        "status" => Commands::Status {
            kind: o.kind::<StatusKind>("type")?,
        },
        "schedule" => Commands::Schedule {
            kind: o.kind::<ScheduleKind>("type")?,
        },
        "report" => Commands::Report {
            kind: o.kind::<ReportKind>("type")?,
            days: o.int_in(&["days"], 1..=365)?,
            month: o.int_in(&["month"], 1..=12)?.map(|m| m as u32),
            year: o.int_in(&["year"], 2020..=2030)?.map(|y| y as i32),
        },
        "remind" => Commands::Remind {
            target: o.require_text("user")?,
            message: o.require_text("message")?,
            minutes: o.require_int_in(&["minutes", "when"], 1..=1440)?,
        },
        other => return Err(AppError::UnknownCommand(other.to_string())),
    };

    Ok((actor, cmd))
}

pub fn parse(json: &str) -> AppResult<(Actor, Commands)> {
    let it: Interaction = serde_json::from_str(json)?;
    debug!(command = %it.command, user = %it.user.id, "interaction received");
    route(&it)
}

/// Handle the `interact` command: payload from `--file` or stdin.
pub fn handle(cmd: &Commands, ctx: &Ctx) -> AppResult<()> {
    let Commands::Interact { file } = cmd else {
        return Ok(());
    };

    let json = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let (actor, routed) = parse(&json)?;
    let ctx = Ctx {
        actor: Some(actor),
        ..ctx.clone()
    };
    crate::execute(&routed, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(command: &str, options: &str) -> String {
        format!(
            r#"{{"command":"{command}","user":{{"id":"42","username":"amra"}},"options":{options}}}"#
        )
    }

    #[test]
    fn clock_in_with_location() {
        let (actor, cmd) = parse(&payload(
            "clock-in",
            r#"[{"name":"location","value":"home"}]"#,
        ))
        .unwrap();
        assert_eq!(actor, Actor::new("42", "amra"));
        assert_eq!(
            cmd,
            Commands::ClockIn {
                location: Some("home".into())
            }
        );
    }

    #[test]
    fn options_may_be_omitted() {
        let json = r#"{"command":"pauza-start","user":{"id":"1","username":"x"}}"#;
        let (_, cmd) = parse(json).unwrap();
        assert_eq!(cmd, Commands::PauzaStart);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = parse(&payload("dance", "[]")).unwrap_err();
        assert!(matches!(err, AppError::UnknownCommand(c) if c == "dance"));
    }

    #[test]
    fn missing_required_option() {
        let err = parse(&payload(
            "vacation-request",
            r#"[{"name":"start_date","value":"2025-07-01"}]"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::MissingOption(n) if n == "end_date"));
    }

    #[test]
    fn out_of_range_values_are_invalid() {
        let err = parse(&payload("time-log", r#"[{"name":"days","value":31}]"#)).unwrap_err();
        assert!(matches!(err, AppError::InvalidOption { .. }));

        let err = parse(&payload(
            "report",
            r#"[{"name":"type","value":"work-hours"},{"name":"year","value":2019}]"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidOption { name, .. } if name == "year"));
    }

    #[test]
    fn report_type_and_numeric_strings() {
        let (_, cmd) = parse(&payload(
            "report",
            r#"[{"name":"type","value":"monthly-attendance"},{"name":"month","value":"3"}]"#,
        ))
        .unwrap();
        assert_eq!(
            cmd,
            Commands::Report {
                kind: ReportKind::MonthlyAttendance,
                days: None,
                month: Some(3),
                year: None,
            }
        );
    }

    #[test]
    fn remind_accepts_when_for_minutes() {
        let (_, cmd) = parse(&payload(
            "remind",
            r#"[{"name":"user","value":"7"},{"name":"message","value":"standup"},{"name":"when","value":15}]"#,
        ))
        .unwrap();
        assert_eq!(
            cmd,
            Commands::Remind {
                target: "7".into(),
                message: "standup".into(),
                minutes: 15,
            }
        );
    }

    #[test]
    fn malformed_json_is_an_invalid_payload() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, AppError::InvalidPayload(_)));
    }
}
