use crate::core::reports::{ReportKind, ScheduleKind, StatusKind};
use clap::{Parser, Subcommand};

/// Command-line interface definition for dutybot
/// Time tracking and leave approval core for team chat bots, backed by SQLite
#[derive(Parser, Debug)]
#[command(
    name = "dutybot",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work sessions, breaks and leave requests of a team using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Acting user id (defaults to `default_user` from the config)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Acting user's display name
    #[arg(global = true, long = "name")]
    pub name: Option<String>,

    /// Print results as JSON instead of text
    #[arg(global = true, long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start working at the office or from home
    ClockIn {
        #[arg(long, short, help = "office (o, wfo) or home (h, wfh)")]
        location: Option<String>,
    },

    /// Start working from home
    Wfh,

    /// Start working from the office
    Wfo,

    /// End the current session
    ClockOut,

    /// Start a break
    PauzaStart,

    /// End the break and resume work
    PauzaEnd,

    /// Mark yourself off for the day
    Off,

    /// Request vacation days
    VacationRequest {
        /// First day (YYYY-MM-DD)
        start_date: String,
        /// Last day (YYYY-MM-DD)
        end_date: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..=365))]
        working_days: i64,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Report sick leave
    SickLeave {
        start_date: String,
        end_date: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..=365))]
        working_days: i64,
        reason: String,
    },

    /// Show your vacation balance and latest requests
    VacationStatus,

    /// Show your time entries
    TimeLog {
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(i64).range(1..=30))]
        days: i64,
    },

    /// Set a user's vacation days
    AdminSetBalance {
        /// Target user id
        target: String,
        #[arg(value_parser = clap::value_parser!(i64).range(0..=365))]
        days: i64,
        #[arg(long = "target-name")]
        target_name: Option<String>,
    },

    /// Add vacation days to a user
    AdminAddDays {
        target: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..=100))]
        days: i64,
        #[arg(long = "target-name")]
        target_name: Option<String>,
    },

    /// Remove vacation days from a user
    AdminRemoveDays {
        target: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..=100))]
        days: i64,
        #[arg(long = "target-name")]
        target_name: Option<String>,
    },

    /// List requests waiting for approval
    PmPending,

    /// First-stage approval
    PmApprove { request_id: i64 },

    /// First-stage rejection
    PmDeny {
        request_id: i64,
        reason: Option<String>,
    },

    /// Final approval
    AdminApprove { request_id: i64 },

    /// Final rejection
    AdminDeny {
        request_id: i64,
        reason: Option<String>,
    },

    /// Who is online, on a break, on vacation or off
    Status {
        #[arg(value_enum)]
        kind: StatusKind,
    },

    /// Today's activity, the week, upcoming vacations
    Schedule {
        #[arg(value_enum)]
        kind: ScheduleKind,
    },

    /// Team reports
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=365))]
        days: Option<i64>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long, value_parser = clap::value_parser!(i32).range(2020..=2030))]
        year: Option<i32>,
    },

    /// Record a reminder for a user
    Remind {
        target: String,
        message: String,
        #[arg(value_parser = clap::value_parser!(i64).range(1..=1440))]
        minutes: i64,
    },

    /// Handle one chat interaction given as JSON (file or stdin)
    Interact {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,
    },
}
