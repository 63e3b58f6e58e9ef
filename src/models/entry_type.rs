use serde::Serialize;

/// Kind of transition recorded in the time ledger.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    ClockIn,
    ClockOut,
    PauzaStart,
    PauzaEnd,
    Off,
    OffSick,
}

impl EntryType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryType::ClockIn => "clock_in",
            EntryType::ClockOut => "clock_out",
            EntryType::PauzaStart => "pauza_start",
            EntryType::PauzaEnd => "pauza_end",
            EntryType::Off => "off",
            EntryType::OffSick => "off_sick",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "clock_in" => Some(EntryType::ClockIn),
            "clock_out" => Some(EntryType::ClockOut),
            "pauza_start" => Some(EntryType::PauzaStart),
            "pauza_end" => Some(EntryType::PauzaEnd),
            "off" => Some(EntryType::Off),
            "off_sick" => Some(EntryType::OffSick),
            _ => None,
        }
    }
}
