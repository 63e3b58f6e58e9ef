use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Office,
    Home,
    Away, // only on off / off_sick ledger entries
}

impl Location {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Location::Office => "office",
            Location::Home => "home",
            Location::Away => "away",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "office" => Some(Location::Office),
            "home" => Some(Location::Home),
            "away" => Some(Location::Away),
            _ => None,
        }
    }

    /// Parse a workplace given on the command line or in an interaction.
    /// `away` is not a place one can clock in from.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "office" | "o" | "wfo" => Some(Location::Office),
            "home" | "h" | "wfh" => Some(Location::Home),
            _ => None,
        }
    }

    pub fn is_workplace(&self) -> bool {
        !matches!(self, Location::Away)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::Office => "🏢 Office",
            Location::Home => "🏠 Home",
            Location::Away => "🚫 Away",
        }
    }
}
