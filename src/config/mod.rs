use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Accepted `off_duty_window_hours`: up to 30 days back.
pub const OFF_DUTY_WINDOW_RANGE: RangeInclusive<i64> = 1..=720;
pub const RECENT_REQUESTS_RANGE: RangeInclusive<i64> = 1..=50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Used by `clock-in` without `--location`.
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default)]
    pub default_display_name: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// How many requests `vacation-status` lists.
    #[serde(default = "default_recent_requests")]
    pub recent_requests: i64,
    #[serde(default = "default_off_duty_window")]
    pub off_duty_window_hours: i64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_location() -> String {
    "office".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_recent_requests() -> i64 {
    3
}
fn default_off_duty_window() -> i64 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_location: default_location(),
            default_user: None,
            default_display_name: None,
            log_level: default_log_level(),
            recent_requests: default_recent_requests(),
            off_duty_window_hours: default_off_duty_window(),
        }
    }
}

impl Config {
    /// `~/.dutybot`, or `./.dutybot` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dutybot")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("dutybot.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("dutybot.sqlite")
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject numeric settings outside their accepted range.
    pub fn validate(&self) -> AppResult<()> {
        if !OFF_DUTY_WINDOW_RANGE.contains(&self.off_duty_window_hours) {
            return Err(AppError::Config(format!(
                "off_duty_window_hours {} (expected 1-720)",
                self.off_duty_window_hours
            )));
        }
        if !RECENT_REQUESTS_RANGE.contains(&self.recent_requests) {
            return Err(AppError::Config(format!(
                "recent_requests {} (expected 1-50)",
                self.recent_requests
            )));
        }
        Ok(())
    }

    /// The configured default location, validated as a workplace.
    pub fn location(&self) -> AppResult<Location> {
        Location::from_code(&self.default_location)
            .filter(Location::is_workplace)
            .ok_or_else(|| AppError::Config(format!("default_location '{}'", self.default_location)))
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let mut config = if is_test {
            Self::default()
        } else {
            Self::load()?
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.default_location, "office");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.recent_requests, 3);
        assert_eq!(cfg.off_duty_window_hours, 24);
        assert!(cfg.default_user.is_none());
    }

    #[test]
    fn away_is_not_a_default_location() {
        let cfg = Config {
            default_location: "away".into(),
            ..Config::default()
        };
        assert!(cfg.location().is_err());
        let cfg = Config {
            default_location: "wfh".into(),
            ..Config::default()
        };
        assert_eq!(cfg.location().unwrap(), Location::Home);
    }

    #[test]
    fn out_of_range_window_is_rejected_on_load() {
        let path = std::env::temp_dir().join("dutybot_config_window_test.conf");
        fs::write(&path, "off_duty_window_hours: 1000000000000\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        fs::write(&path, "off_duty_window_hours: 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        fs::write(&path, "off_duty_window_hours: 48\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().off_duty_window_hours, 48);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn recent_requests_must_be_positive() {
        let cfg = Config {
            recent_requests: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
