//! TOML-based application configuration.
//!
//! Stores the user's scheduling defaults (preferred daily window,
//! session and break lengths, horizon). CLI flags override these per
//! invocation; the engine itself only ever sees resolved
//! `SchedulingOptions`.
//!
//! Configuration is stored at `~/.config/studyflow/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config_dir;
use crate::error::ConfigError;
use crate::scheduler::SchedulingOptions;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyflow/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduling: SchedulingOptions,
}

impl Config {
    /// Load the configuration, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration to the default location.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        std::fs::write(path, text).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a scheduling value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let s = &self.scheduling;
        match key {
            "preferred_start_hour" => Some(s.preferred_start_hour.to_string()),
            "preferred_end_hour" => Some(s.preferred_end_hour.to_string()),
            "session_minutes" => Some(s.session_minutes.to_string()),
            "break_minutes" => Some(s.break_minutes.to_string()),
            "days_ahead" => Some(s.days_ahead.to_string()),
            _ => None,
        }
    }

    /// Set a scheduling value by key and persist the result.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] for unknown keys, unparseable values,
    /// or values the scheduling validation rejects.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut updated = self.scheduling.clone();

        match key {
            "preferred_start_hour" => updated.preferred_start_hour = parse_value(key, value)?,
            "preferred_end_hour" => updated.preferred_end_hour = parse_value(key, value)?,
            "session_minutes" => updated.session_minutes = parse_value(key, value)?,
            "break_minutes" => updated.break_minutes = parse_value(key, value)?,
            "days_ahead" => updated.days_ahead = parse_value(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.scheduling = updated;
        self.save()
    }

    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(config_dir()?.join("config.toml"))
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scheduling.preferred_start_hour, 9);
        assert_eq!(config.scheduling.preferred_end_hour, 21);
        assert_eq!(config.scheduling.session_minutes, 45);
        assert_eq!(config.scheduling.break_minutes, 15);
        assert_eq!(config.scheduling.days_ahead, 7);
    }

    #[test]
    fn test_toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scheduling.session_minutes = 30;
        config.scheduling.days_ahead = 14;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scheduling.session_minutes, 30);
        assert_eq!(loaded.scheduling.days_ahead, 14);
        assert_eq!(loaded.scheduling.preferred_start_hour, 9);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scheduling]\nsession_minutes = 25\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scheduling.session_minutes, 25);
        assert_eq!(loaded.scheduling.break_minutes, 15);
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = Config::default();
        assert_eq!(config.get("session_minutes").as_deref(), Some("45"));
        assert_eq!(config.get("nonsense"), None);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();

        assert!(matches!(
            config.set("nonsense", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("session_minutes", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // Validation catches values that parse but break the schedule.
        assert!(matches!(
            config.set("preferred_end_hour", "5"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
