//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Milestone interval for check-in celebrations
//! - Highlight interval for bricks in the pyramid
//! - Starter habits to pre-populate a fresh session
//!
//! Configuration is stored at `~/.config/foundation/config.toml`. Habits
//! themselves are never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::pyramid::DEFAULT_HIGHLIGHT_INTERVAL;
use crate::streak::DEFAULT_MILESTONE_INTERVAL;

/// Streak tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_milestone_interval")]
    pub milestone_interval: u32,
}

/// Pyramid layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_highlight_interval")]
    pub highlight_interval: u32,
}

/// A habit pre-populated into a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterHabit {
    pub name: String,
    #[serde(default)]
    pub streak: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/foundation/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub starter_habits: Vec<StarterHabit>,
}

fn default_milestone_interval() -> u32 {
    DEFAULT_MILESTONE_INTERVAL
}
fn default_highlight_interval() -> u32 {
    DEFAULT_HIGHLIGHT_INTERVAL
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            milestone_interval: default_milestone_interval(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            highlight_interval: default_highlight_interval(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            layout: LayoutConfig::default(),
            starter_habits: Vec::new(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => value
                    .parse::<u64>()
                    .map(|n| serde_json::Value::Number(n.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            return Self::load_from(&path);
        }
        let cfg = Self::default();
        cfg.save_to(&path)?;
        Ok(cfg)
    }

    /// Load and validate the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values the tracker and layout cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.milestone_interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tracker.milestone_interval".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.layout.highlight_interval == 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.highlight_interval".into(),
                message: "must be at least 1".into(),
            });
        }
        if let Some(pos) = self
            .starter_habits
            .iter()
            .position(|h| h.name.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: format!("starter_habits.{pos}.name"),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. `self` is left untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}
