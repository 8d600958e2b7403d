//! Core error types for foundation-core.
//!
//! Tracker operations are total over their input apart from validation, so
//! the hierarchy is small: configuration problems, caller-supplied input that
//! violates a precondition, and the I/O and serialization errors that surface
//! while loading or saving the config file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for foundation-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Habit names must contain at least one non-whitespace character
    #[error("Habit name must not be empty")]
    EmptyName,

    /// Layouts are only defined for non-negative brick counts
    #[error("Brick count must be non-negative, got {0}")]
    NegativeBrickCount(i64),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::EmptyName.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyName)));
        assert_eq!(err.to_string(), "Validation error: Habit name must not be empty");
    }

    #[test]
    fn negative_count_message_includes_value() {
        let err = ValidationError::NegativeBrickCount(-3);
        assert_eq!(err.to_string(), "Brick count must be non-negative, got -3");
    }

    #[test]
    fn toml_parse_error_maps_to_parse_failed() {
        let err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let cfg: ConfigError = err.into();
        assert!(matches!(cfg, ConfigError::ParseFailed(_)));
    }
}
