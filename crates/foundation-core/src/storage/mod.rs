mod config;

pub use config::{Config, LayoutConfig, StarterHabit, TrackerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/foundation[-dev]/` based on FOUNDATION_ENV.
///
/// Set FOUNDATION_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOUNDATION_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("foundation-dev")
    } else {
        base_dir.join("foundation")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
