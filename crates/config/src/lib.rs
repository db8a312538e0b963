pub mod constants;

pub use etcetera::AppStrategy;
use etcetera::{AppStrategyArgs, choose_app_strategy};

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {key} is not set")]
    Missing { key: String },

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

pub fn create_strategy() -> std::result::Result<impl AppStrategy, etcetera::HomeDirError> {
    choose_app_strategy(AppStrategyArgs {
        top_level_domain: constants::TOP_LEVEL_DOMAIN.to_string(),
        author: constants::AUTHOR.to_string(),
        app_name: constants::APP_NAME.to_string(),
    })
}

/// Directory holding the user config files, `CONFIG_DIRECTORY` wins over the
/// platform default.
pub fn config_dir() -> PathBuf {
    env::var_os("CONFIG_DIRECTORY")
        .map(PathBuf::from)
        .or_else(|| create_strategy().ok().map(|s| s.config_dir()))
        .unwrap_or_else(|| env::temp_dir().join(constants::APP_NAME))
}

/// Reads `key`, treating an empty value the same as an unset one.
pub fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Turns a missing required value into [`ConfigError::Missing`].
pub fn required(key: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })
}

pub fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// `1`, `true`, `yes` and `on` (any case) count as enabled.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
