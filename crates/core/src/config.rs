use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommendations::{
    DEFAULT_BIRTHDAY_DAYS_BEFORE, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_RESULTS,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct NotificationConfig {
    pub birthday_days_before: u32,
    pub max_distance: u32,
    pub max_results: usize,
    pub max_price: Decimal,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub birthday_days_before: Option<u32>,
    pub max_distance: Option<u32>,
    pub max_results: Option<usize>,
    pub max_price: Option<Decimal>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notifications: NotificationConfig {
                birthday_days_before: DEFAULT_BIRTHDAY_DAYS_BEFORE,
                max_distance: DEFAULT_MAX_DISTANCE,
                max_results: DEFAULT_MAX_RESULTS,
                max_price: Decimal::new(2000, 2),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("encore.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(notifications) = patch.notifications {
            if let Some(birthday_days_before) = notifications.birthday_days_before {
                self.notifications.birthday_days_before = birthday_days_before;
            }
            if let Some(max_distance) = notifications.max_distance {
                self.notifications.max_distance = max_distance;
            }
            if let Some(max_results) = notifications.max_results {
                self.notifications.max_results = max_results;
            }
            if let Some(max_price) = notifications.max_price {
                self.notifications.max_price = max_price;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("ENCORE_NOTIFICATIONS_BIRTHDAY_DAYS_BEFORE") {
            self.notifications.birthday_days_before =
                parse_u32("ENCORE_NOTIFICATIONS_BIRTHDAY_DAYS_BEFORE", &value)?;
        }
        if let Some(value) = read_env("ENCORE_NOTIFICATIONS_MAX_DISTANCE") {
            self.notifications.max_distance =
                parse_u32("ENCORE_NOTIFICATIONS_MAX_DISTANCE", &value)?;
        }
        if let Some(value) = read_env("ENCORE_NOTIFICATIONS_MAX_RESULTS") {
            self.notifications.max_results =
                parse_usize("ENCORE_NOTIFICATIONS_MAX_RESULTS", &value)?;
        }
        if let Some(value) = read_env("ENCORE_NOTIFICATIONS_MAX_PRICE") {
            self.notifications.max_price = parse_decimal("ENCORE_NOTIFICATIONS_MAX_PRICE", &value)?;
        }

        let log_level = read_env("ENCORE_LOGGING_LEVEL").or_else(|| read_env("ENCORE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("ENCORE_LOGGING_FORMAT").or_else(|| read_env("ENCORE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(birthday_days_before) = overrides.birthday_days_before {
            self.notifications.birthday_days_before = birthday_days_before;
        }
        if let Some(max_distance) = overrides.max_distance {
            self.notifications.max_distance = max_distance;
        }
        if let Some(max_results) = overrides.max_results {
            self.notifications.max_results = max_results;
        }
        if let Some(max_price) = overrides.max_price {
            self.notifications.max_price = max_price;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_notifications(&self.notifications)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("encore.toml"), PathBuf::from("config/encore.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn validate_notifications(notifications: &NotificationConfig) -> Result<(), ConfigError> {
    if notifications.birthday_days_before == 0 || notifications.birthday_days_before > 365 {
        return Err(ConfigError::Validation(
            "notifications.birthday_days_before must be in range 1..=365".to_string(),
        ));
    }

    if notifications.max_results == 0 {
        return Err(ConfigError::Validation(
            "notifications.max_results must be greater than zero".to_string(),
        ));
    }

    if notifications.max_price.is_sign_negative() {
        return Err(ConfigError::Validation(
            "notifications.max_price must not be negative".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    notifications: Option<NotificationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct NotificationPatch {
    birthday_days_before: Option<u32>,
    max_distance: Option<u32>,
    max_results: Option<usize>,
    max_price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
