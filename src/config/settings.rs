use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use log::LevelFilter;
use serde::Deserialize;

/// Logger configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingSettings {
    /// Parsed level, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.level).unwrap_or(LevelFilter::Info)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Position event handling configuration.
///
/// Token decimals are used when an event does not carry its own; they only
/// affect the decimal-adjusted amounts and the price, never the raw amounts.
#[derive(Debug, Deserialize, Clone)]
pub struct PositionSettings {
    #[serde(default = "default_token_decimals")]
    pub default_token0_decimals: u8,
    #[serde(default = "default_token_decimals")]
    pub default_token1_decimals: u8,
    /// Emit the token0 price at the current tick with each result
    #[serde(default = "default_include_price")]
    pub include_price: bool,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            default_token0_decimals: default_token_decimals(),
            default_token1_decimals: default_token_decimals(),
            include_price: default_include_price(),
        }
    }
}

fn default_token_decimals() -> u8 {
    18
}

fn default_include_price() -> bool {
    true
}

/// Root application configuration.
///
/// Loaded from an optional `config.yaml` (or any format the `config` crate
/// recognises under the name `config`) and `POSITIONS__*` environment
/// variables, e.g. `POSITIONS__LOGGING__LEVEL=debug`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub positions: PositionSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("POSITIONS").separator("__"))
            .build()?;

        Self::from_config(s)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }
}
