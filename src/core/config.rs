//! Declarative logger configuration
//!
//! ```
//! use leveled_logger::{LoggerConfig, LogLevel};
//!
//! let config = LoggerConfig::from_json(r#"{"level": "Debug", "beautify": false}"#).unwrap();
//! let logger = config.into_builder().build().unwrap();
//! assert_eq!(logger.level(), LogLevel::Debug);
//! ```

use super::error::{LoggerError, Result};
use super::logger::{Logger, LoggerBuilder};
use super::timestamp::TimestampFormat;
use crate::error_detail::{default_baseline, FormatterParams, PathHidingMethod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Threshold name, case-insensitive
    pub level: String,
    /// Stock error formatter name
    pub error_format: String,
    pub beautify: bool,
    pub invert_callstack: bool,
    pub path_hiding_method: PathHidingMethod,
    /// Defaults to this crate's directory
    pub path_hiding_value: Option<String>,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            error_format: "json".to_string(),
            beautify: false,
            invert_callstack: false,
            path_hiding_method: PathHidingMethod::FullBaseline,
            path_hiding_value: None,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))
    }

    pub fn formatter_params(&self) -> FormatterParams {
        FormatterParams {
            beautify: self.beautify,
            invert_callstack: self.invert_callstack,
            path_hiding_method: self.path_hiding_method,
            path_hiding_value: self
                .path_hiding_value
                .clone()
                .unwrap_or_else(default_baseline),
        }
    }

    /// A builder preloaded with this configuration; output and clock stay at
    /// their defaults
    pub fn into_builder(self) -> LoggerBuilder {
        let params = self.formatter_params();
        Logger::builder()
            .level_name(self.level)
            .error_format(self.error_format)
            .formatter_params(params)
            .timestamp_format(self.timestamp_format)
    }
}

impl Logger {
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        config.clone().into_builder().build()
    }
}
