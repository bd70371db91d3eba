//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from least to most verbose.
///
/// A logger configured at level `T` emits a call at level `L` iff
/// `T != Disabled` and `L <= T`. `Disabled` suppresses everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Disabled = 0,
    Show = 1,
    Fatal = 2,
    Error = 3,
    #[serde(rename = "warn", alias = "warning")]
    Warning = 4,
    #[default]
    Info = 5,
    Business = 6,
    Message = 7,
    Debug = 8,
    Query = 9,
    Trace = 10,
}

impl LogLevel {
    /// Every level, in rank order.
    pub const ALL: [LogLevel; 11] = [
        LogLevel::Disabled,
        LogLevel::Show,
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Business,
        LogLevel::Message,
        LogLevel::Debug,
        LogLevel::Query,
        LogLevel::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Disabled => "DISABLED",
            LogLevel::Show => "SHOW",
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Business => "BUSINESS",
            LogLevel::Message => "MESSAGE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Query => "QUERY",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Configuration token accepted by [`FromStr`] (lowercase).
    pub fn token(&self) -> &'static str {
        match self {
            LogLevel::Disabled => "disabled",
            LogLevel::Show => "show",
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Business => "business",
            LogLevel::Message => "message",
            LogLevel::Debug => "debug",
            LogLevel::Query => "query",
            LogLevel::Trace => "trace",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether a call at `candidate` passes a threshold of `self`.
    #[inline]
    pub fn is_allowed(&self, candidate: LogLevel) -> bool {
        *self != LogLevel::Disabled && candidate != LogLevel::Disabled && candidate <= *self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(LogLevel::Disabled),
            "show" => Ok(LogLevel::Show),
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "business" => Ok(LogLevel::Business),
            "message" => Ok(LogLevel::Message),
            "debug" => Ok(LogLevel::Debug),
            "query" => Ok(LogLevel::Query),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}
