//! Error detail formatters
//!
//! A formatter turns an error into the text embedded under `details`.
//! The logger only accepts output that parses as a JSON object, so only
//! JSON formatters can be selected by name.

use super::params::FormatterParams;
use super::traced::{find_traced, StackFrame};
use crate::core::error::{LoggerError, Result};
use serde::Serialize;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;

/// Renders an error value together with its recorded call stack
pub trait ErrorFormatter: Send + Sync {
    fn format(&self, err: &(dyn Error + 'static), params: &FormatterParams) -> Result<String>;
    fn name(&self) -> &str;
}

/// Formatter kinds selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    Json,
}

impl FromStr for ErrorFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ErrorFormat::Json),
            "raw" | "text" => Err(LoggerError::formatter_construction(
                s,
                "text output cannot be embedded as details",
            )),
            _ => Err(LoggerError::formatter_construction(s, "unknown error format")),
        }
    }
}

impl fmt::Display for ErrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorFormat::Json => f.write_str("json"),
        }
    }
}

/// Build a formatter by name (`json`)
pub fn new_formatter(name: &str) -> Result<Arc<dyn ErrorFormatter>> {
    Ok(match name.parse::<ErrorFormat>()? {
        ErrorFormat::Json => Arc::new(JsonErrorFormatter),
    })
}

/// Frames in output order, with paths hidden
fn output_frames(err: &(dyn Error + 'static), params: &FormatterParams) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = find_traced(err)
        .map(|traced| traced.frames().to_vec())
        .unwrap_or_default();
    for frame in &mut frames {
        frame.caller = hide_caller(&frame.caller, params);
    }
    if params.invert_callstack {
        frames.reverse();
    }
    frames
}

// `caller` is "<file>:<line>"; only the file part is hidden.
fn hide_caller(caller: &str, params: &FormatterParams) -> String {
    match caller.rsplit_once(':') {
        Some((file, line)) => format!("{}:{}", params.hide_path(file), line),
        None => params.hide_path(caller),
    }
}

#[derive(Serialize)]
struct ErrorDetails {
    error: String,
    stack_trace: Vec<StackFrame>,
}

/// `{"error": "...", "stack_trace": [{"func": "...", "caller": "file:line"}]}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorFormatter;

impl ErrorFormatter for JsonErrorFormatter {
    fn format(&self, err: &(dyn Error + 'static), params: &FormatterParams) -> Result<String> {
        let details = ErrorDetails {
            error: err.to_string(),
            stack_trace: output_frames(err, params),
        };
        let json = if params.beautify {
            serde_json::to_string_pretty(&details)?
        } else {
            serde_json::to_string(&details)?
        };
        Ok(json)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Human-readable rendering: the message, then one line per frame
///
/// Meant for printing errors on their own. The output is not JSON, so a
/// logger given this formatter writes its lines without `details`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawErrorFormatter;

impl ErrorFormatter for RawErrorFormatter {
    fn format(&self, err: &(dyn Error + 'static), params: &FormatterParams) -> Result<String> {
        let mut out = err.to_string();
        let separator = if params.beautify { "\n  " } else { "; " };
        for frame in output_frames(err, params) {
            out.push_str(separator);
            let _ = write!(out, "{} ({})", frame.func, frame.caller);
            if let Some(context) = &frame.context {
                let _ = write!(out, ": {}", context);
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "raw"
    }
}
