//! Enrichment pipeline
//!
//! Each emitted call runs an ordered list of [`Enricher`]s over a fresh
//! [`LogRecord`]. The logger assembles the list in a fixed order:
//! context (`ref`), then level/message/where, then error detail (`details`).

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use crate::error_detail::{ErrorFormatter, FormatterParams, StackFrame};
use std::error::Error;

/// `func` of the frame added for errors that carry no trace of their own
pub const UNTRACED_FUNC: &str = "<untraced>";

/// A stage that appends fields to an in-flight record
pub trait Enricher {
    /// Append this stage's fields. On error nothing must have been appended.
    fn enrich(&self, record: &mut LogRecord, level: LogLevel, message: &str) -> Result<()>;
    fn name(&self) -> &str;
}

/// Adds `ref`
pub struct ContextEnricher<'a> {
    ref_id: &'a str,
}

impl<'a> ContextEnricher<'a> {
    pub fn new(ref_id: &'a str) -> Self {
        Self { ref_id }
    }
}

impl Enricher for ContextEnricher<'_> {
    fn enrich(&self, record: &mut LogRecord, _level: LogLevel, _message: &str) -> Result<()> {
        record.push("ref", self.ref_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "context"
    }
}

/// Adds `level`, `message` and `where`
pub struct LevelMessageEnricher {
    location: String,
}

impl LevelMessageEnricher {
    /// `location` is the already path-hidden `file:line`
    pub fn new(location: String) -> Self {
        Self { location }
    }
}

impl Enricher for LevelMessageEnricher {
    fn enrich(&self, record: &mut LogRecord, level: LogLevel, message: &str) -> Result<()> {
        record.push("level", level.to_str());
        record.push("message", message);
        record.push("where", self.location.as_str());
        Ok(())
    }

    fn name(&self) -> &str {
        "level_message"
    }
}

/// Adds `details`, the formatter's output inlined as a JSON object
///
/// When an origin is set and the formatter reports an empty `stack_trace`,
/// a single frame pointing at the origin is filled in.
pub struct ErrorDetailEnricher<'a> {
    err: &'a (dyn Error + 'static),
    formatter: &'a dyn ErrorFormatter,
    params: &'a FormatterParams,
    origin: Option<String>,
}

impl<'a> ErrorDetailEnricher<'a> {
    pub fn new(
        err: &'a (dyn Error + 'static),
        formatter: &'a dyn ErrorFormatter,
        params: &'a FormatterParams,
    ) -> Self {
        Self {
            err,
            formatter,
            params,
            origin: None,
        }
    }

    /// `caller` (already path-hidden) used for errors that were never traced
    #[must_use]
    pub fn with_origin(mut self, caller: impl Into<String>) -> Self {
        self.origin = Some(caller.into());
        self
    }

    fn fill_empty_stack(&self, details: &mut serde_json::Value) -> Result<()> {
        let Some(caller) = &self.origin else {
            return Ok(());
        };
        if let Some(stack) = details
            .get_mut("stack_trace")
            .and_then(serde_json::Value::as_array_mut)
            .filter(|stack| stack.is_empty())
        {
            stack.push(serde_json::to_value(StackFrame {
                func: UNTRACED_FUNC.to_string(),
                caller: caller.clone(),
                context: None,
            })?);
        }
        Ok(())
    }
}

impl Enricher for ErrorDetailEnricher<'_> {
    fn enrich(&self, record: &mut LogRecord, _level: LogLevel, _message: &str) -> Result<()> {
        let raw = self.formatter.format(self.err, self.params)?;
        let mut details: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            LoggerError::formatter(self.formatter.name(), format!("output is not JSON: {}", e))
        })?;
        if !details.is_object() {
            return Err(LoggerError::formatter(
                self.formatter.name(),
                "output is not a JSON object",
            ));
        }
        self.fill_empty_stack(&mut details)?;
        record.push("details", details);
        Ok(())
    }

    fn name(&self) -> &str {
        "error_detail"
    }
}

/// Ordered list of enrichers for one call
#[derive(Default)]
pub struct EnrichmentPipeline<'a> {
    enrichers: Vec<Box<dyn Enricher + 'a>>,
}

impl<'a> EnrichmentPipeline<'a> {
    pub fn new() -> Self {
        Self {
            enrichers: Vec::with_capacity(3),
        }
    }

    /// The standard chain: context (if any), level/message/where, error detail (if any)
    pub fn standard(
        ref_id: Option<&'a str>,
        location: String,
        error_detail: Option<ErrorDetailEnricher<'a>>,
    ) -> Self {
        let mut pipeline = Self::new();
        if let Some(ref_id) = ref_id.filter(|id| !id.is_empty()) {
            pipeline = pipeline.with(ContextEnricher::new(ref_id));
        }
        pipeline = pipeline.with(LevelMessageEnricher::new(location));
        if let Some(enricher) = error_detail {
            pipeline = pipeline.with(enricher);
        }
        pipeline
    }

    /// Append a stage at the end
    #[must_use]
    pub fn with<E: Enricher + 'a>(mut self, enricher: E) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.enrichers.iter().map(|e| e.name()).collect()
    }

    /// Run every stage in order. A failing stage is skipped and its error
    /// returned; the remaining stages still run.
    pub fn apply(&self, record: &mut LogRecord, level: LogLevel, message: &str) -> Vec<LoggerError> {
        let mut failures = Vec::new();
        for enricher in &self.enrichers {
            if let Err(e) = enricher.enrich(record, level, message) {
                failures.push(e);
            }
        }
        failures
    }
}
