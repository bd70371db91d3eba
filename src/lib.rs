//! # Leveled Logger
//!
//! A structured-logging facade with eleven ordered severities. Each allowed
//! call writes exactly one JSON object per line, with fields in a fixed order:
//!
//! ```text
//! {"time":"2021-05-21T06:00:00-03:00","ref":"ad7e..","level":"ERROR","message":"..","where":"src/db.rs:12","details":{..}}
//! ```
//!
//! ## Features
//!
//! - **Severity filtering**: `Disabled < Show < Fatal < Error < Warning < Info <
//!   Business < Message < Debug < Query < Trace`
//! - **Call sites**: `where` points at the caller, captured with `#[track_caller]`
//! - **Correlation**: [`Logger::with_ref_id`] derives a logger that tags every line
//! - **Error detail**: [`TracedError`] stacks rendered under `details`

pub mod core;
pub mod error_detail;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallSite, Clock, ErrorCallback, FieldValue, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, Result, Sink, TimestampFormat,
    };
    pub use crate::error_detail::{FormatterParams, PathHidingMethod, TracedError};
    pub use crate::sinks::{FileSink, MemorySink, StdoutSink, WriterSink};
}

pub use crate::core::{
    CallSite, Clock, ContextEnricher, EnrichmentPipeline, Enricher, ErrorCallback,
    ErrorDetailEnricher, FieldValue, LevelMessageEnricher, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, Result, Sink, TimestampFormat,
};
pub use error_detail::{
    new_formatter, ErrorFormat, ErrorFormatter, FormatterParams, JsonErrorFormatter,
    PathHidingMethod, RawErrorFormatter, StackFrame, TracedError,
};
pub use sinks::{FileSink, MemorySink, StdoutSink, WriterSink};
