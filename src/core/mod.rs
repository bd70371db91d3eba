//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod sink;
pub mod timestamp;

pub use call_site::CallSite;
pub use config::LoggerConfig;
pub use enrichment::{
    ContextEnricher, EnrichmentPipeline, Enricher, ErrorDetailEnricher, LevelMessageEnricher,
};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use log_record::{FieldValue, LogRecord};
pub use logger::{ErrorCallback, Logger, LoggerBuilder};
pub use sink::Sink;
pub use timestamp::{Clock, TimestampFormat};
