//! Main logger implementation

use super::{
    call_site::CallSite,
    enrichment::{EnrichmentPipeline, ErrorDetailEnricher},
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    sink::Sink,
    timestamp::{Clock, TimestampFormat},
};
use crate::error_detail::{new_formatter, ErrorFormatter, FormatterParams};
use crate::sinks::StdoutSink;
use chrono::{DateTime, FixedOffset};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Callback for failures that happen while emitting a line
///
/// Leveled calls never return errors; formatting and write failures are
/// reported here instead. The default prints to stderr.
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

fn default_error_callback() -> ErrorCallback {
    Arc::new(|err| eprintln!("[LOGGER ERROR] {}", err))
}

/// Message text of a call: used verbatim, or rendered from format arguments
#[derive(Clone, Copy)]
enum Message<'a> {
    Literal(&'a str),
    Formatted(fmt::Arguments<'a>),
}

impl<'a> Message<'a> {
    fn render(self) -> Cow<'a, str> {
        match self {
            Message::Literal(text) => Cow::Borrowed(text),
            Message::Formatted(args) => match args.as_str() {
                Some(text) => Cow::Borrowed(text),
                None => Cow::Owned(fmt::format(args)),
            },
        }
    }
}

/// Leveled JSON logger
///
/// Every allowed call writes one line:
/// `{"time":..,"ref":..,"level":..,"message":..,"where":..,"details":..}`
/// where `ref` appears only on loggers derived with [`with_ref_id`](Self::with_ref_id)
/// and `details` only when an error was attached.
///
/// Threshold, clock, output and formatter settings belong to each instance.
/// A logger derived with `with_ref_id` starts with a copy of them and shares
/// the current output sink.
#[derive(Clone)]
pub struct Logger {
    level: LogLevel,
    ref_id: Option<String>,
    clock: Clock,
    timestamp_format: TimestampFormat,
    output: SharedSink,
    formatter: Arc<dyn ErrorFormatter>,
    formatter_params: FormatterParams,
    on_error: ErrorCallback,
}

impl Logger {
    /// Logger at `Info`, writing to stdout with the wall clock and the JSON
    /// error formatter
    pub fn new() -> Result<Self> {
        LoggerBuilder::new().build()
    }

    /// Change the threshold by name. On error the previous threshold is kept.
    pub fn set_log_level(&mut self, name: &str) -> Result<()> {
        self.level = name.parse()?;
        Ok(())
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Redirect subsequent lines to `sink`
    pub fn set_output<S: Sink + 'static>(&mut self, sink: S) {
        self.output = Arc::new(Mutex::new(Box::new(sink)));
    }

    /// Replace the source of the `time` field
    pub fn set_timestamp_func<F>(&mut self, f: F)
    where
        F: Fn() -> DateTime<FixedOffset> + Send + Sync + 'static,
    {
        self.clock = Clock::new(f);
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    /// A sibling logger whose lines carry `ref`
    ///
    /// The parent logger is unaffected.
    #[must_use]
    pub fn with_ref_id(&self, ref_id: impl Into<String>) -> Logger {
        let mut derived = self.clone();
        derived.ref_id = Some(ref_id.into());
        derived
    }

    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }

    pub fn formatter_params(&self) -> &FormatterParams {
        &self.formatter_params
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.level.is_allowed(level)
    }

    pub fn flush(&self) -> Result<()> {
        self.output.lock().flush()
    }

    /// Log at an arbitrary level with format arguments
    #[track_caller]
    pub fn log(&self, level: LogLevel, err: Option<&(dyn Error + 'static)>, args: fmt::Arguments<'_>) {
        self.dispatch(level, err, Message::Formatted(args), CallSite::caller());
    }

    fn dispatch(
        &self,
        level: LogLevel,
        err: Option<&(dyn Error + 'static)>,
        message: Message<'_>,
        site: CallSite,
    ) {
        if !self.level.is_allowed(level) {
            return;
        }

        let message = message.render();
        let mut record = LogRecord::new();
        record.push("time", self.timestamp_format.to_field(&self.clock.now()));

        let location = site.render(&self.formatter_params);
        let error_detail = err.map(|e| {
            ErrorDetailEnricher::new(e, self.formatter.as_ref(), &self.formatter_params)
                .with_origin(location.as_str())
        });
        let pipeline =
            EnrichmentPipeline::standard(self.ref_id.as_deref(), location.clone(), error_detail);
        for failure in pipeline.apply(&mut record, level, &message) {
            (self.on_error)(&failure);
        }

        let written = record
            .to_json_line()
            .and_then(|line| self.output.lock().write_line(&line));
        if let Err(e) = written {
            (self.on_error)(&e);
        }
    }

    #[track_caller]
    pub fn show(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Show, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn showf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Show, None, Message::Formatted(args), CallSite::caller());
    }

    /// `Fatal` is a severity only; the process keeps running.
    #[track_caller]
    pub fn fatal(&self, err: Option<&(dyn Error + 'static)>, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Fatal, err, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn fatalf(&self, err: Option<&(dyn Error + 'static)>, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Fatal, err, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn error(&self, err: Option<&(dyn Error + 'static)>, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Error, err, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn errorf(&self, err: Option<&(dyn Error + 'static)>, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Error, err, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn warn(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Warning, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Warning, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn info(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Info, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Info, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn bus(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Business, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn busf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Business, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn msg(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Message, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn msgf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Message, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn dbg(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Debug, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn dbgf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Debug, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn qry(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Query, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn qryf(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Query, None, Message::Formatted(args), CallSite::caller());
    }

    #[track_caller]
    pub fn trace(&self, msg: impl AsRef<str>) {
        self.dispatch(LogLevel::Trace, None, Message::Literal(msg.as_ref()), CallSite::caller());
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.dispatch(LogLevel::Trace, None, Message::Formatted(args), CallSite::caller());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("ref_id", &self.ref_id)
            .field("timestamp_format", &self.timestamp_format)
            .field("output", &self.output.lock().name())
            .field("formatter", &self.formatter.name())
            .field("formatter_params", &self.formatter_params)
            .finish()
    }
}

/// Builder for creating a Logger with custom configuration
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .output(MemorySink::new())
///     .error_format("json")
///     .build()
///     .unwrap();
/// assert!(logger.is_enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    level_name: Option<String>,
    ref_id: Option<String>,
    output: Option<Box<dyn Sink>>,
    clock: Clock,
    timestamp_format: TimestampFormat,
    error_format: String,
    formatter: Option<Arc<dyn ErrorFormatter>>,
    formatter_params: FormatterParams,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            level_name: None,
            ref_id: None,
            output: None,
            clock: Clock::system(),
            timestamp_format: TimestampFormat::default(),
            error_format: "json".to_string(),
            formatter: None,
            formatter_params: FormatterParams::default(),
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.level_name = None;
        self
    }

    /// Threshold by name, validated in [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn level_name(mut self, name: impl Into<String>) -> Self {
        self.level_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    /// Defaults to stdout
    #[must_use = "builder methods return a new value"]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.output = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Stock error formatter by name (`json`)
    #[must_use = "builder methods return a new value"]
    pub fn error_format(mut self, name: impl Into<String>) -> Self {
        self.error_format = name.into();
        self
    }

    /// Use a custom error formatter instead of a stock one
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn ErrorFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter_params(mut self, params: FormatterParams) -> Self {
        self.formatter_params = params;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the Logger
    ///
    /// Fails on an unknown level name or error format.
    pub fn build(self) -> Result<Logger> {
        let level = match self.level_name {
            Some(name) => name.parse()?,
            None => self.level,
        };
        let formatter = match self.formatter {
            Some(formatter) => formatter,
            None => new_formatter(&self.error_format)?,
        };
        let output: Box<dyn Sink> = self.output.unwrap_or_else(|| Box::new(StdoutSink::new()));

        Ok(Logger {
            level,
            ref_id: self.ref_id,
            clock: self.clock,
            timestamp_format: self.timestamp_format,
            output: Arc::new(Mutex::new(output)),
            formatter,
            formatter_params: self.formatter_params,
            on_error: self.on_error.unwrap_or_else(default_error_callback),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_detail::{PathHidingMethod, TracedError};
    use crate::sinks::MemorySink;
    use chrono::TimeZone;
    use std::io;

    fn fixed_time() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2021, 5, 21, 6, 0, 0)
            .single()
            .expect("valid datetime")
    }

    fn test_logger(sink: &MemorySink) -> Logger {
        Logger::builder()
            .output(sink.clone())
            .clock(Clock::fixed(fixed_time()))
            .formatter_params(
                FormatterParams::default().with_path_hiding(PathHidingMethod::FileNameOnly, ""),
            )
            .build()
            .expect("default formatter")
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build().unwrap();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.ref_id(), None);
        assert_eq!(logger.output.lock().name(), "stdout");
        assert_eq!(logger.formatter.name(), "json");
    }

    #[test]
    fn test_builder_rejects_bad_level_name() {
        let err = Logger::builder().level_name("loud").build().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    }

    #[test]
    fn test_builder_rejects_unknown_formatter() {
        let err = Logger::builder().error_format("xml").build().unwrap_err();
        assert!(matches!(err, LoggerError::FormatterConstruction { .. }));

        let err = Logger::builder().error_format("raw").build().unwrap_err();
        assert!(matches!(err, LoggerError::FormatterConstruction { .. }));
    }

    #[test]
    fn test_exact_line() {
        let sink = MemorySink::new();
        let logger = test_logger(&sink);

        let line = line!() + 1;
        logger.info("Log this!");

        assert_eq!(
            sink.contents(),
            format!(
                "{{\"time\":\"2021-05-21T06:00:00-03:00\",\"level\":\"INFO\",\"message\":\"Log this!\",\"where\":\"logger.rs:{}\"}}\n",
                line
            )
        );
    }

    #[test]
    fn test_set_log_level_keeps_previous_on_error() {
        let sink = MemorySink::new();
        let mut logger = test_logger(&sink);

        logger.set_log_level("DEBUG").unwrap();
        assert!(logger.set_log_level("unknown").is_err());
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn test_formatted_without_arguments_is_verbatim() {
        let sink = MemorySink::new();
        let logger = test_logger(&sink);

        logger.infof(format_args!("100% done"));
        logger.infof(format_args!("{}% done", 50));
        logger.info("{} braces stay");

        let records = sink.records().unwrap();
        assert_eq!(records[0]["message"], "100% done");
        assert_eq!(records[1]["message"], "50% done");
        assert_eq!(records[2]["message"], "{} braces stay");
    }

    #[test]
    fn test_with_ref_id_leaves_parent_untouched() {
        let sink = MemorySink::new();
        let logger = test_logger(&sink);

        let scoped = logger.with_ref_id("req-42");
        scoped.info("scoped");
        logger.info("plain");

        let records = sink.records().unwrap();
        assert_eq!(records[0]["ref"], "req-42");
        assert!(records[1].get("ref").is_none());
        assert_eq!(logger.ref_id(), None);
    }

    #[test]
    fn test_derived_logger_has_own_threshold_and_output() {
        let sink = MemorySink::new();
        let mut logger = test_logger(&sink);
        let scoped = logger.with_ref_id("r");

        logger.set_level(LogLevel::Disabled);
        logger.set_output(MemorySink::new());
        scoped.info("still written");

        assert_eq!(sink.lines().len(), 1);
        assert_eq!(scoped.level(), LogLevel::Info);
    }

    #[test]
    fn test_error_details_attached() {
        let sink = MemorySink::new();
        let logger = test_logger(&sink);
        let err = TracedError::trace(io::Error::other("foo"), "tests::bar");

        logger.error(Some(&err), "This is an error log!");
        logger.error(None, "no error");

        let records = sink.records().unwrap();
        assert_eq!(records[0]["details"]["error"], "foo");
        assert_eq!(records[0]["details"]["stack_trace"][0]["func"], "tests::bar");
        assert!(records[1].get("details").is_none());
    }

    #[test]
    fn test_formatting_failure_keeps_line() {
        let sink = MemorySink::new();
        let failures = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&failures);
        let logger = Logger::builder()
            .output(sink.clone())
            .formatter(Arc::new(crate::error_detail::RawErrorFormatter))
            .on_error(Arc::new(move |e: &LoggerError| captured.lock().push(e.to_string())))
            .build()
            .unwrap();

        let err = io::Error::other("boom");
        logger.fatal(Some(&err), "fatal with raw details");

        let records = sink.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["message"], "fatal with raw details");
        assert!(records[0].get("details").is_none());
        assert_eq!(failures.lock().len(), 1);
        assert!(failures.lock()[0].contains("raw"));
    }

    #[test]
    fn test_disabled_level_call_never_emits() {
        let sink = MemorySink::new();
        let mut logger = test_logger(&sink);
        logger.set_level(LogLevel::Trace);

        logger.log(LogLevel::Disabled, None, format_args!("hidden"));
        logger.log(LogLevel::Query, None, format_args!("shown"));

        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn test_numeric_timestamp() {
        let sink = MemorySink::new();
        let mut logger = test_logger(&sink);
        logger.set_timestamp_format(TimestampFormat::Unix);
        logger.show("numeric");

        let records = sink.records().unwrap();
        assert_eq!(records[0]["time"], 1_621_587_600_i64);
    }

    #[test]
    fn test_logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
