//! Logging macros for ergonomic message formatting.
//!
//! The `*f!` macros wrap the logger's `f`-suffixed methods with
//! `format_args!`, so the `where` field still points at the macro call.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::{errorf, infof};
//!
//! let sink = MemorySink::new();
//! let mut logger = Logger::new().unwrap();
//! logger.set_output(sink.clone());
//!
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//!
//! let err = std::io::Error::other("refused");
//! errorf!(logger, Some(&err), "Upstream {} unreachable", "db-1");
//!
//! assert_eq!(sink.lines().len(), 2);
//! ```

/// Log at any level with format arguments and an optional error.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::new().unwrap();
/// use leveled_logger::logf;
/// logf!(logger, LogLevel::Info, None, "Simple message");
/// logf!(logger, LogLevel::Business, None, "Order {} placed", 17);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $err:expr, $($arg:tt)+) => {
        $logger.log($level, $err, format_args!($($arg)+))
    };
}

/// Log a show-level message.
#[macro_export]
macro_rules! showf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.showf(format_args!($($arg)+))
    };
}

/// Log a fatal-level message with an optional error. Does not exit.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::new().unwrap();
/// use leveled_logger::fatalf;
/// fatalf!(logger, None, "Config {} missing", "app.toml");
/// ```
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.fatalf($err, format_args!($($arg)+))
    };
}

/// Log an error-level message with an optional error.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $err:expr, $($arg:tt)+) => {
        $logger.errorf($err, format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a business-level message.
#[macro_export]
macro_rules! busf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.busf(format_args!($($arg)+))
    };
}

/// Log a message-level message.
#[macro_export]
macro_rules! msgf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.msgf(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! dbgf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.dbgf(format_args!($($arg)+))
    };
}

/// Log a query-level message.
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let mut logger = Logger::new().unwrap();
/// # logger.set_level(LogLevel::Trace);
/// use leveled_logger::qryf;
/// qryf!(logger, "SELECT * FROM users WHERE id = {}", 42);
/// ```
#[macro_export]
macro_rules! qryf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.qryf(format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(format_args!($($arg)+))
    };
}

/// Wrap an error in a [`TracedError`](crate::TracedError), recording the
/// current module and location. An optional context message may follow.
///
/// ```
/// use leveled_logger::trace_error;
///
/// let err = trace_error!(std::io::Error::other("timeout"));
/// let err = trace_error!(err, "retry {} failed", 3);
/// assert_eq!(err.frames().len(), 2);
/// assert_eq!(err.frames()[1].context.as_deref(), Some("retry 3 failed"));
/// ```
#[macro_export]
macro_rules! trace_error {
    ($err:expr) => {
        $crate::TracedError::trace($err, module_path!())
    };
    ($err:expr, $($arg:tt)+) => {
        $crate::TracedError::trace_with($err, module_path!(), format!($($arg)+))
    };
}
