//! Errors that carry the trail of places they were propagated through

use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::panic::Location;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// One hop of a traced error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    pub func: String,
    pub caller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// An error plus the frames recorded by each [`TracedError::trace`] call
///
/// Frames are stored oldest first: the first frame is where the error was
/// first traced.
///
/// # Example
///
/// ```
/// use leveled_logger::{trace_error, TracedError};
///
/// fn read() -> Result<(), TracedError> {
///     Err(trace_error!(std::io::Error::other("disk gone")))
/// }
///
/// let err = read().unwrap_err();
/// assert_eq!(err.to_string(), "disk gone");
/// assert_eq!(err.frames().len(), 1);
/// ```
#[derive(Debug)]
pub struct TracedError {
    source: BoxError,
    frames: Vec<StackFrame>,
}

impl TracedError {
    /// Record the caller's location against `err`
    ///
    /// Tracing an error that is already a `TracedError` appends a frame
    /// instead of nesting.
    #[track_caller]
    pub fn trace<E: Into<BoxError>>(err: E, func: &str) -> Self {
        Self::push_frame(err.into(), func, None, Location::caller())
    }

    /// Like [`trace`](Self::trace), with a context message on the frame
    #[track_caller]
    pub fn trace_with<E: Into<BoxError>>(err: E, func: &str, context: impl Into<String>) -> Self {
        Self::push_frame(err.into(), func, Some(context.into()), Location::caller())
    }

    fn push_frame(
        err: BoxError,
        func: &str,
        context: Option<String>,
        location: &'static Location<'static>,
    ) -> Self {
        let mut traced = match err.downcast::<TracedError>() {
            Ok(traced) => *traced,
            Err(source) => TracedError {
                source,
                frames: Vec::new(),
            },
        };
        traced.frames.push(StackFrame {
            func: func.to_string(),
            caller: format!("{}:{}", location.file(), location.line()),
            context,
        });
        traced
    }

    /// Recorded frames, oldest first
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// The wrapped error
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.source()
    }
}

/// Find the first `TracedError` in `err`'s chain
pub fn find_traced<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a TracedError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(traced) = e.downcast_ref::<TracedError>() {
            return Some(traced);
        }
        current = e.source();
    }
    None
}
