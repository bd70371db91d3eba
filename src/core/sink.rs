//! Sink trait for log output destinations

use super::error::Result;

/// Destination for serialized log lines
///
/// `line` is a complete JSON object including its trailing newline.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
