//! In-memory sink

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared in-memory buffer of emitted lines
///
/// Clones share the same buffer, so the caller keeps one handle and gives
/// another to the logger.
///
/// ```
/// use leveled_logger::{Logger, MemorySink};
///
/// let sink = MemorySink::new();
/// let mut logger = Logger::new().unwrap();
/// logger.set_output(sink.clone());
/// logger.info("hello");
/// assert_eq!(sink.lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }

    /// Each line decoded as JSON
    pub fn records(&self) -> Result<Vec<serde_json::Value>> {
        self.buffer
            .lock()
            .lines()
            .map(|line| serde_json::from_str(line).map_err(LoggerError::from))
            .collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.buffer.lock().push_str(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
