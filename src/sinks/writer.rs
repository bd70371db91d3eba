//! Sinks over any `std::io::Write`

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Adapts a writer (socket, pipe, `Vec<u8>`, ...) into a [`Sink`]
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn write_line_to(writer: &mut impl Write, line: &str) -> Result<()> {
    writer
        .write_all(line.as_bytes())
        .map_err(|e| LoggerError::io_operation("writing log line", "writer rejected line", e))
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        write_line_to(&mut self.writer, line)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

/// A writer the caller keeps a handle to
///
/// The logger writes through its own clone of the `Arc`; the caller can lock
/// the same writer to read, flush or close it.
///
/// ```
/// use leveled_logger::Logger;
/// use parking_lot::Mutex;
/// use std::sync::Arc;
///
/// let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
/// let mut logger = Logger::new().unwrap();
/// logger.set_output(Arc::clone(&buffer));
///
/// logger.info("kept by the caller");
/// assert!(String::from_utf8_lossy(&buffer.lock()).contains("kept by the caller"));
/// ```
impl<W: Write + Send> Sink for Arc<Mutex<W>> {
    fn write_line(&mut self, line: &str) -> Result<()> {
        write_line_to(&mut *self.lock(), line)
    }

    fn flush(&mut self) -> Result<()> {
        self.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "shared_writer"
    }
}
