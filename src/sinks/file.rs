//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends JSON lines to a file
///
/// Output is buffered; it is flushed by [`Sink::flush`] and on drop.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.jsonl");

        {
            let mut sink = FileSink::new(&log_path)?;
            sink.write_line("{\"n\":1}\n")?;
        }
        {
            let mut sink = FileSink::new(&log_path)?;
            sink.write_line("{\"n\":2}\n")?;
            sink.flush()?;
            assert_eq!(sink.path(), log_path.as_path());
        }

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "{\"n\":1}\n{\"n\":2}\n");
        Ok(())
    }

    #[test]
    fn test_open_failure_names_path() {
        let dir = tempdir().expect("tempdir");
        let bad = dir.path().join("missing").join("app.jsonl");
        let err = FileSink::new(&bad).err().expect("parent directory does not exist");
        assert!(err.to_string().contains("opening log file"));
    }
}
