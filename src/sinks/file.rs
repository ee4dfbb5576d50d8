//! File sink implementation

use crate::core::{Field, FlushPolicy, Formatter, Level, LoggerError, Result, Sink, TextFormatter};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stream sink appending one formatted line per record to a file
///
/// Construction fails loudly (the configuring layer decides whether a
/// missing sink is fatal); runtime write failures are counted on a
/// sink-local side channel and never interrupt the emitting thread or
/// sibling sinks.
pub struct FileSink {
    path: PathBuf,
    level: Level,
    formatter: Box<dyn Formatter>,
    flush_policy: FlushPolicy,
    writer: Mutex<BufWriter<File>>,
    write_errors: AtomicU64,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, level: Level) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
            level,
            formatter: Box::new(TextFormatter::new()),
            flush_policy: FlushPolicy::default(),
            write_errors: AtomicU64::new(0),
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records that failed to reach the file
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

impl Sink for FileSink {
    fn is_enabled(&self, level: Level) -> bool {
        self.level >= level
    }

    fn record(&self, level: Level, fields: &[Field]) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let line = self.formatter.format(fields);

        // format + write + optional flush under one lock: two threads'
        // records never interleave byte-by-byte in the file.
        let mut writer = self.writer.lock();
        let flush = self.flush_policy == FlushPolicy::Immediate;
        if let Err(e) = write_record(&mut writer, &line, flush) {
            self.write_errors.fetch_add(1, Ordering::Relaxed);
            return Err(LoggerError::IoError(e));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

fn write_record(writer: &mut BufWriter<File>, line: &str, flush: bool) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    if flush {
        writer.flush()?;
    }
    Ok(())
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the disk
        let _ = self.flush();
    }
}
