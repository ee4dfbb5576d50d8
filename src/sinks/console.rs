//! Console sink implementation

use crate::core::{Field, Formatter, Level, Result, Sink, TextFormatter};
use parking_lot::Mutex;
use std::io::Write;

#[cfg(feature = "console")]
use colored::Colorize;

/// Which standard stream the sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Stream sink writing formatted records to stdout or stderr
///
/// The write lock serializes concurrent callers so lines from different
/// threads never interleave mid-record.
pub struct ConsoleSink {
    level: Level,
    formatter: Box<dyn Formatter>,
    target: ConsoleTarget,
    #[cfg(feature = "console")]
    use_colors: bool,
    stream: Mutex<()>,
}

impl ConsoleSink {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            formatter: Box::new(TextFormatter::new()),
            target: ConsoleTarget::Stdout,
            #[cfg(feature = "console")]
            use_colors: true,
            stream: Mutex::new(()),
        }
    }

    /// A console sink targeting stderr instead of stdout
    pub fn stderr(level: Level) -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            ..Self::new(level)
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl Sink for ConsoleSink {
    fn is_enabled(&self, level: Level) -> bool {
        self.level >= level
    }

    fn record(&self, level: Level, fields: &[Field]) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let line = self.formatter.format(fields);
        #[cfg(feature = "console")]
        let line = if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line
        };

        let _guard = self.stream.lock();
        match self.target {
            ConsoleTarget::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", line)?;
                out.flush()?;
            }
            ConsoleTarget::Stderr => {
                let mut out = std::io::stderr().lock();
                writeln!(out, "{}", line)?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
