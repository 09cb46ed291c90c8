//! Console appender implementation

use crate::core::{Appender, LineFormatter, LogEntry, Result};
use std::io::{self, Write};

enum Target {
    Stdout,
    Discard,
    Writer(Box<dyn Write + Send + Sync>),
}

/// The engine's primary output: stdout, a caller-supplied stream, or nothing.
pub struct ConsoleAppender {
    formatter: LineFormatter,
    target: Target,
}

impl ConsoleAppender {
    pub fn stdout(formatter: LineFormatter) -> Self {
        Self {
            formatter,
            target: Target::Stdout,
        }
    }

    /// Output that accepts and drops every entry, installed when console
    /// printing is disabled
    pub fn discard() -> Self {
        Self {
            formatter: LineFormatter::new(Default::default()),
            target: Target::Discard,
        }
    }

    /// Render to an arbitrary stream instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use reloadable_logger::appenders::ConsoleAppender;
    /// use reloadable_logger::{FormatterOptions, LineFormatter};
    ///
    /// let appender = ConsoleAppender::with_writer(
    ///     LineFormatter::new(FormatterOptions::default()),
    ///     std::io::stderr(),
    /// );
    /// ```
    pub fn with_writer<W: Write + Send + Sync + 'static>(formatter: LineFormatter, writer: W) -> Self {
        Self {
            formatter,
            target: Target::Writer(Box::new(writer)),
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self.target, Target::Discard)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout(LineFormatter::new(Default::default()))
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        match &mut self.target {
            Target::Discard => {}
            Target::Stdout => {
                let line = self.formatter.format(entry);
                io::stdout().lock().write_all(line.as_bytes())?;
            }
            Target::Writer(writer) => {
                let line = self.formatter.format(entry);
                writer.write_all(line.as_bytes())?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &mut self.target {
            Target::Discard => {}
            Target::Stdout => io::stdout().flush()?,
            Target::Writer(writer) => writer.flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            Target::Discard => "discard",
            _ => "console",
        }
    }

    fn formatter(&self) -> Option<&LineFormatter> {
        match self.target {
            Target::Discard => None,
            _ => Some(&self.formatter),
        }
    }
}
