//! crates/notepad/src/sink/writer.rs

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use super::Sink;

/// Adapts any [`io::Write`] implementor into a [`Sink`].
///
/// The writer sits behind a mutex and each line is emitted with a single
/// `write_all` while the lock is held, so concurrent writers never split a
/// line. No buffering is added on top of what `W` already does.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to the process's standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl WriterSink<File> {
    /// Sink appending to an already opened file.
    #[must_use]
    pub const fn file(file: File) -> Self {
        Self::new(file)
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line)
    }

    fn flush(&self) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}
