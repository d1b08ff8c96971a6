//! crates/notepad/src/sink/mod.rs
//! Destinations that accept rendered log lines.
//!
//! Every destination is shared behind an [`Arc`] so the same console or log
//! file can back several levels at once. A [`Sink`] receives one complete line
//! per call and must not interleave it with lines from other threads.

use std::io;
use std::sync::Arc;

mod discard;
mod fanout;
mod memory;
mod writer;

pub use discard::Discard;
pub use fanout::FanOut;
pub use memory::MemorySink;
pub use writer::WriterSink;

/// A destination for rendered log lines.
pub trait Sink: Send + Sync {
    /// Writes one rendered line, including any trailing newline.
    fn write_line(&self, line: &[u8]) -> io::Result<()>;

    /// Flushes buffered output, if the destination buffers.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Reference-counted handle to a destination.
pub type SharedSink = Arc<dyn Sink>;

/// Returns a shared handle to the discard destination.
#[must_use]
pub fn discard() -> SharedSink {
    Arc::new(Discard)
}

/// Returns a shared handle writing to standard output.
#[must_use]
pub fn stdout() -> SharedSink {
    Arc::new(WriterSink::stdout())
}

/// Returns a shared handle writing to standard error.
#[must_use]
pub fn stderr() -> SharedSink {
    Arc::new(WriterSink::stderr())
}

impl<S> Sink for Arc<S>
where
    S: Sink + ?Sized,
{
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
}
