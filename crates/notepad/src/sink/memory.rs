//! crates/notepad/src/sink/memory.rs

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use super::Sink;

/// Cloneable in-memory destination.
///
/// All clones share one buffer, so a test can hand one clone to a notepad
/// and inspect another afterwards.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the raw bytes written so far.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the buffer decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Returns the buffered text split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Drops everything written so far.
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let sink = MemorySink::new();
        let observer = sink.clone();
        sink.write_line(b"first\n").expect("write succeeds");
        sink.write_line(b"second\n").expect("write succeeds");

        assert_eq!(observer.lines(), ["first", "second"]);
        observer.clear();
        assert!(sink.is_empty());
    }
}
