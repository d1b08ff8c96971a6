//! crates/notepad/src/sink/discard.rs
//! Sink that drops everything.

use std::io;

use super::Sink;

/// Destination that accepts every line and keeps none of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl Sink for Discard {
    #[inline]
    fn write_line(&self, _line: &[u8]) -> io::Result<()> {
        Ok(())
    }
}
