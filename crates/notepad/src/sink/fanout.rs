//! crates/notepad/src/sink/fanout.rs
//! Duplicates each line to several sinks.

use std::fmt;
use std::io;

use super::{SharedSink, Sink};

/// Duplicates every line to each member, in insertion order.
///
/// A failing member does not stop the line from reaching the members after
/// it. Once every member has been tried, the first error seen is returned.
pub struct FanOut {
    members: Vec<SharedSink>,
}

impl FanOut {
    /// Builds a fan-out over `members`.
    #[must_use]
    pub fn new(members: Vec<SharedSink>) -> Self {
        Self { members }
    }

    /// Number of member destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Reports whether the fan-out has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Sink for FanOut {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut first_error = None;
        for member in &self.members {
            if let Err(error) = member.write_line(line) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn flush(&self) -> io::Result<()> {
        let mut first_error = None;
        for member in &self.members {
            if let Err(error) = member.flush() {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for FanOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOut")
            .field("members", &self.members.len())
            .finish()
    }
}
