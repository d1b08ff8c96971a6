//! crates/notepad/src/notepad/feedback.rs
//! Threshold-independent channel for operator-facing messages.

use std::fmt::{self, Write as _};
use std::io;
use std::panic::Location;

use super::handle::LevelHandle;

/// Writes plainly to the console while mirroring the text into the log.
///
/// Feedback ignores both thresholds. The console copy carries no label and
/// no annotations; the log copy goes through the `LOG` handle and therefore
/// gets the `LOG:` prefix and the notepad's format flags.
#[derive(Clone, Debug)]
pub struct Feedback {
    out: LevelHandle,
    log: LevelHandle,
}

impl Feedback {
    pub(crate) const fn new(out: LevelHandle, log: LevelHandle) -> Self {
        Self { out, log }
    }

    /// Feedback counterpart of [`LevelHandle::print`].
    #[track_caller]
    pub fn print(&self, parts: &[&dyn fmt::Display]) -> io::Result<()> {
        let mut message = String::new();
        for part in parts {
            let _ = write!(message, "{part}");
        }
        self.output(&message, Location::caller())
    }

    /// Feedback counterpart of [`LevelHandle::println`].
    #[track_caller]
    pub fn println(&self, parts: &[&dyn fmt::Display]) -> io::Result<()> {
        let mut message = String::new();
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                message.push(' ');
            }
            let _ = write!(message, "{part}");
        }
        message.push('\n');
        self.output(&message, Location::caller())
    }

    /// Feedback counterpart of [`LevelHandle::printf`].
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.output(&args.to_string(), Location::caller())
    }

    /// Writes to the console first, then to the log.
    ///
    /// The log copy is attempted even when the console write fails; the
    /// console error takes precedence.
    pub fn output(&self, message: &str, location: &Location<'_>) -> io::Result<()> {
        let out = self.out.write_message(message, location);
        let log = self.log.write_message(message, location);
        out.and(log)
    }
}
