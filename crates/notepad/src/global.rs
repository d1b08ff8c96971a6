//! crates/notepad/src/global.rs
//! Process-wide default notepad.
//!
//! The instance is created on first use with [`NotepadConfig::default`],
//! writing the console to standard output and discarding the log. Handles
//! obtained here resolve through the instance's routing table, so handles
//! taken before a reconfiguration pick up the new destinations.
//!
//! # Examples
//!
//! ```
//! use notepad::{global, Cutoff, Threshold};
//!
//! global::set_stdout_threshold(Threshold::Warn);
//! assert_eq!(global::stdout_threshold(), Cutoff::At(Threshold::Warn));
//! ```

use std::sync::OnceLock;

use crate::config::NotepadConfig;
use crate::flags::FormatFlags;
use crate::notepad::{Feedback, LevelHandle, Notepad};
use crate::sink::{self, SharedSink};
use crate::threshold::Cutoff;

static DEFAULT: OnceLock<Notepad> = OnceLock::new();

/// Returns the process-wide notepad, creating it on first call.
pub fn default_notepad() -> &'static Notepad {
    DEFAULT.get_or_init(|| {
        Notepad::from_config(
            &NotepadConfig::default(),
            sink::stdout(),
            sink::discard(),
            Vec::new(),
        )
    })
}

/// Sets the console cutoff of the default notepad.
pub fn set_stdout_threshold(threshold: impl Into<Cutoff>) {
    default_notepad().set_console_threshold(threshold);
}

/// Sets the log cutoff of the default notepad.
pub fn set_log_threshold(threshold: impl Into<Cutoff>) {
    default_notepad().set_log_threshold(threshold);
}

/// Sends the default notepad's log to `log`.
pub fn set_log_output(log: SharedSink) {
    default_notepad().set_log_output(log);
}

/// Sends the default notepad's console output to `console`.
pub fn set_stdout_output(console: SharedSink) {
    default_notepad().set_console_output(console);
}

/// Sets the line prefix of the default notepad.
pub fn set_prefix(prefix: &str) {
    default_notepad().set_prefix(prefix);
}

/// Sets the annotation flags of the default notepad.
pub fn set_flags(flags: FormatFlags) {
    default_notepad().set_flags(flags);
}

/// Turns on colored labels for the default notepad.
pub fn use_color() {
    default_notepad().use_color();
}

/// Console cutoff of the default notepad.
#[must_use]
pub fn stdout_threshold() -> Cutoff {
    default_notepad().console_threshold()
}

/// Log cutoff of the default notepad.
#[must_use]
pub fn log_threshold() -> Cutoff {
    default_notepad().log_threshold()
}

/// `TRACE` handle of the default notepad.
#[must_use]
pub fn trace() -> LevelHandle {
    default_notepad().trace()
}

/// `DEBUG` handle of the default notepad.
#[must_use]
pub fn debug() -> LevelHandle {
    default_notepad().debug()
}

/// `INFO` handle of the default notepad.
#[must_use]
pub fn info() -> LevelHandle {
    default_notepad().info()
}

/// `WARN` handle of the default notepad.
#[must_use]
pub fn warn() -> LevelHandle {
    default_notepad().warn()
}

/// `ERROR` handle of the default notepad.
#[must_use]
pub fn error() -> LevelHandle {
    default_notepad().error()
}

/// `CRITICAL` handle of the default notepad.
#[must_use]
pub fn critical() -> LevelHandle {
    default_notepad().critical()
}

/// `FATAL` handle of the default notepad.
#[must_use]
pub fn fatal() -> LevelHandle {
    default_notepad().fatal()
}

/// `LOG` handle of the default notepad.
#[must_use]
pub fn log() -> LevelHandle {
    default_notepad().log()
}

/// Feedback handle of the default notepad.
#[must_use]
pub fn feedback() -> Feedback {
    default_notepad().feedback()
}
