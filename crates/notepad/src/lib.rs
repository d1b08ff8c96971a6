#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `notepad` is a leveled logger with two destinations: a console for the
//! operator and a persistent log. Each destination has its own minimum
//! severity, so a program can keep the terminal quiet while recording every
//! detail to a file, or the other way round.
//!
//! Seven severities exist, from [`Threshold::Trace`] to [`Threshold::Fatal`].
//! Every severity has a [`LevelHandle`]; writing through a handle sends the
//! line to whichever destinations admit that severity, and to nothing at all
//! when none do.
//!
//! # Design
//!
//! A [`Notepad`] keeps its settings behind a mutex and derives from them an
//! immutable routing table: one resolved [`Sink`] plus line format per
//! severity. Every setter recomputes the whole table and publishes it in one
//! step. Handles hold a pointer to the published table instead of a copy of a
//! route, so a handle obtained once keeps following the configuration.
//!
//! Two further handles bypass thresholds. [`Notepad::log`] writes to the
//! persistent log with a `LOG:` prefix. [`Notepad::feedback`] writes plainly
//! to the console and mirrors the text into the log.
//!
//! [`SinkProvider`] listeners may attach an extra sink to any severity, even
//! one neither destination admits. [`LevelCounter`] is a ready-made listener
//! that tallies lines.
//!
//! # Invariants
//!
//! - If a destination receives severity `L`, it receives every severity above
//!   `L` as well.
//! - Changing one destination's cutoff never alters what the other receives.
//! - A severity with no destination and no listener costs no formatting and
//!   no I/O.
//!
//! # Errors
//!
//! Writes return the destination's [`std::io::Error`] unchanged. When a line
//! goes to several destinations, all of them are attempted and the first
//! error is returned.
//!
//! # Examples
//!
//! ```
//! use notepad::{FormatFlags, MemorySink, Notepad, Threshold};
//! use std::sync::Arc;
//!
//! let console = MemorySink::new();
//! let notepad = Notepad::builder()
//!     .console(Arc::new(console.clone()))
//!     .console_threshold(Threshold::Trace)
//!     .prefix("app")
//!     .flags(FormatFlags::empty())
//!     .build();
//!
//! notepad.info().println(&[&"start"])?;
//! assert_eq!(console.contents(), "[app] INFO start\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - [`global`] for the process-wide instance and the level macros.
//! - `NotepadLayer` (feature `tracing`) for routing `tracing` events.

mod config;
mod flags;
mod format;
pub mod global;
mod line_mode;
mod listener;
mod macros;
mod notepad;
pub mod sink;
mod threshold;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::NotepadConfig;
pub use flags::{FormatFlags, ParseFlagsError};
pub use format::{CallSite, LineFormat};
pub use line_mode::LineMode;
pub use listener::{LevelCounter, Listener, SinkProvider};
pub use notepad::{Destinations, Feedback, LevelHandle, Notepad, NotepadBuilder};
pub use sink::{Discard, FanOut, MemorySink, SharedSink, Sink, WriterSink};
pub use threshold::{Cutoff, ParseThresholdError, Threshold};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{NotepadLayer, init_tracing};
