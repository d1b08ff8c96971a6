//! crates/notepad/src/tracing_bridge.rs
//! Bridge from the tracing crate into a notepad.
//!
//! [`NotepadLayer`] is a `tracing-subscriber` layer that writes each event's
//! message through the notepad handle matching the event's level, so code
//! using the standard `tracing` macros lands in the same console and log as
//! notepad output and obeys the same thresholds.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notepad::{global, init_tracing};
//!
//! init_tracing(global::default_notepad())?;
//! tracing::warn!(target: "app::net", "retrying in {}s", 5);
//! ```

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::format::CallSite;
use crate::notepad::{LevelHandle, Notepad};
use crate::threshold::Threshold;

/// Layer forwarding tracing events to notepad handles.
pub struct NotepadLayer {
    handles: [LevelHandle; Threshold::COUNT],
}

impl NotepadLayer {
    /// Creates a layer writing through `notepad`'s level handles.
    ///
    /// The handles follow later reconfiguration of `notepad`.
    #[must_use]
    pub fn new(notepad: &Notepad) -> Self {
        Self {
            handles: Threshold::ALL.map(|level| notepad.handle(level)),
        }
    }

    /// Map a tracing level to the notepad threshold it is written at.
    const fn threshold_for(level: &Level) -> Threshold {
        match *level {
            Level::ERROR => Threshold::Error,
            Level::WARN => Threshold::Warn,
            Level::INFO => Threshold::Info,
            Level::DEBUG => Threshold::Debug,
            Level::TRACE => Threshold::Trace,
        }
    }
}

impl<S> Layer<S> for NotepadLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Rebuild events describe the notepad itself; writing them back
        // through it would recurse into the settings lock.
        if metadata.target() == "notepad::routing" {
            return;
        }

        let handle = &self.handles[Self::threshold_for(metadata.level()).rank()];
        if handle.destinations().is_discarded() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let site = CallSite::new(
            metadata.file().unwrap_or(metadata.target()),
            metadata.line().unwrap_or(0),
        );
        // A subscriber has nowhere to report a failed write.
        let _ = handle.write_at(&message, site);
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a [`NotepadLayer`] for `notepad` as the global tracing
/// subscriber.
///
/// # Errors
///
/// Fails when a global subscriber has already been set.
pub fn init_tracing(notepad: &Notepad) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(NotepadLayer::new(notepad))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FormatFlags;
    use crate::sink::MemorySink;
    use std::sync::Arc;
    use tracing_subscriber::layer::SubscriberExt;

    fn notepad_with(console: &MemorySink) -> Notepad {
        Notepad::builder()
            .console(Arc::new(console.clone()))
            .console_threshold(Threshold::Info)
            .flags(FormatFlags::empty())
            .build()
    }

    #[test]
    fn test_threshold_for() {
        assert_eq!(NotepadLayer::threshold_for(&Level::ERROR), Threshold::Error);
        assert_eq!(NotepadLayer::threshold_for(&Level::WARN), Threshold::Warn);
        assert_eq!(NotepadLayer::threshold_for(&Level::INFO), Threshold::Info);
        assert_eq!(NotepadLayer::threshold_for(&Level::DEBUG), Threshold::Debug);
        assert_eq!(NotepadLayer::threshold_for(&Level::TRACE), Threshold::Trace);
    }

    #[test]
    fn events_are_written_at_their_level() {
        let console = MemorySink::new();
        let notepad = notepad_with(&console);
        let subscriber = tracing_subscriber::registry().with(NotepadLayer::new(&notepad));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("too quiet");
            tracing::info!("starting {} workers", 4);
            tracing::error!(code = 7, "failed");
        });

        assert_eq!(console.lines(), ["INFO starting 4 workers", "ERROR failed"]);
    }

    #[test]
    fn layer_follows_threshold_changes() {
        let console = MemorySink::new();
        let notepad = notepad_with(&console);
        let subscriber = tracing_subscriber::registry().with(NotepadLayer::new(&notepad));

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!("hidden");
            notepad.set_console_threshold(Threshold::Trace);
            tracing::trace!("visible");
        });

        assert_eq!(console.lines(), ["TRACE visible"]);
    }

    #[test]
    fn location_comes_from_event_metadata() {
        let console = MemorySink::new();
        let notepad = notepad_with(&console);
        notepad.set_flags(FormatFlags::SHORT_FILE);
        let subscriber = tracing_subscriber::registry().with(NotepadLayer::new(&notepad));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("here");
        });

        let line = console.contents();
        assert!(line.starts_with("WARN tracing_bridge.rs:"), "unexpected {line:?}");
        assert!(line.ends_with(": here\n"));
    }
}
