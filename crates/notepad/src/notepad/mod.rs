//! crates/notepad/src/notepad/mod.rs
//! The notepad: two thresholds, two destinations, seven level handles.
//!
//! # Routing
//!
//! For every level `L`, in ascending order:
//!
//! 1. the console receives `L` when the console cutoff admits it;
//! 2. the log receives `L` when the log cutoff admits it;
//! 3. each listener may add one more sink for `L`, regardless of 1 and 2;
//! 4. no member at all resolves to the discard sink, several members to a
//!    [`FanOut`](crate::sink::FanOut) in the order above.
//!
//! Every setter rebuilds all seven routes and publishes the new table in one
//! step, so no route can be left stale.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::NotepadConfig;
use crate::flags::FormatFlags;
use crate::line_mode::LineMode;
use crate::listener::Listener;
use crate::sink::{self, SharedSink};
use crate::threshold::{Cutoff, Threshold};

mod feedback;
mod handle;
mod routing;

pub use feedback::Feedback;
pub use handle::LevelHandle;
pub use routing::Destinations;

use routing::{RouteKey, RoutingTable};

/// Pointer to the most recently published routing table.
pub(crate) type TableCell = Arc<RwLock<Arc<RoutingTable>>>;

pub(crate) fn snapshot(table: &TableCell) -> Arc<RoutingTable> {
    Arc::clone(&table.read().unwrap_or_else(PoisonError::into_inner))
}

/// Mutable configuration a routing table is computed from.
#[derive(Clone)]
pub(crate) struct Settings {
    pub(crate) console_cutoff: Cutoff,
    pub(crate) log_cutoff: Cutoff,
    pub(crate) console: SharedSink,
    pub(crate) log: SharedSink,
    /// Already normalized to `"[prefix] "` or empty.
    pub(crate) prefix: String,
    pub(crate) flags: FormatFlags,
    pub(crate) colored: bool,
    pub(crate) line_mode: LineMode,
}

fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!("[{prefix}] ")
    }
}

/// Leveled logger writing to a console and a persistent log.
///
/// # Examples
///
/// ```
/// use notepad::{FormatFlags, MemorySink, Notepad, Threshold};
/// use std::sync::Arc;
///
/// let console = MemorySink::new();
/// let log = MemorySink::new();
/// let notepad = Notepad::builder()
///     .console_threshold(Threshold::Info)
///     .log_threshold(Threshold::Warn)
///     .console(Arc::new(console.clone()))
///     .log(Arc::new(log.clone()))
///     .flags(FormatFlags::empty())
///     .build();
///
/// notepad.info().println(&[&"hello"])?;
/// notepad.warn().printf(format_args!("{} left", 3))?;
///
/// assert_eq!(console.contents(), "INFO hello\nWARN 3 left\n");
/// assert_eq!(log.contents(), "WARN 3 left\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Notepad {
    settings: Mutex<Settings>,
    listeners: Vec<Listener>,
    table: TableCell,
}

impl Notepad {
    /// Creates a notepad and computes every level's route.
    ///
    /// A destination that should stay silent is passed as
    /// [`sink::discard()`], never omitted. A non-empty `prefix` is rendered
    /// as `[prefix] ` in front of every line.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        console_threshold: impl Into<Cutoff>,
        log_threshold: impl Into<Cutoff>,
        console: SharedSink,
        log: SharedSink,
        prefix: &str,
        flags: FormatFlags,
        colored: bool,
        listeners: Vec<Listener>,
    ) -> Self {
        let settings = Settings {
            console_cutoff: console_threshold.into(),
            log_cutoff: log_threshold.into(),
            console,
            log,
            prefix: normalize_prefix(prefix),
            flags,
            colored,
            line_mode: LineMode::WithNewline,
        };
        Self::from_settings(settings, listeners)
    }

    /// Starts a builder preloaded with the process-wide defaults: console at
    /// `Info` on standard output, log at `Trace` discarded, date and time on.
    #[must_use]
    pub fn builder() -> NotepadBuilder {
        NotepadBuilder::default()
    }

    /// Creates a notepad from a [`NotepadConfig`] and the two destinations.
    #[must_use]
    pub fn from_config(
        config: &NotepadConfig,
        console: SharedSink,
        log: SharedSink,
        listeners: Vec<Listener>,
    ) -> Self {
        let settings = Settings {
            console_cutoff: config.console_threshold,
            log_cutoff: config.log_threshold,
            console,
            log,
            prefix: normalize_prefix(&config.prefix),
            flags: config.flags,
            colored: config.color,
            line_mode: config.line_mode,
        };
        Self::from_settings(settings, listeners)
    }

    fn from_settings(settings: Settings, listeners: Vec<Listener>) -> Self {
        let table = RoutingTable::build(&settings, &listeners);
        Self {
            settings: Mutex::new(settings),
            listeners,
            table: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Applies `change` and republishes the routing table.
    fn update(&self, change: impl FnOnce(&mut Settings)) {
        let mut settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut settings);
        let table = Arc::new(RoutingTable::build(&settings, &self.listeners));
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = table;

        #[cfg(feature = "tracing")]
        let (console, log) = (settings.console_cutoff, settings.log_cutoff);
        drop(settings);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "notepad::routing",
            %console,
            %log,
            "routing table rebuilt"
        );
    }

    fn read_settings<T>(&self, read: impl FnOnce(&Settings) -> T) -> T {
        read(&self.settings.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Changes the minimum severity written to the console.
    pub fn set_console_threshold(&self, threshold: impl Into<Cutoff>) {
        let threshold = threshold.into();
        self.update(|s| s.console_cutoff = threshold);
    }

    /// Returns the console cutoff.
    #[must_use]
    pub fn console_threshold(&self) -> Cutoff {
        self.read_settings(|s| s.console_cutoff)
    }

    /// Changes the minimum severity written to the persistent log.
    pub fn set_log_threshold(&self, threshold: impl Into<Cutoff>) {
        let threshold = threshold.into();
        self.update(|s| s.log_cutoff = threshold);
    }

    /// Returns the persistent log cutoff.
    #[must_use]
    pub fn log_threshold(&self) -> Cutoff {
        self.read_settings(|s| s.log_cutoff)
    }

    /// Replaces the persistent log destination.
    pub fn set_log_output(&self, log: SharedSink) {
        self.update(|s| s.log = log);
    }

    /// Replaces the console destination.
    pub fn set_console_output(&self, console: SharedSink) {
        self.update(|s| s.console = console);
    }

    /// Changes the prefix shown in brackets at the start of every line.
    ///
    /// An empty prefix is not displayed at all.
    pub fn set_prefix(&self, prefix: &str) {
        let prefix = normalize_prefix(prefix);
        self.update(|s| s.prefix = prefix);
    }

    /// Returns the rendered prefix, e.g. `"[app] "`.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.read_settings(|s| s.prefix.clone())
    }

    /// Chooses which annotations follow the prefix and level label.
    pub fn set_flags(&self, flags: FormatFlags) {
        self.update(|s| s.flags = flags);
    }

    /// Returns the annotation flags.
    #[must_use]
    pub fn flags(&self) -> FormatFlags {
        self.read_settings(|s| s.flags)
    }

    /// Switches level labels to their colored form.
    pub fn use_color(&self) {
        self.set_color(true);
    }

    /// Enables or disables colored level labels.
    pub fn set_color(&self, colored: bool) {
        self.update(|s| s.colored = colored);
    }

    /// Reports whether level labels are colored.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.read_settings(|s| s.colored)
    }

    /// Changes whether unterminated messages get a trailing newline.
    pub fn set_line_mode(&self, line_mode: LineMode) {
        self.update(|s| s.line_mode = line_mode);
    }

    /// Returns the line mode.
    #[must_use]
    pub fn line_mode(&self) -> LineMode {
        self.read_settings(|s| s.line_mode)
    }

    /// Reports where lines written at `level` currently go.
    #[must_use]
    pub fn destinations(&self, level: Threshold) -> Destinations {
        snapshot(&self.table)
            .route(RouteKey::Level(level))
            .destinations
    }

    /// Returns the handle for `level`.
    #[must_use]
    pub fn handle(&self, level: Threshold) -> LevelHandle {
        LevelHandle::new(Arc::clone(&self.table), RouteKey::Level(level))
    }

    /// Handle for [`Threshold::Trace`].
    #[must_use]
    pub fn trace(&self) -> LevelHandle {
        self.handle(Threshold::Trace)
    }

    /// Handle for [`Threshold::Debug`].
    #[must_use]
    pub fn debug(&self) -> LevelHandle {
        self.handle(Threshold::Debug)
    }

    /// Handle for [`Threshold::Info`].
    #[must_use]
    pub fn info(&self) -> LevelHandle {
        self.handle(Threshold::Info)
    }

    /// Handle for [`Threshold::Warn`].
    #[must_use]
    pub fn warn(&self) -> LevelHandle {
        self.handle(Threshold::Warn)
    }

    /// Handle for [`Threshold::Error`].
    #[must_use]
    pub fn error(&self) -> LevelHandle {
        self.handle(Threshold::Error)
    }

    /// Handle for [`Threshold::Critical`].
    #[must_use]
    pub fn critical(&self) -> LevelHandle {
        self.handle(Threshold::Critical)
    }

    /// Handle for [`Threshold::Fatal`].
    #[must_use]
    pub fn fatal(&self) -> LevelHandle {
        self.handle(Threshold::Fatal)
    }

    /// Handle writing unconditionally to the persistent log with a `LOG:` prefix.
    #[must_use]
    pub fn log(&self) -> LevelHandle {
        LevelHandle::new(Arc::clone(&self.table), RouteKey::Log)
    }

    /// Handle for messages that must always reach the operator.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        Feedback::new(
            LevelHandle::new(Arc::clone(&self.table), RouteKey::Console),
            self.log(),
        )
    }

    /// Flushes both destinations, returning the first error.
    pub fn flush(&self) -> io::Result<()> {
        let (console, log) = self.read_settings(|s| (Arc::clone(&s.console), Arc::clone(&s.log)));
        let console = console.flush();
        let log = log.flush();
        console.and(log)
    }
}

impl fmt::Debug for Notepad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read_settings(|s| {
            f.debug_struct("Notepad")
                .field("console_threshold", &s.console_cutoff)
                .field("log_threshold", &s.log_cutoff)
                .field("prefix", &s.prefix)
                .field("flags", &s.flags)
                .field("colored", &s.colored)
                .field("line_mode", &s.line_mode)
                .field("listeners", &self.listeners.len())
                .finish()
        })
    }
}

/// Step-by-step construction of a [`Notepad`].
pub struct NotepadBuilder {
    config: NotepadConfig,
    console: SharedSink,
    log: SharedSink,
    listeners: Vec<Listener>,
}

impl Default for NotepadBuilder {
    fn default() -> Self {
        Self {
            config: NotepadConfig::default(),
            console: sink::stdout(),
            log: sink::discard(),
            listeners: Vec::new(),
        }
    }
}

impl NotepadBuilder {
    /// Replaces every configuration value at once.
    #[must_use]
    pub fn config(mut self, config: NotepadConfig) -> Self {
        self.config = config;
        self
    }

    /// Minimum severity written to the console.
    #[must_use]
    pub fn console_threshold(mut self, threshold: impl Into<Cutoff>) -> Self {
        self.config.console_threshold = threshold.into();
        self
    }

    /// Minimum severity written to the persistent log.
    #[must_use]
    pub fn log_threshold(mut self, threshold: impl Into<Cutoff>) -> Self {
        self.config.log_threshold = threshold.into();
        self
    }

    /// Console destination.
    #[must_use]
    pub fn console(mut self, console: SharedSink) -> Self {
        self.console = console;
        self
    }

    /// Persistent log destination.
    #[must_use]
    pub fn log(mut self, log: SharedSink) -> Self {
        self.log = log;
        self
    }

    /// Bracketed line prefix; empty disables it.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Annotation flags.
    #[must_use]
    pub fn flags(mut self, flags: FormatFlags) -> Self {
        self.config.flags = flags;
        self
    }

    /// Colored level labels.
    #[must_use]
    pub fn color(mut self, colored: bool) -> Self {
        self.config.color = colored;
        self
    }

    /// Newline policy.
    #[must_use]
    pub fn line_mode(mut self, line_mode: LineMode) -> Self {
        self.config.line_mode = line_mode;
        self
    }

    /// Appends a listener; listeners are consulted in the order added.
    #[must_use]
    pub fn listener(mut self, listener: impl crate::listener::SinkProvider + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Builds the notepad.
    #[must_use]
    pub fn build(self) -> Notepad {
        Notepad::from_config(&self.config, self.console, self.log, self.listeners)
    }
}
