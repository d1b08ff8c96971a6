//! crates/notepad/src/notepad/routing.rs
//! Level-to-destination routing table.
//!
//! The table is rebuilt from scratch on every configuration change and then
//! published whole; nothing in it is ever patched in place.

use std::sync::Arc;

use crate::flags::FormatFlags;
use crate::format::LineFormat;
use crate::listener::Listener;
use crate::sink::{self, FanOut, SharedSink};
use crate::threshold::Threshold;

use super::Settings;

/// Fixed prefix of lines written through the `LOG` handle.
pub(crate) const LOG_PREFIX: &str = "LOG:   ";

/// Which destinations a route writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Destinations {
    /// The console destination receives the line.
    pub console: bool,
    /// The persistent log destination receives the line.
    pub log: bool,
    /// Number of listener sinks mirroring the line.
    pub listeners: usize,
}

impl Destinations {
    /// Reports whether lines on this route are dropped.
    #[must_use]
    pub const fn is_discarded(&self) -> bool {
        !self.console && !self.log && self.listeners == 0
    }
}

/// Resolved sink plus formatting for one handle.
pub(crate) struct Route {
    pub(crate) sink: SharedSink,
    pub(crate) format: LineFormat,
    pub(crate) destinations: Destinations,
}

/// Identifies which route of the table a handle writes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RouteKey {
    Level(Threshold),
    Log,
    Console,
}

/// Immutable snapshot of where every handle writes.
pub(crate) struct RoutingTable {
    levels: [Route; Threshold::COUNT],
    log: Route,
    console: Route,
}

impl RoutingTable {
    pub(crate) fn build(settings: &Settings, listeners: &[Listener]) -> Self {
        let levels = Threshold::ALL.map(|level| level_route(level, settings, listeners));

        let log = Route {
            sink: Arc::clone(&settings.log),
            format: LineFormat::new(LOG_PREFIX, settings.flags, settings.line_mode),
            destinations: Destinations {
                console: false,
                log: true,
                listeners: 0,
            },
        };

        let console = Route {
            sink: Arc::clone(&settings.console),
            format: LineFormat::new("", FormatFlags::empty(), settings.line_mode),
            destinations: Destinations {
                console: true,
                log: false,
                listeners: 0,
            },
        };

        Self {
            levels,
            log,
            console,
        }
    }

    pub(crate) fn route(&self, key: RouteKey) -> &Route {
        match key {
            RouteKey::Level(level) => &self.levels[level.rank()],
            RouteKey::Log => &self.log,
            RouteKey::Console => &self.console,
        }
    }
}

fn level_route(level: Threshold, settings: &Settings, listeners: &[Listener]) -> Route {
    let mut members: Vec<SharedSink> = Vec::with_capacity(2 + listeners.len());
    let mut destinations = Destinations::default();

    if settings.console_cutoff.admits(level) {
        members.push(Arc::clone(&settings.console));
        destinations.console = true;
    }
    if settings.log_cutoff.admits(level) {
        members.push(Arc::clone(&settings.log));
        destinations.log = true;
    }
    for listener in listeners {
        if let Some(extra) = listener.resolve(level) {
            members.push(extra);
            destinations.listeners += 1;
        }
    }

    let sink: SharedSink = match members.len() {
        0 => sink::discard(),
        1 => members.remove(0),
        _ => Arc::new(FanOut::new(members)),
    };

    let label = if settings.colored {
        level.colored_label()
    } else {
        level.label().to_owned()
    };
    let prefix = format!("{}{} ", settings.prefix, label);

    Route {
        sink,
        format: LineFormat::new(prefix, settings.flags, settings.line_mode),
        destinations,
    }
}
