//! crates/notepad/src/notepad/handle.rs
//! Write handles that resolve through the notepad's current routing table.

use std::fmt::{self, Write as _};
use std::io;
use std::panic::Location;
use std::sync::Arc;

use crate::format::CallSite;
use crate::threshold::Threshold;

use super::TableCell;
use super::routing::{Destinations, RouteKey};

/// Cheap, cloneable view onto one route of a notepad.
///
/// A handle owns no destination of its own; each write looks up the route in
/// the routing table the notepad most recently published. Handles captured
/// before a reconfiguration therefore follow the new configuration.
#[derive(Clone)]
pub struct LevelHandle {
    table: TableCell,
    key: RouteKey,
}

impl LevelHandle {
    pub(crate) const fn new(table: TableCell, key: RouteKey) -> Self {
        Self { table, key }
    }

    /// Returns the severity this handle writes at, or `None` for the `LOG`
    /// and console-only handles.
    #[must_use]
    pub const fn level(&self) -> Option<Threshold> {
        match self.key {
            RouteKey::Level(level) => Some(level),
            RouteKey::Log | RouteKey::Console => None,
        }
    }

    /// Reports where lines written through this handle currently go.
    #[must_use]
    pub fn destinations(&self) -> Destinations {
        super::snapshot(&self.table).route(self.key).destinations
    }

    /// Writes the operands concatenated, without adding a newline of its own.
    ///
    /// Whether the line is terminated afterwards depends on the notepad's
    /// [`LineMode`](crate::LineMode).
    #[track_caller]
    pub fn print(&self, parts: &[&dyn fmt::Display]) -> io::Result<()> {
        if self.is_discarded() {
            return Ok(());
        }
        let mut message = String::new();
        for part in parts {
            let _ = write!(message, "{part}");
        }
        self.write_message(&message, Location::caller())
    }

    /// Writes the operands separated by spaces and terminated by a newline.
    #[track_caller]
    pub fn println(&self, parts: &[&dyn fmt::Display]) -> io::Result<()> {
        if self.is_discarded() {
            return Ok(());
        }
        let mut message = String::new();
        for (index, part) in parts.iter().enumerate() {
            if index > 0 {
                message.push(' ');
            }
            let _ = write!(message, "{part}");
        }
        message.push('\n');
        self.write_message(&message, Location::caller())
    }

    /// Writes pre-formatted arguments, usually produced by [`format_args!`].
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
        if self.is_discarded() {
            return Ok(());
        }
        let location = Location::caller();
        match args.as_str() {
            Some(literal) => self.write_message(literal, location),
            None => self.write_message(&args.to_string(), location),
        }
    }

    fn is_discarded(&self) -> bool {
        super::snapshot(&self.table)
            .route(self.key)
            .destinations
            .is_discarded()
    }

    /// Renders `message` as written from `location` and sends it down the
    /// route.
    ///
    /// Errors from the destination are returned unchanged. Routes that resolve
    /// to the discard sink skip rendering entirely.
    pub fn write_message(&self, message: &str, location: &Location<'_>) -> io::Result<()> {
        self.write_at(message, location.into())
    }

    /// Like [`write_message`](Self::write_message) with an explicit source
    /// position, for callers that did not come through a Rust call site.
    pub fn write_at(&self, message: &str, site: CallSite<'_>) -> io::Result<()> {
        let table = super::snapshot(&self.table);
        let route = table.route(self.key);
        if route.destinations.is_discarded() {
            return Ok(());
        }
        let line = route.format.render(message, site);
        route.sink.write_line(&line)
    }
}

impl fmt::Debug for LevelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelHandle")
            .field("route", &self.key)
            .field("refs", &Arc::strong_count(&self.table))
            .finish()
    }
}
