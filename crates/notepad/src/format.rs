//! crates/notepad/src/format.rs
//! Renders one message into the bytes written to a destination.

use std::fmt::Write as _;
use std::panic::Location;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::flags::FormatFlags;
use crate::line_mode::LineMode;

/// `2009/01/23`
const DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]/[month padding:zero]/[day padding:zero]");

/// `01:23:23`
const TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[hour padding:zero]:[minute padding:zero]:[second padding:zero]");

/// `01:23:23.123123`
const TIME_MICROS: &[BorrowedFormatItem<'static>] = format_description!(
    "[hour padding:zero]:[minute padding:zero]:[second padding:zero].[subsecond digits:6]"
);

/// Source position reported in `file:line:` annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallSite<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> CallSite<'a> {
    /// Creates a call site from a file path and line number.
    #[must_use]
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Path of the source file.
    #[must_use]
    pub const fn file(&self) -> &'a str {
        self.file
    }

    /// One-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl<'a> From<&Location<'a>> for CallSite<'a> {
    fn from(location: &Location<'a>) -> Self {
        Self::new(location.file(), location.line())
    }
}

/// Header layout shared by every line a handle writes.
///
/// Layout: `prefix date time file:line: message`, where the date, time and
/// location parts depend on [`FormatFlags`] and [`FormatFlags::MSG_PREFIX`]
/// moves the prefix to just before the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineFormat {
    prefix: String,
    flags: FormatFlags,
    line_mode: LineMode,
}

impl LineFormat {
    /// Creates a format with the given line prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, flags: FormatFlags, line_mode: LineMode) -> Self {
        Self {
            prefix: prefix.into(),
            flags,
            line_mode,
        }
    }

    /// Returns the prefix written in front of every line.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the annotation flags.
    #[must_use]
    pub const fn flags(&self) -> FormatFlags {
        self.flags
    }

    /// Renders `message` stamped with the current time.
    #[must_use]
    pub fn render(&self, message: &str, site: CallSite<'_>) -> Vec<u8> {
        let now = if self.flags.wants_timestamp() {
            Some(current_time(self.flags))
        } else {
            None
        };
        self.render_with(message, site, now)
    }

    /// Renders `message` with an explicit timestamp.
    ///
    /// `now` is ignored unless the flags ask for a date or time.
    #[must_use]
    pub fn render_at(
        &self,
        message: &str,
        site: CallSite<'_>,
        now: OffsetDateTime,
    ) -> Vec<u8> {
        self.render_with(message, site, Some(now))
    }

    fn render_with(
        &self,
        message: &str,
        site: CallSite<'_>,
        now: Option<OffsetDateTime>,
    ) -> Vec<u8> {
        let flags = self.flags;
        let mut line = String::with_capacity(self.prefix.len() + message.len() + 32);

        if !flags.contains(FormatFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        if let Some(now) = now.filter(|_| flags.wants_timestamp()) {
            let now = if flags.contains(FormatFlags::UTC) {
                now.to_offset(UtcOffset::UTC)
            } else {
                now
            };
            if flags.contains(FormatFlags::DATE) {
                push_stamp(&mut line, now, DATE);
            }
            if flags.contains(FormatFlags::MICROSECONDS) {
                push_stamp(&mut line, now, TIME_MICROS);
            } else if flags.contains(FormatFlags::TIME) {
                push_stamp(&mut line, now, TIME);
            }
        }

        if flags.wants_location() {
            let file = if flags.contains(FormatFlags::SHORT_FILE) {
                short_file(site.file())
            } else {
                site.file()
            };
            let _ = write!(line, "{file}:{}: ", site.line());
        }

        if flags.contains(FormatFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        line.push_str(message);
        if self.line_mode.append_newline() && !message.ends_with('\n') {
            line.push('\n');
        }
        line.into_bytes()
    }
}

fn current_time(flags: FormatFlags) -> OffsetDateTime {
    if flags.contains(FormatFlags::UTC) {
        OffsetDateTime::now_utc()
    } else {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

fn push_stamp(line: &mut String, now: OffsetDateTime, layout: &[BorrowedFormatItem<'_>]) {
    if let Ok(stamp) = now.format(layout) {
        line.push_str(&stamp);
        line.push(' ');
    }
}

fn short_file(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn here() -> &'static Location<'static> {
        Location::caller()
    }

    fn render(format: &LineFormat, message: &str) -> String {
        let now = datetime!(2009-01-23 01:23:23.123123 UTC);
        String::from_utf8(format.render_at(message, here().into(), now)).expect("utf-8")
    }

    #[test]
    fn bare_format_is_prefix_then_message() {
        let format = LineFormat::new("[app] INFO ", FormatFlags::empty(), LineMode::WithNewline);
        assert_eq!(render(&format, "start"), "[app] INFO start\n");
    }

    #[test]
    fn existing_newline_is_not_doubled() {
        let format = LineFormat::new("", FormatFlags::empty(), LineMode::WithNewline);
        assert_eq!(render(&format, "done\n"), "done\n");
    }

    #[test]
    fn without_newline_leaves_message_open() {
        let format = LineFormat::new("", FormatFlags::empty(), LineMode::WithoutNewline);
        assert_eq!(render(&format, "50%"), "50%");
    }

    #[test]
    fn date_and_time_follow_the_prefix() {
        let format = LineFormat::new("WARN ", FormatFlags::STD, LineMode::WithNewline);
        assert_eq!(render(&format, "low disk"), "WARN 2009/01/23 01:23:23 low disk\n");
    }

    #[test]
    fn microseconds_extend_the_time() {
        let format = LineFormat::new("", FormatFlags::MICROSECONDS, LineMode::WithNewline);
        assert_eq!(render(&format, "tick"), "01:23:23.123123 tick\n");
    }

    #[test]
    fn timestamps_are_zero_padded() {
        let format = LineFormat::new(
            "",
            FormatFlags::DATE | FormatFlags::MICROSECONDS,
            LineMode::WithNewline,
        );
        let now = datetime!(2009-01-03 04:05:06.000007 UTC);
        let line = format.render_at("x", here().into(), now);
        assert_eq!(line, b"2009/01/03 04:05:06.000007 x\n");
    }

    #[test]
    fn utc_flag_converts_the_offset() {
        let format = LineFormat::new("", FormatFlags::STD | FormatFlags::UTC, LineMode::WithNewline);
        let now = datetime!(2009-01-23 01:23:23 +2);
        let line = format.render_at("x", here().into(), now);
        assert_eq!(line, b"2009/01/22 23:23:23 x\n");
    }

    #[test]
    fn short_file_keeps_only_the_file_name() {
        let format = LineFormat::new("", FormatFlags::SHORT_FILE, LineMode::WithNewline);
        let line = render(&format, "here");
        assert!(line.starts_with("format.rs:"), "unexpected line {line:?}");
        assert!(line.ends_with(": here\n"));
    }

    #[test]
    fn long_file_keeps_the_full_path() {
        let format = LineFormat::new("", FormatFlags::LONG_FILE, LineMode::WithNewline);
        let line = render(&format, "here");
        assert!(line.starts_with(here().file()), "unexpected line {line:?}");
    }

    #[test]
    fn msg_prefix_moves_prefix_next_to_message() {
        let format = LineFormat::new(
            "[app] ",
            FormatFlags::DATE | FormatFlags::MSG_PREFIX,
            LineMode::WithNewline,
        );
        assert_eq!(render(&format, "ready"), "2009/01/23 [app] ready\n");
    }

    #[test]
    fn explicit_call_site_is_used_verbatim() {
        let format = LineFormat::new("", FormatFlags::LONG_FILE, LineMode::WithNewline);
        let now = datetime!(2009-01-23 01:23:23 UTC);
        let line = format.render_at("x", CallSite::new("src/lib.rs", 7), now);
        assert_eq!(line, b"src/lib.rs:7: x\n");
    }

    #[test]
    fn short_file_handles_both_separators() {
        assert_eq!(short_file("src/bin/main.rs"), "main.rs");
        assert_eq!(short_file(r"src\bin\main.rs"), "main.rs");
        assert_eq!(short_file("main.rs"), "main.rs");
    }
}
