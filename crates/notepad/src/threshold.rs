//! crates/notepad/src/threshold.rs
//! Severity levels and the per-destination cutoffs built from them.

use std::fmt;
use std::str::FromStr;

use anstyle::{AnsiColor, Color, Style};

/// Severity of a log line, ordered from least to most severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Threshold {
    /// Very fine-grained tracing output.
    Trace = 0,
    /// Diagnostics useful while debugging.
    Debug = 1,
    /// Progress information for the operator.
    Info = 2,
    /// Potentially harmful situations.
    Warn = 3,
    /// Failures the program can recover from.
    Error = 4,
    /// Failures that compromise the current operation.
    Critical = 5,
    /// Failures the program cannot continue after.
    Fatal = 6,
}

impl Threshold {
    /// Every level in ascending rank order.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Critical,
        Self::Fatal,
    ];

    /// Number of defined levels.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the integer rank of the level (`Trace` is 0).
    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Returns the level with the given rank, if one exists.
    #[must_use]
    pub const fn from_rank(rank: usize) -> Option<Self> {
        if rank < Self::COUNT {
            Some(Self::ALL[rank])
        } else {
            None
        }
    }

    /// Returns the fixed uppercase label for the level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the emphasis applied to the level's label when coloring is on.
    ///
    /// Emphasis grows with severity; `Trace` stays plain.
    #[must_use]
    pub const fn style(self) -> Style {
        match self {
            Self::Trace => Style::new(),
            Self::Debug => Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            Self::Info => Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlue))),
            Self::Warn => Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightYellow))),
            Self::Error => Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))),
            Self::Critical => Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Red)))
                .bold(),
            Self::Fatal => Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::BrightRed)))
                .bold()
                .italic(),
        }
    }

    /// Returns the label wrapped in the level's ANSI emphasis.
    #[must_use]
    pub fn colored_label(self) -> String {
        let style = self.style();
        format!(
            "{}{}{}",
            style.render(),
            self.label(),
            style.render_reset()
        )
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a [`Threshold`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown threshold '{0}' (expected trace, debug, info, warn, error, critical or fatal)")]
pub struct ParseThresholdError(pub String);

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseThresholdError(s.to_owned())),
        }
    }
}

/// Minimum severity a destination accepts.
///
/// `Off` sits above every level, so a destination with that cutoff receives
/// nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub enum Cutoff {
    /// Admit `level` and everything more severe.
    At(Threshold),
    /// Admit nothing.
    Off,
}

impl Cutoff {
    /// Reports whether a line at `level` passes this cutoff.
    #[must_use]
    pub fn admits(self, level: Threshold) -> bool {
        match self {
            Self::At(min) => level >= min,
            Self::Off => false,
        }
    }

    /// Returns the threshold, or `None` for [`Cutoff::Off`].
    #[must_use]
    pub const fn threshold(self) -> Option<Threshold> {
        match self {
            Self::At(level) => Some(level),
            Self::Off => None,
        }
    }

    /// Maps `-v`/`-q` style counts onto a console cutoff.
    ///
    /// Quiet wins over verbose and keeps only `Error` and above. Without
    /// flags the cutoff is `Info`; one `-v` lowers it to `Debug`, two or more
    /// to `Trace`.
    #[must_use]
    pub const fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::At(Threshold::Error);
        }
        match verbose {
            0 => Self::At(Threshold::Info),
            1 => Self::At(Threshold::Debug),
            _ => Self::At(Threshold::Trace),
        }
    }
}

impl From<Threshold> for Cutoff {
    fn from(level: Threshold) -> Self {
        Self::At(level)
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(level) => level.fmt(f),
            Self::Off => f.write_str("OFF"),
        }
    }
}

impl From<Cutoff> for String {
    fn from(cutoff: Cutoff) -> Self {
        cutoff.to_string().to_ascii_lowercase()
    }
}

impl TryFrom<String> for Cutoff {
    type Error = ParseThresholdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Cutoff {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("off") {
            Ok(Self::Off)
        } else {
            s.parse().map(Self::At)
        }
    }
}
