//! crates/notepad/src/config.rs
//! Plain-data notepad configuration.

use crate::flags::FormatFlags;
use crate::line_mode::LineMode;
use crate::threshold::{Cutoff, Threshold};

/// Every setting of a [`Notepad`](crate::Notepad) except its destinations and
/// listeners.
///
/// The default matches the process-wide notepad: console at `Info`, log at
/// `Trace`, no prefix, date and time annotations, no color.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NotepadConfig {
    /// Minimum severity written to the console.
    pub console_threshold: Cutoff,
    /// Minimum severity written to the persistent log.
    pub log_threshold: Cutoff,
    /// Text shown in brackets at the start of each line; empty for none.
    pub prefix: String,
    /// Annotations added after the prefix.
    pub flags: FormatFlags,
    /// Whether level labels are colored.
    pub color: bool,
    /// Whether unterminated messages get a newline.
    pub line_mode: LineMode,
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            console_threshold: Cutoff::At(Threshold::Info),
            log_threshold: Cutoff::At(Threshold::Trace),
            prefix: String::new(),
            flags: FormatFlags::STD,
            color: false,
            line_mode: LineMode::WithNewline,
        }
    }
}

impl NotepadConfig {
    /// Default configuration with the console cutoff taken from `-v`/`-q`
    /// counts.
    #[must_use]
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        Self {
            console_threshold: Cutoff::from_verbosity(verbose, quiet),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_process_wide_configuration() {
        let config = NotepadConfig::default();
        assert_eq!(config.console_threshold, Cutoff::At(Threshold::Info));
        assert_eq!(config.log_threshold, Cutoff::At(Threshold::Trace));
        assert!(config.prefix.is_empty());
        assert_eq!(config.flags, FormatFlags::DATE | FormatFlags::TIME);
        assert!(!config.color);
    }

    #[test]
    fn verbosity_only_moves_the_console_cutoff() {
        let config = NotepadConfig::from_verbosity(2, false);
        assert_eq!(config.console_threshold, Cutoff::At(Threshold::Trace));
        assert_eq!(config.log_threshold, NotepadConfig::default().log_threshold);

        let quiet = NotepadConfig::from_verbosity(2, true);
        assert_eq!(quiet.console_threshold, Cutoff::At(Threshold::Error));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_documents_over_defaults() {
        let config: NotepadConfig =
            serde_json::from_str(r#"{"log_threshold":"off","prefix":"svc","flags":19}"#)
                .expect("valid config");

        assert_eq!(config.log_threshold, Cutoff::Off);
        assert_eq!(config.prefix, "svc");
        assert_eq!(
            config.flags,
            FormatFlags::DATE | FormatFlags::TIME | FormatFlags::SHORT_FILE
        );
        assert_eq!(config.console_threshold, Cutoff::At(Threshold::Info));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_cutoffs_as_lowercase_names() {
        let config = NotepadConfig {
            console_threshold: Cutoff::At(Threshold::Warn),
            log_threshold: Cutoff::Off,
            ..NotepadConfig::default()
        };
        let json = serde_json::to_value(&config).expect("serializable");
        assert_eq!(json["console_threshold"], "warn");
        assert_eq!(json["log_threshold"], "off");
        assert_eq!(json["line_mode"], "with_newline");
    }
}
