//! crates/cli/src/parsed_args.rs
//! Typed view of the command line.

use std::ffi::OsString;
use std::path::PathBuf;

use notepad::{Cutoff, FormatFlags, NotepadConfig, Threshold};

use crate::command::clap_command;

/// Where the persistent log goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LogTarget {
    /// No log file; log lines are discarded.
    None,
    /// Append to the named file.
    File(PathBuf),
    /// Create a fresh file in the temporary directory and keep it.
    Temporary,
}

#[derive(Clone, Debug)]
pub(crate) struct ParsedArgs {
    pub(crate) program_name: String,
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) explain: bool,
    pub(crate) config: NotepadConfig,
    pub(crate) log_target: LogTarget,
    pub(crate) level: Threshold,
    pub(crate) message: Vec<String>,
}

pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(crate::PROGRAM_NAME));
    }
    let program_name = program_name_from(&args[0]);

    let mut matches = clap_command().try_get_matches_from(args)?;

    let show_help = matches.get_flag("help");
    let show_version = matches.get_flag("version");
    let explain = matches.get_flag("explain");
    let verbose = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");

    let mut config = NotepadConfig::from_verbosity(verbose, quiet);
    if let Some(cutoff) = matches.remove_one::<Cutoff>("stdout-threshold") {
        config.console_threshold = cutoff;
    }
    if let Some(cutoff) = matches.remove_one::<Cutoff>("log-threshold") {
        config.log_threshold = cutoff;
    }
    if let Some(prefix) = matches.remove_one::<String>("prefix") {
        config.prefix = prefix;
    }
    if let Some(flags) = matches.remove_one::<FormatFlags>("flags") {
        config.flags = flags;
    }
    config.color = matches.get_flag("color");

    let log_target = if let Some(path) = matches.remove_one::<OsString>("log-file") {
        LogTarget::File(PathBuf::from(path))
    } else if matches.get_flag("temp-log") {
        LogTarget::Temporary
    } else {
        LogTarget::None
    };

    let level = matches
        .remove_one::<Threshold>("level")
        .unwrap_or(Threshold::Info);
    let message = matches
        .remove_many::<String>("message")
        .map(Iterator::collect)
        .unwrap_or_default();

    Ok(ParsedArgs {
        program_name,
        show_help,
        show_version,
        explain,
        config,
        log_target,
        level,
        message,
    })
}

fn program_name_from(arg0: &OsString) -> String {
    PathBuf::from(arg0)
        .file_stem()
        .map_or_else(|| crate::PROGRAM_NAME.to_owned(), |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_default_configuration() {
        let parsed = parse_args(["notepad"]).expect("parse");
        assert_eq!(parsed.config, NotepadConfig::default());
        assert_eq!(parsed.log_target, LogTarget::None);
        assert_eq!(parsed.level, Threshold::Info);
        assert!(parsed.message.is_empty());
        assert!(!parsed.show_help && !parsed.show_version && !parsed.explain);
    }

    #[test]
    fn explicit_threshold_overrides_verbosity() {
        let parsed = parse_args(["notepad", "-vv", "--stdout-threshold", "warn"]).expect("parse");
        assert_eq!(parsed.config.console_threshold, Cutoff::At(Threshold::Warn));

        let parsed = parse_args(["notepad", "-vv"]).expect("parse");
        assert_eq!(parsed.config.console_threshold, Cutoff::At(Threshold::Trace));

        let parsed = parse_args(["notepad", "-q", "-v"]).expect("parse");
        assert_eq!(parsed.config.console_threshold, Cutoff::At(Threshold::Error));
    }

    #[test]
    fn recognises_every_option() {
        let parsed = parse_args([
            "notepad",
            "--log-threshold",
            "off",
            "--log-file",
            "/tmp/app.log",
            "--prefix",
            "app",
            "--color",
            "--flags",
            "date,shortfile",
            "--level",
            "error",
            "--explain",
            "disk",
            "full",
        ])
        .expect("parse");

        assert_eq!(parsed.config.log_threshold, Cutoff::Off);
        assert_eq!(parsed.log_target, LogTarget::File(PathBuf::from("/tmp/app.log")));
        assert_eq!(parsed.config.prefix, "app");
        assert!(parsed.config.color);
        assert_eq!(
            parsed.config.flags,
            FormatFlags::DATE | FormatFlags::SHORT_FILE
        );
        assert_eq!(parsed.level, Threshold::Error);
        assert!(parsed.explain);
        assert_eq!(parsed.message, ["disk", "full"]);
    }

    #[test]
    fn temp_log_conflicts_with_log_file() {
        let error = parse_args(["notepad", "--temp-log", "--log-file", "x.log"])
            .expect_err("conflicting options");
        assert_eq!(error.kind(), clap::error::ErrorKind::ArgumentConflict);

        let parsed = parse_args(["notepad", "--temp-log"]).expect("parse");
        assert_eq!(parsed.log_target, LogTarget::Temporary);
    }

    #[test]
    fn rejects_unknown_levels() {
        let error = parse_args(["notepad", "--level", "loud"]).expect_err("bad level");
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn program_name_is_taken_from_the_invocation_path() {
        let parsed = parse_args(["/usr/local/bin/notepad-dev"]).expect("parse");
        assert_eq!(parsed.program_name, "notepad-dev");

        let parsed = parse_args(Vec::<OsString>::new()).expect("parse");
        assert_eq!(parsed.program_name, crate::PROGRAM_NAME);
    }
}
