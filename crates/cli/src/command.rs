//! crates/cli/src/command.rs
//! clap definition of the command line.

use clap::{Arg, ArgAction, Command as ClapCommand, builder::OsStringValueParser};
use notepad::{Cutoff, FormatFlags, Threshold};

pub(crate) fn clap_command() -> ClapCommand {
    ClapCommand::new(crate::PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .about("Write a message through a leveled console/log notepad.")
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout-threshold")
                .long("stdout-threshold")
                .value_name("LEVEL")
                .help("Lowest level written to the console (trace..fatal, or off).")
                .value_parser(|value: &str| value.parse::<Cutoff>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-threshold")
                .long("log-threshold")
                .value_name("LEVEL")
                .help("Lowest level written to the log (trace..fatal, or off).")
                .value_parser(|value: &str| value.parse::<Cutoff>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Append the persistent log to PATH.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set)
                .conflicts_with("temp-log"),
        )
        .arg(
            Arg::new("temp-log")
                .long("temp-log")
                .help("Write the persistent log to a new file in the temporary directory.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("TEXT")
                .help("Show TEXT in brackets at the start of every line.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .help("Color the level labels.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("flags")
                .long("flags")
                .value_name("LIST")
                .help(
                    "Comma-separated annotations: date, time, microseconds, longfile, shortfile, utc, msgprefix, std, none.",
                )
                .value_parser(|value: &str| value.parse::<FormatFlags>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Lower the console threshold; may be supplied multiple times.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only show errors and above on the console.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("LEVEL")
                .help("Level MESSAGE is written at (default: info).")
                .value_parser(|value: &str| value.parse::<Threshold>())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Print where each level is routed and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .help("Words written as one line at --level.")
                .num_args(0..)
                .action(ArgAction::Append),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        clap_command().debug_assert();
    }

    #[test]
    fn invocation_name_appears_in_usage() {
        let help = clap_command()
            .bin_name("notepad-dev")
            .render_help()
            .to_string();
        assert!(help.contains("notepad-dev"), "unexpected help {help:?}");
    }
}
