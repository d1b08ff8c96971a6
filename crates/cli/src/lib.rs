#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `cli` is the thin command-line front-end for the [`notepad`] logger. It
//! builds a notepad from command-line options, optionally opens a persistent
//! log file, and writes one message at a chosen level so the routing can be
//! observed from a shell.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments, the console destination and a
//! handle for standard error, and returns the process exit code. Parsing uses
//! a [`clap`](https://docs.rs/clap/) command definition with the built-in
//! help and version flags disabled so their output goes through the console
//! destination like everything else. With the `tracing` feature, setup
//! diagnostics are emitted as tracing events and routed through the notepad
//! being configured at `TRACE`, so `-vv` makes them visible while a single
//! `-v` only admits `DEBUG` messages.
//!
//! # Errors
//!
//! - Usage errors are printed to standard error and yield exit code `2`.
//! - [`SetupError`]s (log file creation) and failed writes yield exit code `1`.
//!
//! # Examples
//!
//! ```
//! use notepad::MemorySink;
//! use std::sync::Arc;
//!
//! let console = MemorySink::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(
//!     ["notepad", "--flags", "none", "--level", "warn", "low", "disk"],
//!     Arc::new(console.clone()),
//!     &mut stderr,
//! );
//!
//! assert_eq!(status, 0);
//! assert_eq!(console.contents(), "WARN low disk\n");
//! ```

use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use notepad::{Notepad, SharedSink};

mod command;
mod explain;
mod parsed_args;
mod setup;

pub use setup::SetupError;

use command::clap_command;
use parsed_args::{ParsedArgs, parse_args};

/// Name used when the invocation does not supply one.
pub const PROGRAM_NAME: &str = "notepad";

/// Exit code for malformed command lines.
pub const USAGE_EXIT: i32 = 2;

/// Exit code for setup and write failures.
pub const FAILURE_EXIT: i32 = 1;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the front-end and returns the exit status.
///
/// Regular output, help and version text go to `console`; diagnostics about
/// the invocation itself go to `stderr`.
pub fn run<I, S, Err>(arguments: I, console: SharedSink, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, console, stderr),
        Err(error) => {
            let rendered = error.to_string();
            let _ = stderr.write_all(rendered.as_bytes());
            if !rendered.ends_with('\n') {
                let _ = writeln!(stderr);
            }
            USAGE_EXIT
        }
    }
}

/// Converts a status returned by [`run`] into an [`ExitCode`](std::process::ExitCode).
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

fn execute<Err>(parsed: ParsedArgs, console: SharedSink, stderr: &mut Err) -> i32
where
    Err: Write,
{
    let program = parsed.program_name.as_str();

    if parsed.show_help {
        let help = clap_command().bin_name(program).render_help().to_string();
        return finish(console.write_line(help.as_bytes()), program, stderr);
    }
    if parsed.show_version {
        let version = format!("{program} {}\n", env!("CARGO_PKG_VERSION"));
        return finish(console.write_line(version.as_bytes()), program, stderr);
    }

    let opened = match setup::open_log(&parsed.log_target) {
        Ok(opened) => opened,
        Err(error) => {
            report(stderr, program, &error);
            return FAILURE_EXIT;
        }
    };

    let pad = Notepad::from_config(
        &parsed.config,
        Arc::clone(&console),
        opened.sink,
        Vec::new(),
    );
    let result = with_tracing(&pad, || {
        session(&parsed, &pad, &console, opened.path.as_deref())
    });
    finish(result, program, stderr)
}

/// Writes the requested output through a configured notepad.
fn session(
    parsed: &ParsedArgs,
    pad: &Notepad,
    console: &SharedSink,
    log_path: Option<&Path>,
) -> io::Result<()> {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "notepad::cli",
        "console threshold {}, log threshold {}",
        parsed.config.console_threshold,
        parsed.config.log_threshold
    );

    if let Some(path) = log_path {
        pad.feedback()
            .printf(format_args!("logging to {}", path.display()))?;
    }

    if parsed.explain {
        console.write_line(explain::render_routes(pad).as_bytes())?;
        return pad.flush();
    }

    if !parsed.message.is_empty() {
        let parts: Vec<&dyn fmt::Display> = parsed
            .message
            .iter()
            .map(|word| word as &dyn fmt::Display)
            .collect();
        pad.handle(parsed.level).println(&parts)?;
    } else {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "notepad::cli", "no message given");
    }

    pad.flush()
}

#[cfg(feature = "tracing")]
fn with_tracing<R>(pad: &Notepad, f: impl FnOnce() -> R) -> R {
    use tracing_subscriber::layer::SubscriberExt;

    let subscriber = tracing_subscriber::registry().with(notepad::NotepadLayer::new(pad));
    tracing::subscriber::with_default(subscriber, f)
}

#[cfg(not(feature = "tracing"))]
fn with_tracing<R>(_pad: &Notepad, f: impl FnOnce() -> R) -> R {
    f()
}

fn finish<Err: Write>(result: io::Result<()>, program: &str, stderr: &mut Err) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            report(stderr, program, &format_args!("write failed: {error}"));
            FAILURE_EXIT
        }
    }
}

fn report<Err: Write>(stderr: &mut Err, program: &str, error: &dyn fmt::Display) {
    let _ = writeln!(stderr, "{program}: {error}");
}
