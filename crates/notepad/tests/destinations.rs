//! Integration tests for destinations, listeners and the threshold-free
//! handles.

use std::fmt;
use std::fs;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use notepad::{
    Cutoff, FormatFlags, LevelCounter, MemorySink, Notepad, SharedSink, Sink, Threshold,
    WriterSink, note,
};

/// Destination that rejects every line.
struct Broken;

impl Sink for Broken {
    fn write_line(&self, _line: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

fn plain() -> notepad::NotepadBuilder {
    Notepad::builder().flags(FormatFlags::empty())
}

// ============================================================================
// File destinations
// ============================================================================

/// A log file receives lines at or above its cutoff.
#[test]
fn log_file_receives_admitted_lines() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let handle = file.reopen().expect("reopen");
    let notepad = plain()
        .console_threshold(Cutoff::Off)
        .log_threshold(Threshold::Warn)
        .log(Arc::new(WriterSink::file(handle)))
        .build();

    notepad.info().println(&[&"skipped"]).expect("write");
    notepad.critical().println(&[&"disk", &"failed"]).expect("write");
    notepad.flush().expect("flush");

    let written = fs::read_to_string(file.path()).expect("read log");
    assert_eq!(written, "CRITICAL disk failed\n");
}

/// Switching the log output moves later lines to the new destination.
#[test]
fn set_log_output_switches_file() {
    let first = MemorySink::new();
    let second = MemorySink::new();
    let notepad = plain()
        .log_threshold(Threshold::Trace)
        .console(notepad::sink::discard())
        .log(Arc::new(first.clone()))
        .build();

    notepad.debug().println(&[&"a"]).expect("write");
    notepad.set_log_output(Arc::new(second.clone()));
    notepad.debug().println(&[&"b"]).expect("write");

    assert_eq!(first.lines(), ["DEBUG a"]);
    assert_eq!(second.lines(), ["DEBUG b"]);
}

// ============================================================================
// Errors
// ============================================================================

/// A failing destination surfaces its error to the caller.
#[test]
fn write_errors_reach_the_caller() {
    let notepad = plain().console(Arc::new(Broken)).build();

    let err = notepad.info().println(&[&"x"]).expect_err("broken console");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

/// A failing console does not keep the line from the log.
#[test]
fn fan_out_continues_past_a_failing_member() {
    let log = MemorySink::new();
    let notepad = plain()
        .console(Arc::new(Broken))
        .log(Arc::new(log.clone()))
        .log_threshold(Threshold::Trace)
        .build();

    let result = notepad.error().println(&[&"kept"]);

    assert!(result.is_err());
    assert_eq!(log.lines(), ["ERROR kept"]);
}

/// Discarded levels never touch a failing destination.
#[test]
fn discarded_levels_never_fail() {
    let notepad = plain()
        .console(Arc::new(Broken))
        .console_threshold(Threshold::Fatal)
        .log_threshold(Cutoff::Off)
        .build();

    notepad.error().println(&[&"quiet"]).expect("discarded");
}

/// Operand that counts how often it is formatted.
struct CountedDisplay(AtomicUsize);

impl fmt::Display for CountedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fetch_add(1, Ordering::Relaxed);
        f.write_str("counted")
    }
}

/// Discarded levels do not format their operands.
#[test]
fn discarded_levels_skip_formatting() {
    let notepad = plain()
        .console(Arc::new(MemorySink::new()))
        .console_threshold(Threshold::Error)
        .log_threshold(Cutoff::Off)
        .build();
    let operand = CountedDisplay(AtomicUsize::new(0));

    notepad.debug().print(&[&operand]).expect("print");
    notepad.debug().println(&[&operand]).expect("println");
    notepad.debug().printf(format_args!("{operand}")).expect("printf");
    assert_eq!(operand.0.load(Ordering::Relaxed), 0);

    notepad.error().printf(format_args!("{operand}")).expect("printf");
    assert_eq!(operand.0.load(Ordering::Relaxed), 1);
}

// ============================================================================
// Listeners
// ============================================================================

/// A listener sees levels that neither destination admits.
#[test]
fn listener_receives_lines_below_both_cutoffs() {
    let console = MemorySink::new();
    let captured = MemorySink::new();
    let mirror = captured.clone();
    let notepad = plain()
        .console(Arc::new(console.clone()))
        .console_threshold(Threshold::Error)
        .log_threshold(Cutoff::Off)
        .listener(move |level: Threshold| -> Option<SharedSink> {
            (level == Threshold::Debug).then(|| Arc::new(mirror.clone()) as SharedSink)
        })
        .build();

    notepad.debug().println(&[&"detail"]).expect("write");
    notepad.info().println(&[&"ignored"]).expect("write");

    assert!(console.is_empty());
    assert_eq!(captured.lines(), ["DEBUG detail"]);
    let routed = notepad.destinations(Threshold::Debug);
    assert!(!routed.console && !routed.log);
    assert_eq!(routed.listeners, 1);
}

/// The level counter tallies every write, admitted or not.
#[test]
fn level_counter_counts_every_level() {
    let counter = LevelCounter::new();
    let notepad = plain()
        .console(notepad::sink::discard())
        .console_threshold(Cutoff::Off)
        .log_threshold(Cutoff::Off)
        .listener(counter.clone())
        .build();

    notepad.warn().println(&[&"a"]).expect("write");
    notepad.error().println(&[&"b"]).expect("write");
    notepad.error().println(&[&"c"]).expect("write");
    notepad.trace().println(&[&"d"]).expect("write");

    assert_eq!(counter.count(Threshold::Error), 2);
    assert_eq!(counter.count_at_or_above(Threshold::Warn), 3);
    assert_eq!(counter.count(Threshold::Trace), 1);
}

// ============================================================================
// Threshold-free handles
// ============================================================================

/// Feedback reaches the console even with the console cutoff off.
#[test]
fn feedback_ignores_thresholds() {
    let console = MemorySink::new();
    let log = MemorySink::new();
    let notepad = plain()
        .console(Arc::new(console.clone()))
        .log(Arc::new(log.clone()))
        .console_threshold(Cutoff::Off)
        .log_threshold(Cutoff::Off)
        .prefix("app")
        .build();

    note!(notepad.feedback(), "logging to {}", "/var/log/app.log").expect("write");

    assert_eq!(console.contents(), "logging to /var/log/app.log\n");
    assert_eq!(log.contents(), "LOG:   logging to /var/log/app.log\n");
}

/// The LOG handle carries the configured annotations.
#[test]
fn log_handle_uses_configured_flags() {
    let log = MemorySink::new();
    let notepad = Notepad::builder()
        .log(Arc::new(log.clone()))
        .flags(FormatFlags::SHORT_FILE)
        .build();

    notepad.log().println(&[&"checkpoint"]).expect("write");

    let line = log.contents();
    assert!(line.starts_with("LOG:   destinations.rs:"), "unexpected {line:?}");
    assert!(line.ends_with(": checkpoint\n"));
}

/// Handles taken before a reconfiguration follow it.
#[test]
fn captured_handles_observe_reconfiguration() {
    let console = MemorySink::new();
    let notepad = plain()
        .console(Arc::new(console.clone()))
        .console_threshold(Threshold::Warn)
        .build();
    let info = notepad.info();
    let cloned = info.clone();

    info.println(&[&"before"]).expect("write");
    notepad.set_console_threshold(Threshold::Info);
    notepad.set_prefix("svc");
    cloned.println(&[&"after"]).expect("write");

    assert_eq!(console.lines(), ["[svc] INFO after"]);
    assert_eq!(info.level(), Some(Threshold::Info));
    assert_eq!(notepad.log().level(), None);
}

/// Colored labels wrap the label in escape sequences.
#[test]
fn colored_labels_are_used_after_use_color() {
    let console = MemorySink::new();
    let notepad = plain().console(Arc::new(console.clone())).build();

    notepad.use_color();
    notepad.error().println(&[&"red"]).expect("write");

    assert_eq!(
        console.contents(),
        format!("{} red\n", Threshold::Error.colored_label())
    );
}

/// Lines from several threads arrive whole.
#[test]
fn concurrent_writers_do_not_interleave_lines() {
    let console = MemorySink::new();
    let notepad = Arc::new(plain().console(Arc::new(console.clone())).build());

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let notepad = Arc::clone(&notepad);
            std::thread::spawn(move || {
                for i in 0..50 {
                    notepad
                        .info()
                        .printf(format_args!("worker {worker} line {i}"))
                        .expect("write");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker finished");
    }

    let lines = console.lines();
    assert_eq!(lines.len(), 200);
    assert!(lines.iter().all(|l| l.starts_with("INFO worker ")));
}
