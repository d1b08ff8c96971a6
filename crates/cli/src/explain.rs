//! crates/cli/src/explain.rs
//! Human-readable dump of a notepad's routing.

use std::fmt::Write as _;

use notepad::{Notepad, Threshold};

/// Renders one row per level naming the destinations it reaches.
pub(crate) fn render_routes(notepad: &Notepad) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10}{:<9}{:<5}LISTENERS", "LEVEL", "CONSOLE", "LOG");
    for level in Threshold::ALL {
        let routed = notepad.destinations(level);
        let _ = writeln!(
            out,
            "{:<10}{:<9}{:<5}{}",
            level.label(),
            yes_no(routed.console),
            yes_no(routed.log),
            routed.listeners
        );
    }
    out
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notepad::{Cutoff, sink};

    #[test]
    fn rows_follow_both_cutoffs() {
        let notepad = Notepad::builder()
            .console(sink::discard())
            .console_threshold(Threshold::Warn)
            .log_threshold(Cutoff::Off)
            .build();

        let table = render_routes(&notepad);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 1 + Threshold::COUNT);
        assert!(lines[0].starts_with("LEVEL"));
        assert_eq!(lines[1], "TRACE     no       no   0");
        assert_eq!(lines[4], "WARN      yes      no   0");
    }
}
