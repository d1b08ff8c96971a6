//! crates/notepad/src/macros.rs
//! Formatting macros that record the caller's location.
//!
//! [`note!`] writes through any handle and returns the write result. The
//! per-level macros write through the process-wide notepad and drop write
//! errors, the same way `println!` users rarely look at stdout failures.

/// Writes a formatted line through a [`LevelHandle`](crate::LevelHandle) or
/// [`Feedback`](crate::Feedback).
///
/// Evaluates to the handle's [`std::io::Result`].
///
/// # Example
/// ```
/// use notepad::{note, MemorySink, Notepad, FormatFlags};
/// use std::sync::Arc;
///
/// let console = MemorySink::new();
/// let notepad = Notepad::builder()
///     .console(Arc::new(console.clone()))
///     .flags(FormatFlags::empty())
///     .build();
///
/// note!(notepad.warn(), "disk {}% full", 91)?;
/// assert_eq!(console.contents(), "WARN disk 91% full\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[macro_export]
macro_rules! note {
    ($handle:expr, $($arg:tt)+) => {
        $handle.printf(::std::format_args!($($arg)+))
    };
}

/// Writes a formatted `TRACE` line through the default notepad.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {{
        let _ = $crate::global::trace().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `DEBUG` line through the default notepad.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {{
        let _ = $crate::global::debug().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `INFO` line through the default notepad.
///
/// # Example
/// ```ignore
/// notepad::info!("listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {{
        let _ = $crate::global::info().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `WARN` line through the default notepad.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {{
        let _ = $crate::global::warn().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `ERROR` line through the default notepad.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {{
        let _ = $crate::global::error().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `CRITICAL` line through the default notepad.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {{
        let _ = $crate::global::critical().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes a formatted `FATAL` line through the default notepad.
///
/// Only writes; the process keeps running.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {{
        let _ = $crate::global::fatal().printf(::std::format_args!($($arg)+));
    }};
}

/// Writes formatted feedback through the default notepad.
#[macro_export]
macro_rules! feedback {
    ($($arg:tt)+) => {{
        let _ = $crate::global::feedback().printf(::std::format_args!($($arg)+));
    }};
}
