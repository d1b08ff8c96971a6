//! crates/cli/src/setup.rs
//! Opening the persistent log destination.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use notepad::{SharedSink, WriterSink, sink};

use crate::parsed_args::LogTarget;

/// Failure to prepare a destination before any line is written.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The requested log file could not be opened for appending.
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLog {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// No temporary log file could be created or kept.
    #[error("failed to create temporary log file: {source}")]
    TempLog {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Log destination ready for use, with the path it writes to.
pub(crate) struct OpenedLog {
    pub(crate) sink: SharedSink,
    pub(crate) path: Option<PathBuf>,
}

pub(crate) fn open_log(target: &LogTarget) -> Result<OpenedLog, SetupError> {
    match target {
        LogTarget::None => Ok(OpenedLog {
            sink: sink::discard(),
            path: None,
        }),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| SetupError::OpenLog {
                    path: path.clone(),
                    source,
                })?;
            Ok(OpenedLog {
                sink: Arc::new(WriterSink::file(file)),
                path: Some(path.clone()),
            })
        }
        LogTarget::Temporary => {
            let (file, path) = tempfile::Builder::new()
                .prefix("notepad-")
                .suffix(".log")
                .tempfile()
                .map_err(|source| SetupError::TempLog { source })?
                .keep()
                .map_err(|error| SetupError::TempLog {
                    source: error.error,
                })?;
            Ok(OpenedLog {
                sink: Arc::new(WriterSink::file(file)),
                path: Some(path),
            })
        }
    }
}
