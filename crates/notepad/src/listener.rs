//! crates/notepad/src/listener.rs
//! Listeners that contribute extra destinations per level.
//!
//! A notepad consults every listener once per level each time it rebuilds its
//! routing table, never on the write path. Whatever sink a listener returns
//! for a level receives that level's lines even when neither the console nor
//! the log threshold admits them, which makes listeners the way to capture or
//! count output in tests.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::sink::{SharedSink, Sink};
use crate::threshold::Threshold;

/// Supplies an optional additional destination for a level.
pub trait SinkProvider: Send + Sync {
    /// Returns the sink that should mirror lines written at `level`.
    fn resolve(&self, level: Threshold) -> Option<SharedSink>;
}

impl<F> SinkProvider for F
where
    F: Fn(Threshold) -> Option<SharedSink> + Send + Sync,
{
    fn resolve(&self, level: Threshold) -> Option<SharedSink> {
        self(level)
    }
}

/// Shared handle to a listener.
pub type Listener = Arc<dyn SinkProvider>;

/// Counts the lines written at each level.
///
/// Clones share their counters. Lines are counted whether or not a primary
/// destination admits them, so errors can be tallied while the console only
/// shows warnings and up.
#[derive(Clone, Debug, Default)]
pub struct LevelCounter {
    counts: Arc<[AtomicU64; Threshold::COUNT]>,
}

impl LevelCounter {
    /// Creates a counter with every level at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines written at `level`.
    #[must_use]
    pub fn count(&self, level: Threshold) -> u64 {
        self.counts[level.rank()].load(Ordering::Relaxed)
    }

    /// Number of lines written at `level` or above.
    #[must_use]
    pub fn count_at_or_above(&self, level: Threshold) -> u64 {
        Threshold::ALL[level.rank()..]
            .iter()
            .map(|&t| self.count(t))
            .sum()
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        for count in self.counts.iter() {
            count.store(0, Ordering::Relaxed);
        }
    }
}

impl SinkProvider for LevelCounter {
    fn resolve(&self, level: Threshold) -> Option<SharedSink> {
        Some(Arc::new(CountingSink {
            counts: Arc::clone(&self.counts),
            level,
        }))
    }
}

struct CountingSink {
    counts: Arc<[AtomicU64; Threshold::COUNT]>,
    level: Threshold,
}

impl Sink for CountingSink {
    fn write_line(&self, _line: &[u8]) -> io::Result<()> {
        self.counts[self.level.rank()].fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
