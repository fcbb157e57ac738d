//! Manually driven clock.

use crate::ports::TimeSource;
use shared_types::{DurationSecs, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: AtomicU64,
}

impl ManualClock {
    /// Clock starting at `initial`.
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: DurationSecs) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to `time`.
    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}
