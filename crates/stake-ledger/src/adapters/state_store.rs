//! In-memory transactional state store.
//!
//! Keeps the last committed ledger state as a bincode snapshot, the same
//! bytes a durable backend would persist.

use crate::domain::{LedgerState, StakingError, StakingResult};
use crate::ports::StateStore;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Snapshot store kept in memory.
#[derive(Default)]
pub struct InMemoryStateStore {
    snapshot: RwLock<Option<Vec<u8>>>,
    commits: AtomicU64,
    fail_commits: AtomicBool,
    commits_until_failure: Mutex<Option<u64>>,
}

impl InMemoryStateStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent commit fail (testing).
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Let `successes` more commits through, then fail every one after (testing).
    pub fn fail_commits_after(&self, successes: u64) {
        *self.commits_until_failure.lock() = Some(successes);
    }

    /// Successful commits so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    /// Size of the stored snapshot in bytes.
    pub fn snapshot_len(&self) -> usize {
        self.snapshot.read().as_ref().map_or(0, Vec::len)
    }
}

impl StateStore for InMemoryStateStore {
    fn load(&self) -> StakingResult<Option<LedgerState>> {
        let snapshot = self.snapshot.read();
        snapshot
            .as_deref()
            .map(|bytes| {
                bincode::deserialize(bytes).map_err(|e| StakingError::Storage(e.to_string()))
            })
            .transpose()
    }

    fn commit(&self, state: &LedgerState) -> StakingResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StakingError::Storage("commit rejected".to_string()));
        }
        if let Some(remaining) = self.commits_until_failure.lock().as_mut() {
            if *remaining == 0 {
                return Err(StakingError::Storage("commit rejected".to_string()));
            }
            *remaining -= 1;
        }
        let bytes = bincode::serialize(state).map_err(|e| StakingError::Storage(e.to_string()))?;
        debug!("[store] commit {} bytes", bytes.len());
        *self.snapshot.write() = Some(bytes);
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
