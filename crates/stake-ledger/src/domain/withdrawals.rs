//! # Withdrawal Queue
//!
//! Keyed request store for the two-phase `undelegate -> withdraw` flow.

use super::entities::WithdrawalRequest;
use super::errors::{StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use shared_types::WithdrawalId;
use std::collections::BTreeMap;

/// Withdrawal requests keyed by caller-supplied id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalQueue {
    requests: BTreeMap<WithdrawalId, WithdrawalRequest>,
}

impl WithdrawalQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is taken.
    pub fn contains(&self, id: WithdrawalId) -> bool {
        self.requests.contains_key(&id)
    }

    /// Record a new request; ids are never reused.
    pub fn insert(&mut self, request: WithdrawalRequest) -> StakingResult<()> {
        if self.contains(request.id) {
            return Err(StakingError::DuplicateId { id: request.id });
        }
        self.requests.insert(request.id, request);
        Ok(())
    }

    /// Request by id.
    pub fn get(&self, id: WithdrawalId) -> Option<&WithdrawalRequest> {
        self.requests.get(&id)
    }

    /// Mutable request by id, or `NotFound`.
    pub fn get_mut(&mut self, id: WithdrawalId) -> StakingResult<&mut WithdrawalRequest> {
        self.requests
            .get_mut(&id)
            .ok_or(StakingError::NotFound { id })
    }

    /// Requests not yet claimed.
    pub fn pending(&self) -> impl Iterator<Item = &WithdrawalRequest> {
        self.requests.values().filter(|r| !r.is_fulfilled())
    }

    /// Total number of recorded requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
