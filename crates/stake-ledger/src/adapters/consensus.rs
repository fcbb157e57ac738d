//! In-memory consensus-layer staking book.
//!
//! Tracks delegated stake per validator and the penalties it has absorbed.
//! A batch is validated in full before any of it is applied.

use crate::domain::{StakingError, StakingResult};
use crate::ports::{ConsensusStaking, DelegationOp};
use parking_lot::Mutex;
use shared_types::{Amount, ValidatorId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

#[derive(Clone, Default)]
struct StakeBook {
    delegated: HashMap<ValidatorId, Amount>,
    penalties: Amount,
    rewards_paid: Amount,
    history: Vec<DelegationOp>,
}

impl StakeBook {
    fn apply(&mut self, op: &DelegationOp) -> StakingResult<()> {
        match op {
            DelegationOp::Delegate {
                validator_id,
                amount,
                ..
            }
            | DelegationOp::RestakeRewards {
                validator_id,
                amount,
                ..
            } => {
                let stake = self.delegated.entry(*validator_id).or_insert(0);
                *stake = stake
                    .checked_add(*amount)
                    .ok_or(StakingError::ArithmeticOverflow)?;
            }
            DelegationOp::Undelegate {
                validator_id,
                amount,
                penalty,
                ..
            } => {
                self.release(*validator_id, *amount)?;
                self.penalties = self.penalties.saturating_add(*penalty);
            }
            DelegationOp::Withdraw {
                validator_id,
                amount,
                ..
            } => self.release(*validator_id, *amount)?,
            DelegationOp::Unlock { penalty, .. } => {
                self.penalties = self.penalties.saturating_add(*penalty);
            }
            DelegationOp::ClaimRewards { amount, .. } => {
                self.rewards_paid = self.rewards_paid.saturating_add(*amount);
            }
        }
        self.history.push(op.clone());
        Ok(())
    }

    fn release(&mut self, validator_id: ValidatorId, amount: Amount) -> StakingResult<()> {
        let stake = self.delegated.entry(validator_id).or_insert(0);
        *stake = stake.checked_sub(amount).ok_or_else(|| {
            StakingError::Consensus(format!(
                "validator {validator_id} holds less than {amount}"
            ))
        })?;
        Ok(())
    }
}

/// Consensus staking contract kept in memory.
#[derive(Default)]
pub struct InMemoryConsensus {
    book: Mutex<StakeBook>,
    fail_submits: AtomicBool,
}

impl InMemoryConsensus {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent submit fail (testing).
    pub fn set_fail_submits(&self, fail: bool) {
        self.fail_submits.store(fail, Ordering::SeqCst);
    }

    /// Stake currently delegated to `validator_id`.
    pub fn delegated(&self, validator_id: ValidatorId) -> Amount {
        self.book
            .lock()
            .delegated
            .get(&validator_id)
            .copied()
            .unwrap_or(0)
    }

    /// Penalties absorbed so far.
    pub fn penalties(&self) -> Amount {
        self.book.lock().penalties
    }

    /// Gross rewards paid out so far.
    pub fn rewards_paid(&self) -> Amount {
        self.book.lock().rewards_paid
    }

    /// Every accepted operation, in order.
    pub fn history(&self) -> Vec<DelegationOp> {
        self.book.lock().history.clone()
    }
}

impl ConsensusStaking for InMemoryConsensus {
    fn submit(&self, ops: &[DelegationOp]) -> StakingResult<()> {
        if self.fail_submits.load(Ordering::SeqCst) {
            return Err(StakingError::Consensus("submission rejected".to_string()));
        }
        let mut book = self.book.lock();
        let mut staged = book.clone();
        for op in ops {
            staged.apply(op)?;
        }
        *book = staged;
        debug!("[consensus] accepted {} op(s)", ops.len());
        Ok(())
    }

    fn revert(&self, ops: &[DelegationOp]) {
        let mut book = self.book.lock();
        for op in ops.iter().rev() {
            match op {
                DelegationOp::Delegate {
                    validator_id,
                    amount,
                    ..
                }
                | DelegationOp::RestakeRewards {
                    validator_id,
                    amount,
                    ..
                } => {
                    let stake = book.delegated.entry(*validator_id).or_insert(0);
                    *stake = stake.saturating_sub(*amount);
                }
                DelegationOp::Undelegate {
                    validator_id,
                    amount,
                    penalty,
                    ..
                } => {
                    let stake = book.delegated.entry(*validator_id).or_insert(0);
                    *stake = stake.saturating_add(*amount);
                    book.penalties = book.penalties.saturating_sub(*penalty);
                }
                DelegationOp::Withdraw {
                    validator_id,
                    amount,
                    ..
                } => {
                    let stake = book.delegated.entry(*validator_id).or_insert(0);
                    *stake = stake.saturating_add(*amount);
                }
                DelegationOp::Unlock { penalty, .. } => {
                    book.penalties = book.penalties.saturating_sub(*penalty);
                }
                DelegationOp::ClaimRewards { amount, .. } => {
                    book.rewards_paid = book.rewards_paid.saturating_sub(*amount);
                }
            }
            if book.history.last() == Some(op) {
                book.history.pop();
            }
        }
        warn!("[consensus] reverted {} op(s)", ops.len());
    }
}
