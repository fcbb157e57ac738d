//! # Early-Unstake Penalty Policies
//!
//! The consensus layer's real schedule is injected through
//! [`PenaltyPolicy`]; these are the stock implementations.

use crate::ports::PenaltyPolicy;
use shared_types::{Amount, Timestamp, BIPS_DENOMINATOR, U256};

/// Penalty proportional to the unexpired share of the lock.
///
/// `penalty = amount * max_penalty_bips * remaining / (duration * 10_000)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearLockPenalty {
    /// Penalty charged at the very start of the lock.
    pub max_penalty_bips: u32,
}

impl LinearLockPenalty {
    /// Create a policy.
    pub fn new(max_penalty_bips: u32) -> Self {
        Self {
            max_penalty_bips: max_penalty_bips.min(BIPS_DENOMINATOR),
        }
    }
}

impl PenaltyPolicy for LinearLockPenalty {
    fn penalty(
        &self,
        lock_start: Timestamp,
        lock_end: Timestamp,
        now: Timestamp,
        amount: Amount,
    ) -> Amount {
        if now >= lock_end || lock_end <= lock_start {
            return 0;
        }
        let duration = lock_end - lock_start;
        let remaining = (lock_end - now).min(duration);
        let numerator = U256::from(amount) * U256::from(self.max_penalty_bips) * U256::from(remaining);
        let denominator = U256::from(duration) * U256::from(BIPS_DENOMINATOR);
        // bounded by `amount`, so the low word is exact
        (numerator / denominator).low_u128()
    }
}

/// No penalty at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoPenalty;

impl PenaltyPolicy for NoPenalty {
    fn penalty(&self, _: Timestamp, _: Timestamp, _: Timestamp, _: Amount) -> Amount {
        0
    }
}
