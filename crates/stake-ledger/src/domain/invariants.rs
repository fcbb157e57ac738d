//! # Domain Invariants
//!
//! Checks shared by the ledger operations.

use super::config::StakingConfig;
use super::errors::{StakingError, StakingResult};
use shared_types::{Address, Amount, DurationSecs, Timestamp};

/// Invariant: capability gate for treasury-only operations.
pub fn invariant_treasury(config: &StakingConfig, caller: &Address) -> StakingResult<()> {
    if config.treasury != *caller {
        return Err(StakingError::Unauthorized { caller: *caller });
    }
    Ok(())
}

/// Invariant: the registry never holds more than `max` vaults.
pub fn invariant_capacity(current: u64, max: u64) -> StakingResult<()> {
    if current >= max {
        return Err(StakingError::InsufficientCapacity { max });
    }
    Ok(())
}

/// Invariant: a payout honours the caller's minimum.
pub fn invariant_min_out(actual: Amount, expected_min: Amount) -> StakingResult<()> {
    if actual < expected_min {
        return Err(StakingError::SlippageExceeded {
            expected_min,
            actual,
        });
    }
    Ok(())
}

/// Invariant: a withdrawal is claimable from `requested_at + delay` on.
pub fn invariant_withdrawal_eligible(
    requested_at: Timestamp,
    delay: DurationSecs,
    now: Timestamp,
) -> StakingResult<()> {
    let eligible_at = requested_at.saturating_add(delay);
    if now < eligible_at {
        return Err(StakingError::NotYetEligible { eligible_at, now });
    }
    Ok(())
}

/// Invariant: reclassification leaves total worth untouched.
pub fn invariant_worth_preserved(before: Amount, after: Amount) -> bool {
    before == after
}
