//! # Shortfall Sourcing
//!
//! Plans the forced early unstake that covers the part of an undelegation
//! the idle pool cannot pay.
//!
//! ## Rules
//!
//! 1. Active vaults are drained in ascending slot order (oldest first).
//! 2. Vaults controlled by another account are skipped.
//! 3. Each vault contributes at most its current value
//!    (principal plus net rewards).
//! 4. Matured vaults carry no penalty; the penalty is capped at the amount
//!    drained from that vault.

use crate::domain::{checked_add, checked_sub, StakingError, StakingResult, Vault};
use crate::ports::PenaltyPolicy;
use shared_types::{Amount, Timestamp, ValidatorId, VaultSlot};

/// Planned unstake from a single vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VaultDrain {
    /// Vault slot.
    pub slot: VaultSlot,
    /// Validator holding the delegation.
    pub validator_id: ValidatorId,
    /// Value removed from the vault.
    pub unstaked: Amount,
    /// Part of `unstaked` forfeited to the consensus layer.
    pub penalty: Amount,
    /// The vault is emptied and leaves the registry.
    pub closes_vault: bool,
}

/// Full plan for one shortfall.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortfallPlan {
    /// Per-vault drains in execution order.
    pub drains: Vec<VaultDrain>,
    /// Value removed from vaults (sum of `unstaked`).
    pub unstaked: Amount,
    /// Penalties across all drains.
    pub penalty: Amount,
}

impl ShortfallPlan {
    /// Amount credited to the requester: unstaked value net of penalty.
    pub fn undelegate_amount(&self) -> StakingResult<Amount> {
        checked_sub(self.unstaked, self.penalty)
    }
}

/// Plan how to source `shortfall` from `vaults`.
///
/// Fails with `InsufficientLiquidity` when eligible vaults cannot cover it.
pub fn plan_shortfall<'a>(
    vaults: impl IntoIterator<Item = &'a Vault>,
    shortfall: Amount,
    fee_bips: u32,
    now: Timestamp,
    policy: &dyn PenaltyPolicy,
) -> StakingResult<ShortfallPlan> {
    let mut plan = ShortfallPlan::default();
    let mut remaining = shortfall;

    for vault in vaults {
        if remaining == 0 {
            break;
        }
        if !vault.owner.is_ledger() {
            continue;
        }
        let available = vault.current_value(fee_bips)?;
        if available == 0 {
            continue;
        }

        let unstaked = remaining.min(available);
        let penalty = if vault.is_matured(now) {
            0
        } else {
            policy
                .penalty(vault.lockup_start, vault.lockup_end, now, unstaked)
                .min(unstaked)
        };

        plan.drains.push(VaultDrain {
            slot: vault.slot,
            validator_id: vault.validator_id,
            unstaked,
            penalty,
            closes_vault: unstaked == available,
        });
        plan.unstaked = checked_add(plan.unstaked, unstaked)?;
        plan.penalty = checked_add(plan.penalty, penalty)?;
        remaining -= unstaked;
    }

    if remaining > 0 {
        return Err(StakingError::InsufficientLiquidity {
            shortfall: remaining,
        });
    }
    Ok(plan)
}
