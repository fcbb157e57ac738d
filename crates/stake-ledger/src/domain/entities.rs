//! # Domain Entities
//!
//! Vaults, matured vaults and withdrawal requests.

use super::errors::{checked_add, checked_sub, StakingError, StakingResult};
use super::value_objects::{ValidatorAssignment, VaultOwner, WithdrawalState};
use serde::{Deserialize, Serialize};
use shared_types::{
    apply_bips, Address, Amount, Timestamp, ValidatorId, VaultSlot, WithdrawalId,
};

/// FTM delegated to one validator for a bounded lock period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    /// Registry slot.
    pub slot: VaultSlot,
    /// Validator holding the delegation.
    pub validator_id: ValidatorId,
    /// Delegated principal.
    pub principal: Amount,
    /// Gross rewards accrued and not yet settled.
    pub pending_rewards: Amount,
    /// Lock start.
    pub lockup_start: Timestamp,
    /// Lock end; the vault is matured from this instant on.
    pub lockup_end: Timestamp,
    /// Current controller.
    pub owner: VaultOwner,
}

/// Split of a vault's pending rewards at settlement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardSettlement {
    /// Gross rewards settled.
    pub gross: Amount,
    /// Rewards credited to stakers.
    pub net: Amount,
    /// Protocol fee share.
    pub fee: Amount,
}

impl Vault {
    /// Create a freshly locked vault owned by the ledger.
    pub fn new(
        slot: VaultSlot,
        assignment: ValidatorAssignment,
        principal: Amount,
        now: Timestamp,
    ) -> StakingResult<Self> {
        let lockup_end = now
            .checked_add(assignment.lockup_duration)
            .ok_or(StakingError::ArithmeticOverflow)?;
        Ok(Self {
            slot,
            validator_id: assignment.validator_id,
            principal,
            pending_rewards: 0,
            lockup_start: now,
            lockup_end,
            owner: VaultOwner::Ledger,
        })
    }

    /// Whether the lock has fully elapsed.
    pub fn is_matured(&self, now: Timestamp) -> bool {
        now >= self.lockup_end
    }

    /// Split pending rewards into staker and protocol shares.
    pub fn reward_split(&self, fee_bips: u32) -> StakingResult<RewardSettlement> {
        let fee = apply_bips(self.pending_rewards, fee_bips).ok_or(StakingError::ArithmeticOverflow)?;
        Ok(RewardSettlement {
            gross: self.pending_rewards,
            net: checked_sub(self.pending_rewards, fee)?,
            fee,
        })
    }

    /// Value attributable to liquid-token holders: principal plus net rewards.
    pub fn current_value(&self, fee_bips: u32) -> StakingResult<Amount> {
        checked_add(self.principal, self.reward_split(fee_bips)?.net)
    }

    /// Restake net rewards into principal; the fee share is returned to the caller.
    pub fn compound_rewards(&mut self, fee_bips: u32) -> StakingResult<RewardSettlement> {
        let split = self.reward_split(fee_bips)?;
        self.principal = checked_add(self.principal, split.net)?;
        self.pending_rewards = 0;
        Ok(split)
    }

    /// Detach all pending rewards from the vault.
    pub fn take_rewards(&mut self, fee_bips: u32) -> StakingResult<RewardSettlement> {
        let split = self.reward_split(fee_bips)?;
        self.pending_rewards = 0;
        Ok(split)
    }
}

/// Harvested vault whose frozen value waits to be folded into the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturedVault {
    /// Slot the vault occupied.
    pub slot: VaultSlot,
    /// Validator that held the delegation.
    pub validator_id: ValidatorId,
    /// Settled value.
    pub value: Amount,
    /// Harvest time.
    pub matured_at: Timestamp,
}

/// Parameters for recording a withdrawal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalParams {
    /// Caller-supplied key.
    pub id: WithdrawalId,
    /// Redeeming account.
    pub requester: Address,
    /// Liquid units burned.
    pub liquid_burned: Amount,
    /// Paid from idle pool.
    pub pool_amount: Amount,
    /// Unstaked from vaults, net of penalty.
    pub undelegate_amount: Amount,
    /// Forfeited to early-unstake penalties.
    pub penalty: Amount,
    /// Request time.
    pub request_timestamp: Timestamp,
}

/// Two-phase withdrawal record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Caller-supplied key.
    pub id: WithdrawalId,
    /// Only account allowed to claim.
    pub requester: Address,
    /// Liquid units burned.
    pub liquid_burned: Amount,
    /// Paid from idle pool.
    pub pool_amount: Amount,
    /// Unstaked from vaults, net of penalty.
    pub undelegate_amount: Amount,
    /// Forfeited to early-unstake penalties.
    pub penalty: Amount,
    /// Request time.
    pub request_timestamp: Timestamp,
    /// Current state.
    pub state: WithdrawalState,
}

impl WithdrawalRequest {
    /// Create a request in the `Requested` state.
    pub fn new(params: WithdrawalParams) -> Self {
        Self {
            id: params.id,
            requester: params.requester,
            liquid_burned: params.liquid_burned,
            pool_amount: params.pool_amount,
            undelegate_amount: params.undelegate_amount,
            penalty: params.penalty,
            request_timestamp: params.request_timestamp,
            state: WithdrawalState::Requested,
        }
    }

    /// Amount paid on claim.
    pub fn payout(&self) -> StakingResult<Amount> {
        checked_add(self.pool_amount, self.undelegate_amount)
    }

    /// Whether the request was claimed.
    pub fn is_fulfilled(&self) -> bool {
        self.state == WithdrawalState::Fulfilled
    }

    /// Transition to new state.
    pub fn transition_to(&mut self, target: WithdrawalState) -> StakingResult<()> {
        if !self.state.can_transition_to(target) {
            return match self.state {
                WithdrawalState::Fulfilled => Err(StakingError::AlreadyFulfilled { id: self.id }),
                WithdrawalState::Requested => Err(StakingError::InvalidState(format!(
                    "withdrawal {} cannot move from {:?} to {:?}",
                    self.id, self.state, target
                ))),
            };
        }
        self.state = target;
        Ok(())
    }
}
