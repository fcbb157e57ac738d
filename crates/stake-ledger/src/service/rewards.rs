//! Reward accrual, claiming and protocol fee collection.
//!
//! Rewards raise `total_ftm_worth` when they are recorded. Claiming and
//! compounding only move value between buckets; the fee share is set
//! aside in `protocol_fees`, outside the worth.

use super::transaction::Transaction;
use crate::domain::{checked_add, RewardSettlement, StakingError, StakingResult};
use crate::ports::DelegationOp;
use shared_types::{short_address, Address, Amount, VaultSlot};
use tracing::info;

impl Transaction<'_> {
    pub(crate) fn record_rewards(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        amount: Amount,
    ) -> StakingResult<()> {
        if caller != self.state.config.reward_reporter {
            return Err(StakingError::Unauthorized { caller });
        }
        if amount == 0 {
            return Err(StakingError::OutOfBounds {
                amount,
                min: 1,
                max: Amount::MAX,
            });
        }
        let vault = self.state.registry.get_mut(slot)?;
        vault.pending_rewards = checked_add(vault.pending_rewards, amount)?;
        info!("[staking] vault {} accrued {} rewards", slot, amount);
        Ok(())
    }

    pub(crate) fn claim_rewards(&mut self, caller: Address, slot: VaultSlot) -> StakingResult<Amount> {
        self.require_treasury(&caller)?;
        if !self.state.registry.require(slot)?.owner.is_ledger() {
            return Err(StakingError::NotOwner { slot });
        }
        Ok(self.claim_vault_rewards(slot)?.net)
    }

    pub(crate) fn claim_rewards_all(&mut self, caller: Address) -> StakingResult<Amount> {
        self.require_treasury(&caller)?;
        let slots: Vec<VaultSlot> = self
            .state
            .registry
            .active()
            .filter(|vault| vault.owner.is_ledger() && vault.pending_rewards > 0)
            .map(|vault| vault.slot)
            .collect();

        let mut claimed: Amount = 0;
        for slot in slots {
            claimed = checked_add(claimed, self.claim_vault_rewards(slot)?.net)?;
        }
        Ok(claimed)
    }

    pub(crate) fn collect_protocol_fees(&mut self, caller: Address) -> StakingResult<Amount> {
        self.require_treasury(&caller)?;
        let fees = self.state.protocol_fees;
        if fees == 0 {
            return Ok(0);
        }
        self.state.protocol_fees = 0;
        self.pay(caller, fees)?;
        info!(
            "[staking] {} protocol fees collected by {}",
            fees,
            short_address(&caller)
        );
        Ok(fees)
    }

    /// Pay a vault's net rewards into the pool.
    fn claim_vault_rewards(&mut self, slot: VaultSlot) -> StakingResult<RewardSettlement> {
        let fee_bips = self.fee_bips();
        let vault = self.state.registry.get_mut(slot)?;
        let split = vault.take_rewards(fee_bips)?;
        let validator_id = vault.validator_id;
        if split.gross == 0 {
            return Ok(split);
        }

        self.state.pool_balance = checked_add(self.state.pool_balance, split.net)?;
        self.state.protocol_fees = checked_add(self.state.protocol_fees, split.fee)?;
        self.submit(DelegationOp::ClaimRewards {
            validator_id,
            slot,
            amount: split.gross,
        });
        info!(
            "[staking] vault {} rewards claimed: {} to pool, {} fee",
            slot, split.net, split.fee
        );
        Ok(split)
    }

    /// Restake a vault's net rewards into its principal.
    pub(crate) fn compound_vault(&mut self, slot: VaultSlot) -> StakingResult<RewardSettlement> {
        let fee_bips = self.fee_bips();
        let vault = self.state.registry.get_mut(slot)?;
        let split = vault.compound_rewards(fee_bips)?;
        let validator_id = vault.validator_id;
        if split.gross == 0 {
            return Ok(split);
        }

        self.state.protocol_fees = checked_add(self.state.protocol_fees, split.fee)?;
        if split.fee > 0 {
            self.submit(DelegationOp::ClaimRewards {
                validator_id,
                slot,
                amount: split.fee,
            });
        }
        if split.net > 0 {
            self.submit(DelegationOp::RestakeRewards {
                validator_id,
                slot,
                amount: split.net,
            });
        }
        Ok(split)
    }
}
