//! Vault registry operations: lock, compaction, harvest and matured withdrawal.
//!
//! All of these reclassify value between the pool, active vaults and the
//! matured queue. None of them may move `total_ftm_worth`.

use super::transaction::Transaction;
use crate::domain::{
    checked_add, checked_sub, invariant_capacity, invariant_worth_preserved, MaturedVault,
    PauseTarget, StakingError, StakingResult, Vault,
};
use crate::ports::DelegationOp;
use shared_types::{short_address, Address, Amount, VaultSlot};
use tracing::info;

impl Transaction<'_> {
    pub(crate) fn lock(&mut self, caller: Address, amount: Amount) -> StakingResult<VaultSlot> {
        self.require_treasury(&caller)?;
        self.ensure_active(PauseTarget::Maintenance)?;
        if amount == 0 {
            return Err(StakingError::OutOfBounds {
                amount,
                min: 1,
                max: self.state.pool_balance,
            });
        }
        invariant_capacity(
            self.state.registry.current_vault_count(),
            self.state.config.max_vault_count,
        )?;
        if amount > self.state.pool_balance {
            return Err(StakingError::InsufficientPoolBalance {
                required: amount,
                available: self.state.pool_balance,
            });
        }
        let assignment = self
            .deps
            .selector
            .next_validator(amount)
            .ok_or(StakingError::NoValidatorAssigned)?;

        let worth = self.state.total_ftm_worth()?;
        let now = self.now;
        let slot = self
            .state
            .registry
            .push(|slot| Vault::new(slot, assignment, amount, now))?;
        self.state.pool_balance -= amount;
        self.ensure_worth_preserved(worth)?;

        self.consume_assignment(assignment);
        self.submit(DelegationOp::Delegate {
            validator_id: assignment.validator_id,
            slot,
            amount,
        });
        info!(
            "[staking] locked {} in slot {} with validator {} for {}s",
            amount, slot, assignment.validator_id, assignment.lockup_duration
        );
        Ok(slot)
    }

    pub(crate) fn shift_vault_index(
        &mut self,
        caller: Address,
        from: VaultSlot,
        to: VaultSlot,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        self.state.registry.shift(from, to)?;
        info!("[staking] vault moved from slot {} to slot {}", from, to);
        Ok(())
    }

    pub(crate) fn harvest_vault(
        &mut self,
        caller: Address,
        slot: VaultSlot,
    ) -> StakingResult<MaturedVault> {
        self.require_treasury(&caller)?;
        self.ensure_active(PauseTarget::Maintenance)?;
        let vault = self.state.registry.require(slot)?;
        if !vault.owner.is_ledger() {
            return Err(StakingError::NotOwner { slot });
        }
        if !vault.is_matured(self.now) {
            return Err(StakingError::InvalidState(format!(
                "vault {} locked until {}",
                slot, vault.lockup_end
            )));
        }

        let worth = self.state.total_ftm_worth()?;
        self.compound_vault(slot)?;
        let vault = self.state.registry.remove(slot)?;
        let matured = MaturedVault {
            slot,
            validator_id: vault.validator_id,
            value: vault.principal,
            matured_at: self.now,
        };
        self.state.registry.push_matured(matured.clone());
        self.ensure_worth_preserved(worth)?;

        self.submit(DelegationOp::Withdraw {
            validator_id: vault.validator_id,
            slot,
            amount: vault.principal,
        });
        info!(
            "[staking] harvested slot {}: {} moved to matured queue",
            slot, matured.value
        );
        Ok(matured)
    }

    pub(crate) fn withdraw_matured(
        &mut self,
        caller: Address,
        index: usize,
    ) -> StakingResult<Amount> {
        self.ensure_active(PauseTarget::Maintenance)?;
        let worth = self.state.total_ftm_worth()?;
        let matured = self.state.registry.take_matured(index)?;
        self.state.pool_balance = checked_add(self.state.pool_balance, matured.value)?;
        self.ensure_worth_preserved(worth)?;

        info!(
            "[staking] matured vault from slot {} folded {} into the pool by {}",
            matured.slot,
            matured.value,
            short_address(&caller)
        );
        Ok(matured.value)
    }

    fn ensure_worth_preserved(&self, before: Amount) -> StakingResult<()> {
        let after = self.state.total_ftm_worth()?;
        if !invariant_worth_preserved(before, after) {
            return Err(StakingError::InvalidState(format!(
                "worth drifted by {}",
                checked_sub(before.max(after), before.min(after))?
            )));
        }
        Ok(())
    }
}
