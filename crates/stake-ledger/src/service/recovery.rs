//! Vault ownership hand-off and forced unlock for emergency recovery.
//!
//! A vault lent to a recovery agent keeps counting towards
//! `total_ftm_worth`. The agent pays the early-release penalty out of its
//! own funds, so ending the lock never moves the exchange rate.
//!
//! `force_unlock_vault` takes the payment as stated by the caller; the FTM
//! itself stays with the recovery agent. Reaching it requires a vault the
//! treasury lent out, which bounds who can end a lock early.

use super::transaction::Transaction;
use crate::domain::{checked_add, checked_sub, StakingError, StakingResult, Vault, VaultOwner};
use crate::ports::{DelegationOp, PenaltyPolicy};
use shared_types::{short_address, Address, Amount, Timestamp, VaultSlot};
use tracing::info;

/// Penalty for releasing `vault` at `now`; zero once matured, never above principal.
pub fn unlock_penalty(policy: &dyn PenaltyPolicy, vault: &Vault, now: Timestamp) -> Amount {
    if vault.is_matured(now) {
        return 0;
    }
    policy
        .penalty(vault.lockup_start, vault.lockup_end, now, vault.principal)
        .min(vault.principal)
}

impl Transaction<'_> {
    pub(crate) fn update_vault_owner(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: Address,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        let vault = self.state.registry.get_mut(slot)?;
        if !vault.owner.is_ledger() {
            return Err(StakingError::NotOwner { slot });
        }
        vault.owner = VaultOwner::Account(new_owner);
        info!(
            "[staking] vault {} lent to {}",
            slot,
            short_address(&new_owner)
        );
        Ok(())
    }

    pub(crate) fn transfer_vault_ownership(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: VaultOwner,
    ) -> StakingResult<()> {
        let vault = self.state.registry.get_mut(slot)?;
        if !vault.owner.is_account(&caller) {
            return Err(StakingError::NotOwner { slot });
        }
        vault.owner = new_owner;
        match new_owner {
            VaultOwner::Ledger => info!("[staking] vault {} returned to the ledger", slot),
            VaultOwner::Account(account) => info!(
                "[staking] vault {} passed from {} to {}",
                slot,
                short_address(&caller),
                short_address(&account)
            ),
        }
        Ok(())
    }

    pub(crate) fn force_unlock_vault(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        payment: Amount,
        return_to: VaultOwner,
    ) -> StakingResult<Amount> {
        let now = self.now;
        let penalty_policy = self.deps.penalty.clone();
        let vault = self.state.registry.get_mut(slot)?;
        if !vault.owner.is_account(&caller) {
            return Err(StakingError::NotOwner { slot });
        }

        let penalty = unlock_penalty(penalty_policy.as_ref(), vault, now);
        let required = checked_add(vault.principal, penalty)?;
        if payment < required {
            return Err(StakingError::InsufficientFunds {
                required,
                available: payment,
            });
        }
        if !vault.is_matured(now) {
            vault.lockup_end = now;
        }
        vault.owner = return_to;
        let validator_id = vault.validator_id;
        let principal = vault.principal;

        self.state.penalties_forfeited = checked_add(self.state.penalties_forfeited, penalty)?;
        self.submit(DelegationOp::Unlock {
            validator_id,
            slot,
            principal,
            penalty,
        });
        info!(
            "[staking] vault {} force-unlocked by {}: principal {}, penalty {}, returned {}",
            slot,
            short_address(&caller),
            principal,
            penalty,
            return_to.is_ledger()
        );
        checked_sub(payment, penalty)
    }
}
