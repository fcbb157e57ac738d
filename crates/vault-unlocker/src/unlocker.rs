//! Emergency unlocker agent.

use serde::{Deserialize, Serialize};
use shared_types::{short_address, Address, Amount, VaultSlot};
use stake_ledger::{LiquidStakingApi, NativeTransfer, StakingError, StakingResult, VaultOwner};
use std::sync::Arc;
use tracing::{info, warn};

/// Authorised identities of the unlocker; both may be the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockerRoles {
    /// May unlock vaults and hand them back.
    pub operator: Address,
    /// Receives the swept balance.
    pub owner: Address,
}

impl UnlockerRoles {
    /// One address holding both roles.
    pub fn single(address: Address) -> Self {
        Self {
            operator: address,
            owner: address,
        }
    }
}

/// Outcome of a successful unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockReceipt {
    /// Vault slot.
    pub slot: VaultSlot,
    /// Principal paid in and reclaimed.
    pub principal: Amount,
    /// Penalty paid out of the unlocker's balance.
    pub penalty_paid: Amount,
}

/// Holds FTM to cover early-release penalties of borrowed vaults.
pub struct VaultUnlocker {
    address: Address,
    roles: UnlockerRoles,
    balance: Amount,
    transfer: Arc<dyn NativeTransfer>,
}

impl VaultUnlocker {
    /// New, unfunded unlocker living at `address`.
    pub fn new(address: Address, roles: UnlockerRoles, transfer: Arc<dyn NativeTransfer>) -> Self {
        Self {
            address,
            roles,
            balance: 0,
            transfer,
        }
    }

    /// Identity the ledger sees as vault owner.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Configured roles.
    pub fn roles(&self) -> UnlockerRoles {
        self.roles
    }

    /// FTM currently held.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Credit incoming FTM.
    pub fn receive(&mut self, amount: Amount) -> StakingResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// End the lock of a vault lent to this unlocker and return it to the ledger.
    ///
    /// Pays principal plus the current penalty, gets the principal back, so
    /// the balance drops by exactly the penalty. Unlock and hand-back are one
    /// ledger commit; on error neither the ledger nor the balance changes.
    pub fn unlock_vault<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        slot: VaultSlot,
    ) -> StakingResult<UnlockReceipt>
    where
        L: LiquidStakingApi + ?Sized,
    {
        self.require_operator(&caller)?;
        let principal = self.borrowed_principal(ledger, slot)?;
        let penalty = ledger.early_unlock_penalty(slot)?;
        let required = principal
            .checked_add(penalty)
            .ok_or(StakingError::ArithmeticOverflow)?;
        if self.balance < required {
            return Err(StakingError::InsufficientFunds {
                required,
                available: self.balance,
            });
        }

        let refund =
            ledger.force_unlock_vault(self.address, slot, required, VaultOwner::Ledger)?;
        self.balance = self.balance - required + refund;

        info!(
            "[unlocker] vault {} unlocked: principal {}, penalty {}, balance {}",
            slot, principal, penalty, self.balance
        );
        Ok(UnlockReceipt {
            slot,
            principal,
            penalty_paid: penalty,
        })
    }

    /// Hand a borrowed vault back to the ledger without unlocking it.
    pub fn revert_ownership<L>(
        &mut self,
        ledger: &mut L,
        caller: Address,
        slot: VaultSlot,
    ) -> StakingResult<()>
    where
        L: LiquidStakingApi + ?Sized,
    {
        self.require_operator(&caller)?;
        self.borrowed_principal(ledger, slot)?;
        ledger.transfer_vault_ownership(self.address, slot, VaultOwner::Ledger)?;
        info!("[unlocker] vault {} returned to the ledger", slot);
        Ok(())
    }

    /// Sweep the whole balance to the owner role.
    pub fn retrieve_ftm(&mut self, caller: Address) -> StakingResult<Amount> {
        if caller != self.roles.owner {
            return Err(StakingError::Unauthorized { caller });
        }
        let amount = std::mem::take(&mut self.balance);
        if amount == 0 {
            return Ok(0);
        }
        if let Err(err) = self.transfer.send(&self.roles.owner, amount) {
            warn!("[unlocker] sweep of {} failed: {}", amount, err);
            self.balance = amount;
            return Err(err);
        }
        info!(
            "[unlocker] {} swept to {}",
            amount,
            short_address(&self.roles.owner)
        );
        Ok(amount)
    }

    fn require_operator(&self, caller: &Address) -> StakingResult<()> {
        if *caller != self.roles.operator {
            return Err(StakingError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    fn borrowed_principal<L>(&self, ledger: &L, slot: VaultSlot) -> StakingResult<Amount>
    where
        L: LiquidStakingApi + ?Sized,
    {
        match ledger.get_vault(slot) {
            Some(vault) if vault.owner.is_account(&self.address) => Ok(vault.principal),
            _ => Err(StakingError::NotOwner { slot }),
        }
    }
}
