//! # Vault Registry
//!
//! Slot-addressed delegation records plus the matured-vault queue.
//!
//! ```text
//!  slot:   0    1    2    3    4    5
//!         [ ]  [ ]  [V]  [V]  [V]  [ ]   <- current_vault_ptr = 5
//!                    ^ oldest active      current_vault_count = 3
//! ```
//!
//! The write pointer only ever advances. Capacity bounds the number of
//! occupied slots, not the slot numbers themselves.

use super::entities::{MaturedVault, Vault};
use super::errors::{checked_add, StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use shared_types::{Amount, VaultSlot};
use std::collections::BTreeMap;

/// Active vaults keyed by slot, and harvested vaults awaiting withdrawal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultRegistry {
    slots: BTreeMap<VaultSlot, Vault>,
    current_vault_ptr: VaultSlot,
    matured: Vec<MaturedVault>,
}

impl VaultRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn current_vault_count(&self) -> u64 {
        self.slots.len() as u64
    }

    /// Next write position.
    pub fn current_vault_ptr(&self) -> VaultSlot {
        self.current_vault_ptr
    }

    /// Vault in `slot`, if occupied.
    pub fn get(&self, slot: VaultSlot) -> Option<&Vault> {
        self.slots.get(&slot)
    }

    /// Mutable vault in `slot`, or `InvalidState` when the slot is empty.
    pub fn get_mut(&mut self, slot: VaultSlot) -> StakingResult<&mut Vault> {
        self.slots.get_mut(&slot).ok_or_else(|| empty_slot(slot))
    }

    /// Vault in `slot`, or `InvalidState` when the slot is empty.
    pub fn require(&self, slot: VaultSlot) -> StakingResult<&Vault> {
        self.slots.get(&slot).ok_or_else(|| empty_slot(slot))
    }

    /// Active vaults in ascending slot order (oldest first).
    pub fn active(&self) -> impl Iterator<Item = &Vault> {
        self.slots.values()
    }

    /// Store `build(slot)` at the write pointer and advance it.
    pub fn push(
        &mut self,
        build: impl FnOnce(VaultSlot) -> StakingResult<Vault>,
    ) -> StakingResult<VaultSlot> {
        let slot = self.current_vault_ptr;
        let next = slot.checked_add(1).ok_or(StakingError::ArithmeticOverflow)?;
        let vault = build(slot)?;
        self.slots.insert(slot, vault);
        self.current_vault_ptr = next;
        Ok(slot)
    }

    /// Relocate the vault in `from` to the empty slot `to`.
    pub fn shift(&mut self, from: VaultSlot, to: VaultSlot) -> StakingResult<()> {
        if !self.slots.contains_key(&from) {
            return Err(empty_slot(from));
        }
        if self.slots.contains_key(&to) {
            return Err(StakingError::InvalidState(format!("slot {to} is occupied")));
        }
        if to >= self.current_vault_ptr {
            return Err(StakingError::InvalidState(format!(
                "slot {to} is beyond the write pointer {}",
                self.current_vault_ptr
            )));
        }
        if let Some(mut vault) = self.slots.remove(&from) {
            vault.slot = to;
            self.slots.insert(to, vault);
        }
        Ok(())
    }

    /// Remove the vault in `slot`.
    pub fn remove(&mut self, slot: VaultSlot) -> StakingResult<Vault> {
        self.slots.remove(&slot).ok_or_else(|| empty_slot(slot))
    }

    /// Sum of active vault values at `fee_bips`.
    pub fn active_value(&self, fee_bips: u32) -> StakingResult<Amount> {
        self.slots.values().try_fold(0, |acc: Amount, vault| {
            checked_add(acc, vault.current_value(fee_bips)?)
        })
    }

    /// Append a harvested vault.
    pub fn push_matured(&mut self, vault: MaturedVault) {
        self.matured.push(vault);
    }

    /// Matured entry at `index`.
    pub fn matured(&self, index: usize) -> Option<&MaturedVault> {
        self.matured.get(index)
    }

    /// Number of matured entries.
    pub fn matured_count(&self) -> usize {
        self.matured.len()
    }

    /// Remove the matured entry at `index`, keeping the order of the rest.
    pub fn take_matured(&mut self, index: usize) -> StakingResult<MaturedVault> {
        if index >= self.matured.len() {
            return Err(StakingError::InvalidState(format!(
                "no matured vault at index {index}"
            )));
        }
        Ok(self.matured.remove(index))
    }

    /// Sum of frozen matured values.
    pub fn matured_value(&self) -> StakingResult<Amount> {
        self.matured
            .iter()
            .try_fold(0, |acc: Amount, vault| checked_add(acc, vault.value))
    }
}

fn empty_slot(slot: VaultSlot) -> StakingError {
    StakingError::InvalidState(format!("slot {slot} is empty"))
}
