//! # Ledger State
//!
//! The explicit state object every operation reads and rewrites. It is
//! cloned per operation, mutated, and swapped in only after commit.

use super::config::StakingConfig;
use super::errors::{checked_add, StakingResult};
use super::registry::VaultRegistry;
use super::withdrawals::WithdrawalQueue;
use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Complete persisted ledger state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Configuration and roles.
    pub config: StakingConfig,
    /// Idle FTM usable for locks and withdrawals.
    pub pool_balance: Amount,
    /// Active and matured vaults.
    pub registry: VaultRegistry,
    /// Withdrawal requests.
    pub withdrawals: WithdrawalQueue,
    /// FTM owed to unclaimed withdrawal requests.
    pub reserved_for_withdrawals: Amount,
    /// Protocol fees accrued, not yet collected.
    pub protocol_fees: Amount,
    /// Cumulative early-unstake penalties forfeited to the consensus layer.
    pub penalties_forfeited: Amount,
}

impl LedgerState {
    /// Fresh state for `config`.
    pub fn new(config: StakingConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Pool plus active vault values plus matured values.
    pub fn total_ftm_worth(&self) -> StakingResult<Amount> {
        let active = self.registry.active_value(self.config.protocol_fee_bips)?;
        let matured = self.registry.matured_value()?;
        checked_add(checked_add(self.pool_balance, active)?, matured)
    }

    /// FTM held outside the consensus layer: pool, reserved withdrawals,
    /// matured values and fees.
    pub fn held_funds(&self) -> StakingResult<Amount> {
        let liquid = checked_add(self.pool_balance, self.reserved_for_withdrawals)?;
        let settled = checked_add(self.registry.matured_value()?, self.protocol_fees)?;
        checked_add(liquid, settled)
    }
}
