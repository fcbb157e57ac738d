//! # Inbound Ports
//!
//! Public surface of the staking core. Every mutating entry point takes the
//! caller identity explicitly; role checks are capability checks against
//! the configured addresses.

use crate::domain::{
    ExchangeRate, MaturedVault, PauseTarget, StakingConfig, StakingResult, ValidatorAssignment,
    Vault, VaultOwner, WithdrawalRequest,
};
use shared_types::{
    Address, Amount, DurationSecs, Timestamp, ValidatorId, VaultSlot, WithdrawalId,
};

/// Liquid staking API - inbound port.
pub trait LiquidStakingApi {
    // ---------------------------------------------------------------------
    // Stake ledger
    // ---------------------------------------------------------------------

    /// Deposit `amount` FTM; returns the liquid units issued.
    fn deposit(&mut self, caller: Address, amount: Amount) -> StakingResult<Amount>;

    /// Idle pool balance.
    fn pool_balance(&self) -> Amount;

    /// Pool plus active and matured vault values.
    fn total_ftm_worth(&self) -> StakingResult<Amount>;

    /// Outstanding liquid units.
    fn liquid_supply(&self) -> Amount;

    /// Derived `total_ftm_worth / liquid_supply`.
    fn exchange_rate(&self) -> StakingResult<ExchangeRate>;

    /// Active configuration.
    fn config(&self) -> &StakingConfig;

    // ---------------------------------------------------------------------
    // Vault registry
    // ---------------------------------------------------------------------

    /// Delegate `amount` from the pool into a new vault (treasury).
    fn lock(&mut self, caller: Address, amount: Amount) -> StakingResult<VaultSlot>;

    /// Move the vault in `from` to the empty slot `to` (treasury).
    fn shift_vault_index(
        &mut self,
        caller: Address,
        from: VaultSlot,
        to: VaultSlot,
    ) -> StakingResult<()>;

    /// Move a matured vault into the matured queue (treasury).
    fn harvest_vault(&mut self, caller: Address, slot: VaultSlot) -> StakingResult<MaturedVault>;

    /// Fold the matured entry at `index` into the pool. Open to any caller.
    fn withdraw_matured(&mut self, caller: Address, index: usize) -> StakingResult<Amount>;

    /// Vault in `slot`.
    fn get_vault(&self, slot: VaultSlot) -> Option<&Vault>;

    /// Current value of the vault in `slot`.
    fn vault_value(&self, slot: VaultSlot) -> StakingResult<Amount>;

    /// Matured entry at `index`.
    fn get_matured_vault(&self, index: usize) -> Option<&MaturedVault>;

    /// Number of matured entries.
    fn matured_vault_count(&self) -> usize;

    /// Occupied slots.
    fn current_vault_count(&self) -> u64;

    /// Next write slot.
    fn current_vault_ptr(&self) -> VaultSlot;

    /// Capacity.
    fn max_vault_count(&self) -> u64;

    // ---------------------------------------------------------------------
    // Rewards
    // ---------------------------------------------------------------------

    /// Accrue gross consensus rewards to a vault (reward reporter).
    fn record_rewards(&mut self, caller: Address, slot: VaultSlot, amount: Amount)
        -> StakingResult<()>;

    /// Move a vault's net rewards into the pool (treasury).
    fn claim_rewards(&mut self, caller: Address, slot: VaultSlot) -> StakingResult<Amount>;

    /// Claim rewards from every ledger-owned vault (treasury).
    fn claim_rewards_all(&mut self, caller: Address) -> StakingResult<Amount>;

    /// Pay accrued protocol fees to the treasury.
    fn collect_protocol_fees(&mut self, caller: Address) -> StakingResult<Amount>;

    /// Accrued, uncollected protocol fees.
    fn protocol_fees(&self) -> Amount;

    // ---------------------------------------------------------------------
    // Withdrawal queue
    // ---------------------------------------------------------------------

    /// Burn liquid units and record a withdrawal request.
    fn undelegate(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        liquid_amount_in: Amount,
        min_ftm_out: Amount,
    ) -> StakingResult<WithdrawalRequest>;

    /// Claim a request once its delay has elapsed; returns the payout.
    fn withdraw(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        min_amount_out: Amount,
    ) -> StakingResult<Amount>;

    /// Request by id.
    fn withdrawal_request(&self, id: WithdrawalId) -> Option<&WithdrawalRequest>;

    // ---------------------------------------------------------------------
    // Validator selector
    // ---------------------------------------------------------------------

    /// Publish the next delegation target (treasury).
    fn set_next_validator_info(
        &mut self,
        caller: Address,
        validator_id: ValidatorId,
        lockup_duration: DurationSecs,
    ) -> StakingResult<()>;

    /// Preview the target a lock of `amount` would use.
    fn next_validator_info(&self, amount: Amount) -> Option<ValidatorAssignment>;

    // ---------------------------------------------------------------------
    // Vault ownership and recovery
    // ---------------------------------------------------------------------

    /// Hand a ledger-owned vault to `new_owner` (treasury).
    fn update_vault_owner(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: Address,
    ) -> StakingResult<()>;

    /// Pass a borrowed vault on, or back to the ledger (current owner).
    fn transfer_vault_ownership(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: VaultOwner,
    ) -> StakingResult<()>;

    /// Penalty a forced unlock of `slot` would cost now.
    fn early_unlock_penalty(&self, slot: VaultSlot) -> StakingResult<Amount>;

    /// End a borrowed vault's lock early (current owner) and hand the vault
    /// to `return_to` in the same commit.
    ///
    /// `payment` must cover principal plus penalty; the principal and any
    /// excess are returned. The figure is attested by the caller and no
    /// FTM moves into the ledger, so only accounts the treasury lent the
    /// vault to through `update_vault_owner` can reach this.
    fn force_unlock_vault(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        payment: Amount,
        return_to: VaultOwner,
    ) -> StakingResult<Amount>;

    // ---------------------------------------------------------------------
    // Administration (treasury)
    // ---------------------------------------------------------------------

    /// Set the protocol fee.
    fn set_protocol_fee_bips(&mut self, caller: Address, bips: u32) -> StakingResult<()>;

    /// Set deposit limits.
    fn set_deposit_limits(&mut self, caller: Address, min: Amount, max: Amount)
        -> StakingResult<()>;

    /// Set the withdrawal delay.
    fn set_withdrawal_delay(&mut self, caller: Address, delay: DurationSecs) -> StakingResult<()>;

    /// Set the registry capacity.
    fn set_max_vault_count(&mut self, caller: Address, max: u64) -> StakingResult<()>;

    /// Pause or resume a feature.
    fn set_pause(&mut self, caller: Address, target: PauseTarget, paused: bool)
        -> StakingResult<()>;

    /// Hand the treasury role to another address.
    fn set_treasury(&mut self, caller: Address, treasury: Address) -> StakingResult<()>;

    /// Replace the reward reporter.
    fn set_reward_reporter(&mut self, caller: Address, reporter: Address) -> StakingResult<()>;

    /// Current time as seen by the ledger.
    fn now(&self) -> Timestamp;
}
