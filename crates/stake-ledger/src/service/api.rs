//! [`LiquidStakingApi`] for [`StakeLedger`].

use super::{unlock_penalty, StakeLedger};
use crate::algorithms::exchange_rate;
use crate::domain::{
    invariant_treasury, ExchangeRate, MaturedVault, PauseTarget, StakingConfig, StakingResult,
    ValidatorAssignment, Vault, VaultOwner, WithdrawalRequest,
};
use crate::ports::LiquidStakingApi;
use shared_types::{
    Address, Amount, DurationSecs, Timestamp, ValidatorId, VaultSlot, WithdrawalId,
};

impl LiquidStakingApi for StakeLedger {
    fn deposit(&mut self, caller: Address, amount: Amount) -> StakingResult<Amount> {
        self.execute("deposit", |tx| tx.deposit(caller, amount))
    }

    fn pool_balance(&self) -> Amount {
        self.state.pool_balance
    }

    fn total_ftm_worth(&self) -> StakingResult<Amount> {
        self.state.total_ftm_worth()
    }

    fn liquid_supply(&self) -> Amount {
        self.deps.token.total_supply()
    }

    fn exchange_rate(&self) -> StakingResult<ExchangeRate> {
        exchange_rate(self.state.total_ftm_worth()?, self.liquid_supply())
    }

    fn config(&self) -> &StakingConfig {
        &self.state.config
    }

    fn lock(&mut self, caller: Address, amount: Amount) -> StakingResult<VaultSlot> {
        self.execute("lock", |tx| tx.lock(caller, amount))
    }

    fn shift_vault_index(
        &mut self,
        caller: Address,
        from: VaultSlot,
        to: VaultSlot,
    ) -> StakingResult<()> {
        self.execute("shift_vault_index", |tx| tx.shift_vault_index(caller, from, to))
    }

    fn harvest_vault(&mut self, caller: Address, slot: VaultSlot) -> StakingResult<MaturedVault> {
        self.execute("harvest_vault", |tx| tx.harvest_vault(caller, slot))
    }

    fn withdraw_matured(&mut self, caller: Address, index: usize) -> StakingResult<Amount> {
        self.execute("withdraw_matured", |tx| tx.withdraw_matured(caller, index))
    }

    fn get_vault(&self, slot: VaultSlot) -> Option<&Vault> {
        self.state.registry.get(slot)
    }

    fn vault_value(&self, slot: VaultSlot) -> StakingResult<Amount> {
        self.state
            .registry
            .require(slot)?
            .current_value(self.state.config.protocol_fee_bips)
    }

    fn get_matured_vault(&self, index: usize) -> Option<&MaturedVault> {
        self.state.registry.matured(index)
    }

    fn matured_vault_count(&self) -> usize {
        self.state.registry.matured_count()
    }

    fn current_vault_count(&self) -> u64 {
        self.state.registry.current_vault_count()
    }

    fn current_vault_ptr(&self) -> VaultSlot {
        self.state.registry.current_vault_ptr()
    }

    fn max_vault_count(&self) -> u64 {
        self.state.config.max_vault_count
    }

    fn record_rewards(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        amount: Amount,
    ) -> StakingResult<()> {
        self.execute("record_rewards", |tx| tx.record_rewards(caller, slot, amount))
    }

    fn claim_rewards(&mut self, caller: Address, slot: VaultSlot) -> StakingResult<Amount> {
        self.execute("claim_rewards", |tx| tx.claim_rewards(caller, slot))
    }

    fn claim_rewards_all(&mut self, caller: Address) -> StakingResult<Amount> {
        self.execute("claim_rewards_all", |tx| tx.claim_rewards_all(caller))
    }

    fn collect_protocol_fees(&mut self, caller: Address) -> StakingResult<Amount> {
        self.execute("collect_protocol_fees", |tx| tx.collect_protocol_fees(caller))
    }

    fn protocol_fees(&self) -> Amount {
        self.state.protocol_fees
    }

    fn undelegate(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        liquid_amount_in: Amount,
        min_ftm_out: Amount,
    ) -> StakingResult<WithdrawalRequest> {
        self.execute("undelegate", |tx| {
            tx.undelegate(caller, id, liquid_amount_in, min_ftm_out)
        })
    }

    fn withdraw(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        min_amount_out: Amount,
    ) -> StakingResult<Amount> {
        self.execute("withdraw", |tx| tx.withdraw(caller, id, min_amount_out))
    }

    fn withdrawal_request(&self, id: WithdrawalId) -> Option<&WithdrawalRequest> {
        self.state.withdrawals.get(id)
    }

    fn set_next_validator_info(
        &mut self,
        caller: Address,
        validator_id: ValidatorId,
        lockup_duration: DurationSecs,
    ) -> StakingResult<()> {
        invariant_treasury(&self.state.config, &caller)?;
        self.deps
            .selector
            .set_next(ValidatorAssignment::new(validator_id, lockup_duration));
        Ok(())
    }

    fn next_validator_info(&self, amount: Amount) -> Option<ValidatorAssignment> {
        self.deps.selector.next_validator(amount)
    }

    fn update_vault_owner(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: Address,
    ) -> StakingResult<()> {
        self.execute("update_vault_owner", |tx| {
            tx.update_vault_owner(caller, slot, new_owner)
        })
    }

    fn transfer_vault_ownership(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        new_owner: VaultOwner,
    ) -> StakingResult<()> {
        self.execute("transfer_vault_ownership", |tx| {
            tx.transfer_vault_ownership(caller, slot, new_owner)
        })
    }

    fn early_unlock_penalty(&self, slot: VaultSlot) -> StakingResult<Amount> {
        let vault = self.state.registry.require(slot)?;
        Ok(unlock_penalty(
            self.deps.penalty.as_ref(),
            vault,
            self.deps.clock.now(),
        ))
    }

    fn force_unlock_vault(
        &mut self,
        caller: Address,
        slot: VaultSlot,
        payment: Amount,
        return_to: VaultOwner,
    ) -> StakingResult<Amount> {
        self.execute("force_unlock_vault", |tx| {
            tx.force_unlock_vault(caller, slot, payment, return_to)
        })
    }

    fn set_protocol_fee_bips(&mut self, caller: Address, bips: u32) -> StakingResult<()> {
        self.execute("set_protocol_fee_bips", |tx| tx.set_protocol_fee_bips(caller, bips))
    }

    fn set_deposit_limits(
        &mut self,
        caller: Address,
        min: Amount,
        max: Amount,
    ) -> StakingResult<()> {
        self.execute("set_deposit_limits", |tx| tx.set_deposit_limits(caller, min, max))
    }

    fn set_withdrawal_delay(&mut self, caller: Address, delay: DurationSecs) -> StakingResult<()> {
        self.execute("set_withdrawal_delay", |tx| tx.set_withdrawal_delay(caller, delay))
    }

    fn set_max_vault_count(&mut self, caller: Address, max: u64) -> StakingResult<()> {
        self.execute("set_max_vault_count", |tx| tx.set_max_vault_count(caller, max))
    }

    fn set_pause(
        &mut self,
        caller: Address,
        target: PauseTarget,
        paused: bool,
    ) -> StakingResult<()> {
        self.execute("set_pause", |tx| tx.set_pause(caller, target, paused))
    }

    fn set_treasury(&mut self, caller: Address, treasury: Address) -> StakingResult<()> {
        self.execute("set_treasury", |tx| tx.set_treasury(caller, treasury))
    }

    fn set_reward_reporter(&mut self, caller: Address, reporter: Address) -> StakingResult<()> {
        self.execute("set_reward_reporter", |tx| tx.set_reward_reporter(caller, reporter))
    }

    fn now(&self) -> Timestamp {
        self.deps.clock.now()
    }
}
