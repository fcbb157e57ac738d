//! Withdrawal queue operations: `undelegate` then `withdraw`.
//!
//! The requester bears any early-unstake penalty. Total worth drops by
//! exactly the FTM owed for the burned units and the requester is credited
//! that amount less the penalty, so the remaining holders are not charged.
//! The owed amount is floored in `ftm_for_liquid`; that rounding is the only
//! drift and it can move the rate up by a unit, never down.

use super::transaction::Transaction;
use crate::algorithms::{ftm_for_liquid, plan_shortfall, ShortfallPlan, VaultDrain};
use crate::domain::{
    checked_add, checked_sub, invariant_min_out, invariant_withdrawal_eligible, PauseTarget,
    StakingError, StakingResult, WithdrawalParams, WithdrawalRequest, WithdrawalState,
};
use crate::ports::DelegationOp;
use shared_types::{short_address, Address, Amount, WithdrawalId};
use tracing::info;

impl Transaction<'_> {
    pub(crate) fn undelegate(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        liquid_amount_in: Amount,
        min_ftm_out: Amount,
    ) -> StakingResult<WithdrawalRequest> {
        self.ensure_active(PauseTarget::Undelegate)?;
        if self.state.withdrawals.contains(id) {
            return Err(StakingError::DuplicateId { id });
        }
        let held = self.deps.token.balance_of(&caller);
        if liquid_amount_in == 0 {
            return Err(StakingError::OutOfBounds {
                amount: 0,
                min: 1,
                max: held,
            });
        }
        if held < liquid_amount_in {
            return Err(StakingError::InsufficientLiquidBalance {
                required: liquid_amount_in,
                available: held,
            });
        }

        let worth = self.state.total_ftm_worth()?;
        let supply = self.deps.token.total_supply();
        let ftm_due = ftm_for_liquid(liquid_amount_in, worth, supply)?;

        let pool_amount = ftm_due.min(self.state.pool_balance);
        let shortfall = ftm_due - pool_amount;
        let plan = if shortfall > 0 {
            plan_shortfall(
                self.state.registry.active(),
                shortfall,
                self.fee_bips(),
                self.now,
                self.deps.penalty.as_ref(),
            )?
        } else {
            ShortfallPlan::default()
        };
        let undelegate_amount = plan.undelegate_amount()?;
        invariant_min_out(checked_add(pool_amount, undelegate_amount)?, min_ftm_out)?;

        self.state.pool_balance -= pool_amount;
        for drain in &plan.drains {
            self.drain_vault(drain)?;
        }
        self.state.penalties_forfeited = checked_add(self.state.penalties_forfeited, plan.penalty)?;

        let request = WithdrawalRequest::new(WithdrawalParams {
            id,
            requester: caller,
            liquid_burned: liquid_amount_in,
            pool_amount,
            undelegate_amount,
            penalty: plan.penalty,
            request_timestamp: self.now,
        });
        self.state.reserved_for_withdrawals =
            checked_add(self.state.reserved_for_withdrawals, request.payout()?)?;
        self.state.withdrawals.insert(request.clone())?;
        self.burn(caller, liquid_amount_in);

        info!(
            "[staking] undelegate #{} by {}: {} liquid -> pool {} + vaults {} (penalty {})",
            id,
            short_address(&caller),
            liquid_amount_in,
            pool_amount,
            undelegate_amount,
            plan.penalty
        );
        Ok(request)
    }

    /// Unstake part of one vault; an emptied vault leaves the registry.
    fn drain_vault(&mut self, drain: &VaultDrain) -> StakingResult<()> {
        self.compound_vault(drain.slot)?;
        let vault = self.state.registry.get_mut(drain.slot)?;
        vault.principal = checked_sub(vault.principal, drain.unstaked)?;
        if (vault.principal == 0) != drain.closes_vault {
            return Err(StakingError::InvalidState(format!(
                "vault {} drained off plan",
                drain.slot
            )));
        }
        if drain.closes_vault {
            self.state.registry.remove(drain.slot)?;
        }
        self.submit(DelegationOp::Undelegate {
            validator_id: drain.validator_id,
            slot: drain.slot,
            amount: drain.unstaked,
            penalty: drain.penalty,
        });
        Ok(())
    }

    pub(crate) fn withdraw(
        &mut self,
        caller: Address,
        id: WithdrawalId,
        min_amount_out: Amount,
    ) -> StakingResult<Amount> {
        self.ensure_active(PauseTarget::Withdraw)?;
        let delay = self.state.config.withdrawal_delay_secs;
        let now = self.now;

        let request = self.state.withdrawals.get_mut(id)?;
        if request.requester != caller {
            return Err(StakingError::Unauthorized { caller });
        }
        if request.is_fulfilled() {
            return Err(StakingError::AlreadyFulfilled { id });
        }
        invariant_withdrawal_eligible(request.request_timestamp, delay, now)?;
        let payout = request.payout()?;
        invariant_min_out(payout, min_amount_out)?;
        request.transition_to(WithdrawalState::Fulfilled)?;

        self.state.reserved_for_withdrawals =
            checked_sub(self.state.reserved_for_withdrawals, payout)?;
        self.pay(caller, payout)?;

        info!(
            "[staking] withdraw #{} pays {} to {}",
            id,
            payout,
            short_address(&caller)
        );
        Ok(payout)
    }
}
