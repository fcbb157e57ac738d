//! Deposits into the idle pool.

use super::transaction::Transaction;
use crate::algorithms::liquid_for_deposit;
use crate::domain::{checked_add, PauseTarget, StakingError, StakingResult};
use shared_types::{short_address, Address, Amount};
use tracing::info;

impl Transaction<'_> {
    pub(crate) fn deposit(&mut self, caller: Address, amount: Amount) -> StakingResult<Amount> {
        self.ensure_active(PauseTarget::Deposit)?;
        let limits = self.state.config.deposit_limits;
        if amount == 0 {
            return Err(StakingError::OutOfBounds {
                amount,
                min: limits.min.max(1),
                max: limits.max,
            });
        }
        limits.check(amount)?;

        let worth = self.state.total_ftm_worth()?;
        let supply = self.deps.token.total_supply();
        let minted = liquid_for_deposit(amount, worth, supply)?;
        if minted == 0 {
            return Err(StakingError::OutOfBounds {
                amount,
                min: limits.min,
                max: limits.max,
            });
        }

        self.state.pool_balance = checked_add(self.state.pool_balance, amount)?;
        self.mint(caller, minted);

        info!(
            "[staking] deposit {} from {} -> {} liquid",
            amount,
            short_address(&caller),
            minted
        );
        Ok(minted)
    }
}
