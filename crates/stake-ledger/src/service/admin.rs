//! Treasury-gated configuration setters.

use super::transaction::Transaction;
use crate::domain::{DepositBounds, PauseTarget, StakingError, StakingResult};
use shared_types::{short_address, Address, Amount, DurationSecs, BIPS_DENOMINATOR, ZERO_ADDRESS};
use tracing::info;

impl Transaction<'_> {
    pub(crate) fn set_protocol_fee_bips(&mut self, caller: Address, bips: u32) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        if bips > BIPS_DENOMINATOR {
            return Err(StakingError::OutOfBounds {
                amount: Amount::from(bips),
                min: 0,
                max: Amount::from(BIPS_DENOMINATOR),
            });
        }
        self.state.config.protocol_fee_bips = bips;
        info!("[staking] protocol fee set to {} bips", bips);
        Ok(())
    }

    pub(crate) fn set_deposit_limits(
        &mut self,
        caller: Address,
        min: Amount,
        max: Amount,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        if min > max {
            return Err(StakingError::OutOfBounds {
                amount: min,
                min: 0,
                max,
            });
        }
        self.state.config.deposit_limits = DepositBounds { min, max };
        info!("[staking] deposit limits set to {}..={}", min, max);
        Ok(())
    }

    pub(crate) fn set_withdrawal_delay(
        &mut self,
        caller: Address,
        delay: DurationSecs,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        self.state.config.withdrawal_delay_secs = delay;
        info!("[staking] withdrawal delay set to {}s", delay);
        Ok(())
    }

    pub(crate) fn set_max_vault_count(&mut self, caller: Address, max: u64) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        let floor = self.state.registry.current_vault_count().max(1);
        if max < floor {
            return Err(StakingError::OutOfBounds {
                amount: Amount::from(max),
                min: Amount::from(floor),
                max: Amount::from(u64::MAX),
            });
        }
        self.state.config.max_vault_count = max;
        info!("[staking] max vault count set to {}", max);
        Ok(())
    }

    pub(crate) fn set_pause(
        &mut self,
        caller: Address,
        target: PauseTarget,
        paused: bool,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        self.state.config.pause_flags.set(target, paused);
        info!(
            "[staking] {} {}",
            target,
            if paused { "paused" } else { "resumed" }
        );
        Ok(())
    }

    pub(crate) fn set_treasury(&mut self, caller: Address, treasury: Address) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        if treasury == ZERO_ADDRESS {
            return Err(StakingError::InvalidState(
                "treasury cannot be the zero address".to_string(),
            ));
        }
        self.state.config.treasury = treasury;
        info!("[staking] treasury handed to {}", short_address(&treasury));
        Ok(())
    }

    pub(crate) fn set_reward_reporter(
        &mut self,
        caller: Address,
        reporter: Address,
    ) -> StakingResult<()> {
        self.require_treasury(&caller)?;
        self.state.config.reward_reporter = reporter;
        info!("[staking] reward reporter set to {}", short_address(&reporter));
        Ok(())
    }
}
