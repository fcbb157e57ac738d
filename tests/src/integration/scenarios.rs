//! # Core Staking Flows
//!
//! Deposit, lock, reward accrual and the two-phase withdrawal, driven
//! through the public ledger API.

#[cfg(test)]
mod tests {
    use super::super::*;
    use anyhow::Result;
    use stake_ledger::{
        DelegationOp, ExchangeRate, LinearLockPenalty, LiquidToken, NoPenalty, StakingError,
        WithdrawalState,
    };

    // =========================================================================
    // SCENARIOS A-D
    // =========================================================================

    #[test]
    fn test_scenario_a_deposits_at_par() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;

        p.ledger.deposit(ALICE, ftm(100))?;
        assert_eq!(p.ledger.liquid_supply(), ftm(100));
        assert_eq!(p.ledger.total_ftm_worth()?, ftm(100));
        assert_eq!(p.ledger.exchange_rate()?, ExchangeRate::ONE);

        p.ledger.deposit(BOB, ftm(50))?;
        assert_eq!(p.ledger.total_ftm_worth()?, ftm(150));
        assert_eq!(p.ledger.liquid_supply(), ftm(150));
        assert_eq!(p.ledger.exchange_rate()?, ExchangeRate::ONE);
        Ok(())
    }

    #[test]
    fn test_scenario_b_lock_is_reclassification() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        p.ledger.deposit(BOB, ftm(50))?;

        p.lock(7, ftm(100))?;

        assert_eq!(p.ledger.pool_balance(), ftm(50));
        assert_eq!(p.ledger.current_vault_count(), 1);
        assert_eq!(p.ledger.total_ftm_worth()?, ftm(150));
        assert_eq!(p.consensus.delegated(7), ftm(100));
        Ok(())
    }

    #[test]
    fn test_scenario_c_rewards_raise_rate() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        p.ledger.deposit(BOB, ftm(50))?;
        let slot = p.lock(7, ftm(100))?;
        let rate = p.ledger.exchange_rate()?;

        p.ledger.record_rewards(REPORTER, slot, ftm(1))?;

        assert_eq!(p.ledger.vault_value(slot)?, ftm(101));
        assert_eq!(p.ledger.total_ftm_worth()?, ftm(151));
        assert_eq!(p.ledger.pool_balance(), ftm(50));
        assert!(p.ledger.exchange_rate()? > rate);
        Ok(())
    }

    #[test]
    fn test_scenario_d_pool_only_withdrawal() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(150))?;
        p.lock(7, ftm(100))?;

        let request = p.ledger.undelegate(ALICE, 11, ftm(30), 0)?;
        assert_eq!(request.undelegate_amount, 0);
        assert_eq!(request.penalty, 0);
        assert_eq!(request.pool_amount, ftm(30));

        let delay = p.ledger.config().withdrawal_delay_secs;
        p.clock.advance(delay - 1);
        assert!(matches!(
            p.ledger.withdraw(ALICE, 11, 0),
            Err(StakingError::NotYetEligible { .. })
        ));

        p.clock.advance(1);
        assert_eq!(p.ledger.withdraw(ALICE, 11, 0)?, ftm(30));
        assert_eq!(p.transfer.received(&ALICE), ftm(30));
        let request = p.ledger.withdrawal_request(11).map(|r| r.state);
        assert_eq!(request, Some(WithdrawalState::Fulfilled));
        assert_eq!(
            p.ledger.withdraw(ALICE, 11, 0),
            Err(StakingError::AlreadyFulfilled { id: 11 })
        );
        Ok(())
    }

    // =========================================================================
    // SHORTFALL AND PENALTIES
    // =========================================================================

    #[test]
    fn test_penalized_shortfall_end_to_end() -> Result<()> {
        let mut p = Protocol::new(Arc::new(LinearLockPenalty::new(1_000)))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        p.ledger.deposit(BOB, ftm(100))?;
        let oldest = p.lock(1, ftm(80))?;
        p.lock(2, ftm(80))?;
        p.clock.advance(LOCKUP / 2);
        let rate = p.ledger.exchange_rate()?;

        // pool 40, shortfall 60 from the oldest vault at a 5% penalty
        let request = p.ledger.undelegate(ALICE, 1, ftm(100), 0)?;

        assert_eq!(request.pool_amount, ftm(40));
        assert_eq!(request.penalty, ftm(3));
        assert_eq!(request.undelegate_amount, ftm(57));
        assert_eq!(p.ledger.get_vault(oldest).map(|v| v.principal), Some(ftm(20)));
        assert_eq!(p.ledger.total_ftm_worth()?, ftm(100));
        assert_eq!(p.ledger.exchange_rate()?, rate);
        assert_eq!(p.consensus.penalties(), ftm(3));
        assert_eq!(p.token.balance_of(&ALICE), 0);

        p.clock.advance(p.ledger.config().withdrawal_delay_secs);
        assert_eq!(p.ledger.withdraw(ALICE, 1, ftm(97))?, ftm(97));
        Ok(())
    }

    #[test]
    fn test_slippage_and_liquidity_guards() -> Result<()> {
        let mut p = Protocol::new(Arc::new(LinearLockPenalty::new(1_000)))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        p.lock(1, ftm(100))?;

        assert!(matches!(
            p.ledger.undelegate(ALICE, 1, ftm(50), ftm(50)),
            Err(StakingError::SlippageExceeded { .. })
        ));
        p.ledger.update_vault_owner(TREASURY, 0, UNLOCKER)?;
        assert!(matches!(
            p.ledger.undelegate(ALICE, 1, ftm(50), 0),
            Err(StakingError::InsufficientLiquidity { .. })
        ));
        assert_eq!(p.token.balance_of(&ALICE), ftm(100));
        assert!(p.ledger.withdrawal_request(1).is_none());
        Ok(())
    }

    #[test]
    fn test_duplicate_and_foreign_requests() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(10))?;
        p.ledger.deposit(BOB, ftm(10))?;
        p.ledger.undelegate(ALICE, 5, ftm(1), 0)?;

        assert_eq!(
            p.ledger.undelegate(BOB, 5, ftm(1), 0),
            Err(StakingError::DuplicateId { id: 5 })
        );
        p.clock.advance(p.ledger.config().withdrawal_delay_secs);
        assert_eq!(
            p.ledger.withdraw(BOB, 5, 0),
            Err(StakingError::Unauthorized { caller: BOB })
        );
        assert_eq!(
            p.ledger.withdraw(BOB, 6, 0),
            Err(StakingError::NotFound { id: 6 })
        );
        Ok(())
    }

    // =========================================================================
    // VAULT LIFECYCLE
    // =========================================================================

    #[test]
    fn test_full_vault_cycle_returns_value_to_pool() -> Result<()> {
        let config = stake_ledger::StakingConfig {
            protocol_fee_bips: 1_000,
            ..config()
        };
        let mut p = Protocol::with_config(config, Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        let slot = p.lock(3, ftm(100))?;
        p.ledger.record_rewards(REPORTER, slot, ftm(20))?;
        p.clock.advance(LOCKUP);
        let before = p.snapshot()?;

        p.ledger.harvest_vault(TREASURY, slot)?;
        p.ledger.withdraw_matured(TREASURY, 0)?;

        assert_eq!(p.snapshot()?, before);
        assert_eq!(p.ledger.pool_balance(), ftm(118));
        assert_eq!(p.ledger.protocol_fees(), ftm(2));
        assert_eq!(p.consensus.delegated(3), 0);

        assert_eq!(p.ledger.collect_protocol_fees(TREASURY)?, ftm(2));
        assert_eq!(p.transfer.received(&TREASURY), ftm(2));
        assert_eq!(p.snapshot()?, before);

        let kinds: Vec<&'static str> = p
            .consensus
            .history()
            .iter()
            .map(|op| match op {
                DelegationOp::Delegate { .. } => "delegate",
                DelegationOp::ClaimRewards { .. } => "claim",
                DelegationOp::RestakeRewards { .. } => "restake",
                DelegationOp::Withdraw { .. } => "withdraw",
                DelegationOp::Undelegate { .. } => "undelegate",
                DelegationOp::Unlock { .. } => "unlock",
            })
            .collect();
        assert_eq!(kinds, ["delegate", "claim", "restake", "withdraw"]);
        Ok(())
    }

    #[test]
    fn test_capacity_compaction_and_reuse() -> Result<()> {
        let config = stake_ledger::StakingConfig {
            max_vault_count: 2,
            ..config()
        };
        let mut p = Protocol::with_config(config, Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(100))?;
        let first = p.lock(1, ftm(10))?;
        let second = p.lock(2, ftm(10))?;
        assert_eq!(
            p.lock(3, ftm(10)),
            Err(StakingError::InsufficientCapacity { max: 2 })
        );

        p.clock.advance(LOCKUP);
        p.ledger.harvest_vault(TREASURY, first)?;
        p.ledger.shift_vault_index(TREASURY, second, first)?;
        let third = p.lock(3, ftm(10))?;

        assert_eq!(third, 2);
        assert_eq!(p.ledger.current_vault_ptr(), 3);
        assert_eq!(p.ledger.current_vault_count(), 2);
        assert_eq!(p.ledger.get_vault(first).map(|v| v.validator_id), Some(2));
        Ok(())
    }

    #[test]
    fn test_ledger_restores_from_store() -> Result<()> {
        let mut p = Protocol::new(Arc::new(NoPenalty))?;
        p.ledger.deposit(ALICE, ftm(60))?;
        p.lock(1, ftm(25))?;
        p.ledger.undelegate(ALICE, 9, ftm(5), 0)?;

        let restored = StakeLedger::restore(p.ledger.deps().clone())?;

        assert_eq!(restored.state(), p.ledger.state());
        assert_eq!(restored.total_ftm_worth()?, p.ledger.total_ftm_worth()?);
        assert!(p.store.snapshot_len() > 0);
        Ok(())
    }
}
