//! # Emergency Recovery Flows
//!
//! A vault is lent to the unlocker, force-unlocked at the unlocker's
//! expense, returned, harvested and folded back into the pool. Worth and
//! exchange rate must come out bit-for-bit identical.

#[cfg(test)]
mod tests {
    use super::super::*;
    use anyhow::Result;
    use stake_ledger::{LinearLockPenalty, StakingError, VaultOwner};

    fn lent_protocol() -> Result<(Protocol, VaultSlot)> {
        let mut p = Protocol::new(Arc::new(LinearLockPenalty::new(2_000)))?;
        p.ledger.deposit(ALICE, ftm(300))?;
        p.ledger.deposit(BOB, ftm(200))?;
        let slot = p.lock(46, ftm(300))?;
        p.ledger.record_rewards(REPORTER, slot, ftm(3))?;
        Ok((p, slot))
    }

    #[test]
    fn test_scenario_e_unlock_and_sweep() -> Result<()> {
        let (mut p, slot) = lent_protocol()?;
        p.unlocker.receive(ftm(1_000))?;
        let before = p.snapshot()?;

        p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
        p.unlocker.unlock_vault(&mut p.ledger, OPERATOR, slot)?;
        let swept = p.unlocker.retrieve_ftm(TREASURY)?;

        assert_eq!(p.unlocker.balance(), 0);
        assert_eq!(swept, ftm(1_000) - ftm(60));
        assert_eq!(p.transfer.received(&TREASURY), swept);
        assert!(p
            .ledger
            .get_vault(slot)
            .is_some_and(|vault| vault.owner.is_ledger()));
        assert_eq!(p.snapshot()?, before);
        Ok(())
    }

    #[test]
    fn test_full_recovery_sequence_is_neutral() -> Result<()> {
        let (mut p, slot) = lent_protocol()?;
        p.clock.advance(LOCKUP / 4);
        p.unlocker.receive(ftm(400))?;
        let before = p.snapshot()?;

        p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
        let receipt = p.unlocker.unlock_vault(&mut p.ledger, OPERATOR, slot)?;
        let matured = p.ledger.harvest_vault(TREASURY, slot)?;
        p.ledger.withdraw_matured(TREASURY, 0)?;
        p.unlocker.retrieve_ftm(TREASURY)?;

        // 20% max penalty with three quarters of the lock left
        assert_eq!(receipt.penalty_paid, ftm(45));
        assert_eq!(receipt.principal, ftm(300));
        assert_eq!(matured.value, ftm(303));
        assert_eq!(p.transfer.received(&TREASURY), ftm(355));
        assert_eq!(p.ledger.pool_balance(), ftm(503));
        assert_eq!(p.ledger.current_vault_count(), 0);
        assert_eq!(p.ledger.matured_vault_count(), 0);
        assert_eq!(p.consensus.delegated(46), 0);
        assert_eq!(p.ledger.state().penalties_forfeited, ftm(45));
        assert_eq!(p.snapshot()?, before);
        Ok(())
    }

    #[test]
    fn test_recovery_of_several_vaults() -> Result<()> {
        let mut p = Protocol::new(Arc::new(LinearLockPenalty::new(1_000)))?;
        p.ledger.deposit(ALICE, ftm(1_000))?;
        let slots = [
            p.lock(39, ftm(200))?,
            p.lock(42, ftm(500))?,
            p.lock(46, ftm(300))?,
        ];
        p.unlocker.receive(ftm(1_200))?;
        let before = p.snapshot()?;

        for slot in slots {
            p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
            p.unlocker.unlock_vault(&mut p.ledger, OPERATOR, slot)?;
            p.ledger.harvest_vault(TREASURY, slot)?;
        }
        while p.ledger.matured_vault_count() > 0 {
            p.ledger.withdraw_matured(TREASURY, 0)?;
        }

        // full 10% on 1000 FTM, paid by the unlocker
        assert_eq!(p.unlocker.balance(), ftm(1_100));
        assert_eq!(p.ledger.pool_balance(), ftm(1_000));
        assert_eq!(p.snapshot()?, before);
        Ok(())
    }

    #[test]
    fn test_underfunded_unlock_changes_nothing() -> Result<()> {
        let (mut p, slot) = lent_protocol()?;
        p.unlocker.receive(ftm(300))?;
        p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
        let before = p.snapshot()?;
        let state = p.ledger.state().clone();

        let result = p.unlocker.unlock_vault(&mut p.ledger, OPERATOR, slot);

        assert_eq!(
            result,
            Err(StakingError::InsufficientFunds {
                required: ftm(360),
                available: ftm(300)
            })
        );
        assert_eq!(p.unlocker.balance(), ftm(300));
        assert_eq!(p.ledger.state(), &state);
        assert_eq!(p.snapshot()?, before);
        Ok(())
    }

    #[test]
    fn test_unauthorized_recovery_calls() -> Result<()> {
        let (mut p, slot) = lent_protocol()?;
        p.unlocker.receive(ftm(1_000))?;

        assert_eq!(
            p.ledger.update_vault_owner(OPERATOR, slot, UNLOCKER),
            Err(StakingError::Unauthorized { caller: OPERATOR })
        );
        assert_eq!(
            p.unlocker.unlock_vault(&mut p.ledger, OPERATOR, slot),
            Err(StakingError::NotOwner { slot })
        );

        p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
        assert_eq!(
            p.unlocker.unlock_vault(&mut p.ledger, ALICE, slot),
            Err(StakingError::Unauthorized { caller: ALICE })
        );
        assert_eq!(
            p.ledger
                .force_unlock_vault(ALICE, slot, ftm(1_000), VaultOwner::Ledger),
            Err(StakingError::NotOwner { slot })
        );
        assert_eq!(
            p.unlocker.retrieve_ftm(OPERATOR),
            Err(StakingError::Unauthorized { caller: OPERATOR })
        );
        Ok(())
    }

    #[test]
    fn test_aborted_recovery_reverts_ownership() -> Result<()> {
        let (mut p, slot) = lent_protocol()?;
        let before = p.snapshot()?;

        p.ledger.update_vault_owner(TREASURY, slot, UNLOCKER)?;
        p.unlocker.revert_ownership(&mut p.ledger, OPERATOR, slot)?;

        let vault = p.ledger.get_vault(slot).cloned();
        assert!(vault.as_ref().is_some_and(|v| v.owner.is_ledger()));
        assert!(vault.is_some_and(|v| v.lockup_end == GENESIS + LOCKUP));
        assert_eq!(p.snapshot()?, before);
        Ok(())
    }
}
