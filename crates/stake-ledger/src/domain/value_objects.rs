//! # Value Objects
//!
//! Immutable types for the staking domain: pause flags, deposit bounds,
//! vault ownership, validator assignments, the exchange rate and the
//! withdrawal request state machine.

use super::errors::{StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, DurationSecs, ValidatorId, ONE_FTM, RATE_PRECISION};
use std::fmt;

/// Feature that can be paused independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseTarget {
    /// `deposit`
    Deposit,
    /// `undelegate`
    Undelegate,
    /// `withdraw`
    Withdraw,
    /// Vault maintenance: `lock`, `harvest_vault`, `withdraw_matured`.
    Maintenance,
}

impl fmt::Display for PauseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PauseTarget::Deposit => "deposit",
            PauseTarget::Undelegate => "undelegate",
            PauseTarget::Withdraw => "withdraw",
            PauseTarget::Maintenance => "maintenance",
        };
        f.write_str(name)
    }
}

/// Per-feature pause switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseFlags {
    /// Deposits paused.
    pub deposit: bool,
    /// Undelegation requests paused.
    pub undelegate: bool,
    /// Withdrawal claims paused.
    pub withdraw: bool,
    /// Vault maintenance paused.
    pub maintenance: bool,
}

impl PauseFlags {
    /// Whether `target` is paused.
    pub fn is_paused(&self, target: PauseTarget) -> bool {
        match target {
            PauseTarget::Deposit => self.deposit,
            PauseTarget::Undelegate => self.undelegate,
            PauseTarget::Withdraw => self.withdraw,
            PauseTarget::Maintenance => self.maintenance,
        }
    }

    /// Set the flag for `target`.
    pub fn set(&mut self, target: PauseTarget, paused: bool) {
        match target {
            PauseTarget::Deposit => self.deposit = paused,
            PauseTarget::Undelegate => self.undelegate = paused,
            PauseTarget::Withdraw => self.withdraw = paused,
            PauseTarget::Maintenance => self.maintenance = paused,
        }
    }

    /// Fail with [`StakingError::Paused`] when `target` is paused.
    pub fn ensure_active(&self, target: PauseTarget) -> StakingResult<()> {
        if self.is_paused(target) {
            return Err(StakingError::Paused { feature: target });
        }
        Ok(())
    }
}

/// Inclusive deposit limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositBounds {
    /// Smallest accepted deposit.
    pub min: Amount,
    /// Largest accepted deposit.
    pub max: Amount,
}

impl Default for DepositBounds {
    fn default() -> Self {
        Self {
            min: ONE_FTM,
            max: 1_000_000_000 * ONE_FTM,
        }
    }
}

impl DepositBounds {
    /// Whether `amount` lies within the bounds.
    pub fn contains(&self, amount: Amount) -> bool {
        amount >= self.min && amount <= self.max
    }

    /// Fail with [`StakingError::OutOfBounds`] for out-of-range amounts.
    pub fn check(&self, amount: Amount) -> StakingResult<()> {
        if !self.contains(amount) {
            return Err(StakingError::OutOfBounds {
                amount,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Who controls a vault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultOwner {
    /// The staking ledger itself.
    #[default]
    Ledger,
    /// An external account, e.g. a recovery agent.
    Account(Address),
}

impl VaultOwner {
    /// Whether the ledger controls the vault.
    pub fn is_ledger(&self) -> bool {
        matches!(self, VaultOwner::Ledger)
    }

    /// Whether `account` controls the vault.
    pub fn is_account(&self, account: &Address) -> bool {
        matches!(self, VaultOwner::Account(owner) if owner == account)
    }
}

/// Pending delegation target published by the validator selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorAssignment {
    /// Validator to delegate to.
    pub validator_id: ValidatorId,
    /// Lock period in seconds.
    pub lockup_duration: DurationSecs,
}

impl ValidatorAssignment {
    /// Create an assignment.
    pub fn new(validator_id: ValidatorId, lockup_duration: DurationSecs) -> Self {
        Self {
            validator_id,
            lockup_duration,
        }
    }
}

/// FTM per liquid unit, scaled by [`RATE_PRECISION`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExchangeRate(pub Amount);

impl ExchangeRate {
    /// Rate of exactly 1.0.
    pub const ONE: ExchangeRate = ExchangeRate(RATE_PRECISION);

    /// Raw fixed-point value.
    pub fn raw(&self) -> Amount {
        self.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:018}",
            self.0 / RATE_PRECISION,
            self.0 % RATE_PRECISION
        )
    }
}

/// Withdrawal request state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalState {
    /// Recorded by `undelegate`, awaiting claim.
    #[default]
    Requested,
    /// Paid out (terminal).
    Fulfilled,
}

impl WithdrawalState {
    /// Only `Requested -> Fulfilled` exists.
    pub fn can_transition_to(&self, target: WithdrawalState) -> bool {
        matches!(
            (self, target),
            (WithdrawalState::Requested, WithdrawalState::Fulfilled)
        )
    }

    /// Check if terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WithdrawalState::Fulfilled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_flags_round_trip_each_target() {
        let mut flags = PauseFlags::default();
        for target in [
            PauseTarget::Deposit,
            PauseTarget::Undelegate,
            PauseTarget::Withdraw,
            PauseTarget::Maintenance,
        ] {
            assert!(flags.ensure_active(target).is_ok());
            flags.set(target, true);
            assert_eq!(
                flags.ensure_active(target),
                Err(StakingError::Paused { feature: target })
            );
            flags.set(target, false);
        }
    }

    #[test]
    fn test_pause_flags_independent() {
        let mut flags = PauseFlags::default();
        flags.set(PauseTarget::Deposit, true);
        assert!(!flags.is_paused(PauseTarget::Withdraw));
    }

    #[test]
    fn test_deposit_bounds_inclusive() {
        let bounds = DepositBounds { min: 10, max: 20 };
        assert!(bounds.contains(10));
        assert!(bounds.contains(20));
        assert!(!bounds.contains(9));
        assert!(matches!(
            bounds.check(21),
            Err(StakingError::OutOfBounds { amount: 21, .. })
        ));
    }

    #[test]
    fn test_default_bounds() {
        let bounds = DepositBounds::default();
        assert_eq!(bounds.min, ONE_FTM);
        assert_eq!(bounds.max, 1_000_000_000 * ONE_FTM);
    }

    #[test]
    fn test_vault_owner() {
        let agent = [7u8; 20];
        assert!(VaultOwner::Ledger.is_ledger());
        assert!(VaultOwner::Account(agent).is_account(&agent));
        assert!(!VaultOwner::Account(agent).is_account(&[8u8; 20]));
        assert!(!VaultOwner::Ledger.is_account(&agent));
    }

    #[test]
    fn test_exchange_rate_display() {
        assert_eq!(ExchangeRate::ONE.to_string(), "1.000000000000000000");
        let rate = ExchangeRate(RATE_PRECISION + RATE_PRECISION / 100);
        assert_eq!(rate.to_string(), "1.010000000000000000");
    }

    #[test]
    fn test_withdrawal_state_transitions() {
        assert!(WithdrawalState::Requested.can_transition_to(WithdrawalState::Fulfilled));
        assert!(!WithdrawalState::Fulfilled.can_transition_to(WithdrawalState::Requested));
        assert!(!WithdrawalState::Fulfilled.can_transition_to(WithdrawalState::Fulfilled));
        assert!(WithdrawalState::Fulfilled.is_terminal());
    }
}
