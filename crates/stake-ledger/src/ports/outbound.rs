//! # Outbound Ports
//!
//! Collaborators the ledger depends on. Each is injected as
//! `Arc<dyn Trait>`; in-memory implementations live in `adapters`.

use crate::domain::{LedgerState, StakingResult, ValidatorAssignment};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp, ValidatorId, VaultSlot};

/// Liquid staking token issuer.
pub trait LiquidToken: Send + Sync {
    /// Issue `amount` units to `to`.
    fn mint(&self, to: &Address, amount: Amount) -> StakingResult<()>;

    /// Destroy `amount` units held by `from`.
    fn burn(&self, from: &Address, amount: Amount) -> StakingResult<()>;

    /// Units held by `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Units outstanding.
    fn total_supply(&self) -> Amount;
}

/// Instruction sent to the consensus-layer staking contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegationOp {
    /// Delegate and lock a new vault.
    Delegate {
        /// Target validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Delegated amount
        amount: Amount,
    },
    /// Forced early unstake from a vault.
    Undelegate {
        /// Validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Unstaked amount, penalty included
        amount: Amount,
        /// Forfeited part
        penalty: Amount,
    },
    /// Forced release of a whole lock, penalty paid by the vault owner.
    Unlock {
        /// Validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Principal released
        principal: Amount,
        /// Penalty paid
        penalty: Amount,
    },
    /// Net rewards restaked into a delegation's principal.
    RestakeRewards {
        /// Validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Restaked amount
        amount: Amount,
    },
    /// Rewards withdrawn from a delegation.
    ClaimRewards {
        /// Validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Gross rewards
        amount: Amount,
    },
    /// Matured delegation withdrawn in full.
    Withdraw {
        /// Validator
        validator_id: ValidatorId,
        /// Vault slot
        slot: VaultSlot,
        /// Withdrawn amount
        amount: Amount,
    },
}

/// Consensus-layer staking interface.
pub trait ConsensusStaking: Send + Sync {
    /// Apply a batch of operations, all or nothing.
    fn submit(&self, ops: &[DelegationOp]) -> StakingResult<()>;

    /// Undo a batch previously accepted by `submit`.
    fn revert(&self, ops: &[DelegationOp]);
}

/// Single-slot source of the next delegation target.
pub trait ValidatorSelector: Send + Sync {
    /// Pending assignment eligible for a lock of `amount`.
    fn next_validator(&self, amount: Amount) -> Option<ValidatorAssignment>;

    /// Overwrite the pending assignment.
    fn set_next(&self, assignment: ValidatorAssignment);

    /// Clear the pending assignment, which must still equal `expected`.
    fn consume(&self, expected: &ValidatorAssignment) -> StakingResult<()>;

    /// Put back an assignment whose lock was rolled back.
    fn restore(&self, assignment: ValidatorAssignment);
}

/// Early-unstake penalty schedule.
///
/// Pure: `(lock_start, lock_end, now, amount) -> penalty`.
pub trait PenaltyPolicy: Send + Sync {
    /// Penalty for releasing `amount` at `now`.
    fn penalty(
        &self,
        lock_start: Timestamp,
        lock_end: Timestamp,
        now: Timestamp,
        amount: Amount,
    ) -> Amount;
}

impl<F> PenaltyPolicy for F
where
    F: Fn(Timestamp, Timestamp, Timestamp, Amount) -> Amount + Send + Sync,
{
    fn penalty(
        &self,
        lock_start: Timestamp,
        lock_end: Timestamp,
        now: Timestamp,
        amount: Amount,
    ) -> Amount {
        self(lock_start, lock_end, now, amount)
    }
}

/// Durable transactional store for the ledger state.
pub trait StateStore: Send + Sync {
    /// Last committed state, if any.
    fn load(&self) -> StakingResult<Option<LedgerState>>;

    /// Replace the persisted state atomically.
    fn commit(&self, state: &LedgerState) -> StakingResult<()>;
}

/// Source of the current time.
pub trait TimeSource: Send + Sync {
    /// Current Unix timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Outbound native FTM transfers.
pub trait NativeTransfer: Send + Sync {
    /// Send `amount` to `to`.
    fn send(&self, to: &Address, amount: Amount) -> StakingResult<()>;
}
