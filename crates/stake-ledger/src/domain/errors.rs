//! # Domain Errors
//!
//! Error types for the staking core.
//!
//! Every rejected operation maps onto exactly one variant. Domain variants
//! come first, collaborator failures after them.

use super::value_objects::PauseTarget;
use shared_types::{Amount, Timestamp, VaultSlot, WithdrawalId};
use thiserror::Error;

pub use shared_types::Address;

/// Staking error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakingError {
    /// Caller lacks the role the operation requires.
    #[error("Unauthorized caller: 0x{}", hex::encode(.caller))]
    Unauthorized {
        /// Rejected caller
        caller: Address,
    },

    /// The feature is paused.
    #[error("Paused: {feature}")]
    Paused {
        /// Paused feature
        feature: PauseTarget,
    },

    /// Amount outside the configured limits.
    #[error("Amount {amount} out of bounds [{min}, {max}]")]
    OutOfBounds {
        /// Offered amount
        amount: Amount,
        /// Lower bound (inclusive)
        min: Amount,
        /// Upper bound (inclusive)
        max: Amount,
    },

    /// Registry is full.
    #[error("Vault registry at capacity ({max} vaults)")]
    InsufficientCapacity {
        /// Configured maximum vault count
        max: u64,
    },

    /// Active vaults cannot cover an undelegation shortfall.
    #[error("Insufficient liquidity: {shortfall} wei uncovered")]
    InsufficientLiquidity {
        /// Part of the shortfall left uncovered
        shortfall: Amount,
    },

    /// Recovery agent balance too small for a forced unlock.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Required repayment
        required: Amount,
        /// Balance on hand
        available: Amount,
    },

    /// Selector has no pending assignment.
    #[error("No validator assigned")]
    NoValidatorAssigned,

    /// Caller does not own the vault in this slot.
    #[error("Not owner of vault in slot {slot}")]
    NotOwner {
        /// Vault slot
        slot: VaultSlot,
    },

    /// Record not in the lifecycle state the operation needs.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Payout below the caller's minimum.
    #[error("Slippage exceeded: expected at least {expected_min}, got {actual}")]
    SlippageExceeded {
        /// Caller minimum
        expected_min: Amount,
        /// Amount the operation would pay
        actual: Amount,
    },

    /// Withdrawal delay has not elapsed.
    #[error("Not yet eligible: eligible at {eligible_at}, now {now}")]
    NotYetEligible {
        /// First eligible timestamp
        eligible_at: Timestamp,
        /// Current timestamp
        now: Timestamp,
    },

    /// Withdrawal already paid.
    #[error("Withdrawal {id} already fulfilled")]
    AlreadyFulfilled {
        /// Request key
        id: WithdrawalId,
    },

    /// Withdrawal key already in use.
    #[error("Withdrawal id {id} already used")]
    DuplicateId {
        /// Request key
        id: WithdrawalId,
    },

    /// Unknown withdrawal key.
    #[error("Withdrawal {id} not found")]
    NotFound {
        /// Request key
        id: WithdrawalId,
    },

    /// Caller holds fewer liquid units than it tries to redeem.
    #[error("Insufficient liquid balance: required {required}, available {available}")]
    InsufficientLiquidBalance {
        /// Units to burn
        required: Amount,
        /// Units held
        available: Amount,
    },

    /// Lock larger than the idle pool.
    #[error("Insufficient pool balance: required {required}, available {available}")]
    InsufficientPoolBalance {
        /// Requested amount
        required: Amount,
        /// Idle pool balance
        available: Amount,
    },

    /// Amount arithmetic overflowed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Liquid token collaborator failed.
    #[error("Token error: {0}")]
    Token(String),

    /// Consensus staking collaborator failed.
    #[error("Consensus error: {0}")]
    Consensus(String),

    /// State store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Native value transfer failed.
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type StakingResult<T> = Result<T, StakingError>;

/// Checked addition mapped onto [`StakingError::ArithmeticOverflow`].
pub(crate) fn checked_add(a: Amount, b: Amount) -> StakingResult<Amount> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow)
}

/// Checked subtraction mapped onto [`StakingError::ArithmeticOverflow`].
pub(crate) fn checked_sub(a: Amount, b: Amount) -> StakingResult<Amount> {
    a.checked_sub(b).ok_or(StakingError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_renders_hex() {
        let err = StakingError::Unauthorized { caller: [0xab; 20] };
        assert!(err.to_string().contains("0xabab"));
    }

    #[test]
    fn test_paused_names_feature() {
        let err = StakingError::Paused {
            feature: PauseTarget::Undelegate,
        };
        assert_eq!(err.to_string(), "Paused: undelegate");
    }

    #[test]
    fn test_not_yet_eligible_error() {
        let err = StakingError::NotYetEligible {
            eligible_at: 700,
            now: 699,
        };
        assert!(err.to_string().contains("700"));
    }

    #[test]
    fn test_checked_helpers() {
        assert_eq!(checked_add(1, 2), Ok(3));
        assert_eq!(checked_add(Amount::MAX, 1), Err(StakingError::ArithmeticOverflow));
        assert_eq!(checked_sub(1, 2), Err(StakingError::ArithmeticOverflow));
    }
}
