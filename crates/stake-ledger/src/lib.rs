//! # Stake Ledger
//!
//! Settlement core of the FTM liquid staking protocol.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Pool depositor FTM, delegate it into a bounded registry of validator
//! vaults, and return it through a delayed, penalty-aware withdrawal queue:
//! - Liquid units are issued and redeemed at a derived exchange rate
//! - Vaults are locked oldest-first and harvested once matured
//! - Shortfalls are sourced by forced early unstaking of the oldest vaults
//! - Vaults can be lent to a recovery agent and force-unlocked
//!
//! ## Value Buckets
//!
//! | Bucket | In `total_ftm_worth` | Moved by |
//! |--------|----------------------|----------|
//! | Pool balance | yes | deposit, lock, undelegate, withdraw_matured, claim |
//! | Active vaults (principal + net rewards) | yes | lock, rewards, undelegate, harvest |
//! | Matured vaults | yes | harvest, withdraw_matured |
//! | Reserved withdrawals | no | undelegate, withdraw |
//! | Protocol fees | no | claim, compound, collect |
//!
//! ## Atomicity
//!
//! Each operation runs on a copy of [`LedgerState`], records its effects on
//! the collaborators, and commits them in one journaled pass. Any failure
//! unwinds the journal, so no partial state is ever observable.
//!
//! ## Module Structure
//!
//! ```text
//! stake-ledger/
//! ├── domain/          # Vault, registry, withdrawal queue, config, errors
//! ├── algorithms/      # Exchange rate, penalty schedules, shortfall sourcing
//! ├── ports/           # LiquidStakingApi, outbound collaborators
//! ├── adapters/        # In-memory token, consensus, selector, store, clock
//! └── service/         # StakeLedger and the transaction engine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    InMemoryConsensus, InMemoryLiquidToken, InMemoryNativeTransfer, InMemoryStateStore,
    ManualClock, SingleSlotSelector,
};
pub use algorithms::{
    exchange_rate, ftm_for_liquid, liquid_for_deposit, plan_shortfall, LinearLockPenalty,
    NoPenalty, ShortfallPlan, VaultDrain,
};
pub use domain::{
    invariant_capacity, invariant_min_out, invariant_treasury, invariant_withdrawal_eligible,
    invariant_worth_preserved, DepositBounds, ExchangeRate, LedgerState, MaturedVault,
    PauseFlags, PauseTarget, RewardSettlement, StakingConfig, StakingError, StakingResult,
    ValidatorAssignment, Vault, VaultOwner, VaultRegistry, WithdrawalParams, WithdrawalQueue,
    WithdrawalRequest, WithdrawalState, DEFAULT_MAX_VAULT_COUNT, DEFAULT_WITHDRAWAL_DELAY_SECS,
};
pub use ports::{
    ConsensusStaking, DelegationOp, LiquidStakingApi, LiquidToken, NativeTransfer,
    PenaltyPolicy, StateStore, SystemTimeSource, TimeSource, ValidatorSelector,
};
pub use service::{unlock_penalty, LedgerDeps, StakeLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
