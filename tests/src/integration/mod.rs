//! # Integration Fixtures
//!
//! One [`Protocol`] bundles a ledger, an unlocker and handles to every
//! in-memory collaborator so flows can assert on all of them.

pub mod recovery;
pub mod scenarios;

use shared_types::{Address, Amount, DurationSecs, Timestamp, VaultSlot, ONE_DAY_SECS, ONE_FTM};
use stake_ledger::{
    ExchangeRate, InMemoryConsensus, InMemoryLiquidToken, InMemoryNativeTransfer,
    InMemoryStateStore, LedgerDeps, LiquidStakingApi, ManualClock, PenaltyPolicy,
    SingleSlotSelector, StakeLedger, StakingConfig, StakingResult,
};
use std::sync::Arc;
use vault_unlocker::{UnlockerRoles, VaultUnlocker};

/// Treasury role.
pub const TREASURY: Address = [0x7e; 20];
/// Reward reporter role.
pub const REPORTER: Address = [0x5e; 20];
/// Unlocker operator role.
pub const OPERATOR: Address = [0x0b; 20];
/// Address the unlocker lives at.
pub const UNLOCKER: Address = [0x4e; 20];
/// Depositor.
pub const ALICE: Address = [0xa1; 20];
/// Second depositor.
pub const BOB: Address = [0xb0; 20];
/// Genesis time of every fixture.
pub const GENESIS: Timestamp = 1_700_000_000;
/// Lock duration used for every vault.
pub const LOCKUP: DurationSecs = 90 * ONE_DAY_SECS;

/// Whole FTM in wei.
pub fn ftm(n: u128) -> Amount {
    n * ONE_FTM
}

/// Ledger, unlocker and collaborators.
pub struct Protocol {
    /// Staking core.
    pub ledger: StakeLedger,
    /// Recovery agent.
    pub unlocker: VaultUnlocker,
    /// Liquid token.
    pub token: Arc<InMemoryLiquidToken>,
    /// Consensus book.
    pub consensus: Arc<InMemoryConsensus>,
    /// State store.
    pub store: Arc<InMemoryStateStore>,
    /// Clock.
    pub clock: Arc<ManualClock>,
    /// Native transfers.
    pub transfer: Arc<InMemoryNativeTransfer>,
}

impl Protocol {
    /// Fresh protocol with `penalty` as the early-release schedule.
    pub fn new(penalty: Arc<dyn PenaltyPolicy>) -> StakingResult<Self> {
        Self::with_config(config(), penalty)
    }

    /// Fresh protocol with a custom configuration.
    pub fn with_config(
        config: StakingConfig,
        penalty: Arc<dyn PenaltyPolicy>,
    ) -> StakingResult<Self> {
        staking_telemetry::init_test_logging();

        let token = Arc::new(InMemoryLiquidToken::new());
        let consensus = Arc::new(InMemoryConsensus::new());
        let store = Arc::new(InMemoryStateStore::new());
        let clock = Arc::new(ManualClock::new(GENESIS));
        let transfer = Arc::new(InMemoryNativeTransfer::new());
        let deps = LedgerDeps {
            token: token.clone(),
            consensus: consensus.clone(),
            selector: Arc::new(SingleSlotSelector::new()),
            penalty,
            store: store.clone(),
            clock: clock.clone(),
            transfer: transfer.clone(),
        };
        let ledger = StakeLedger::new(config, deps)?;
        let roles = UnlockerRoles {
            operator: OPERATOR,
            owner: TREASURY,
        };
        let unlocker = VaultUnlocker::new(UNLOCKER, roles, transfer.clone());

        Ok(Self {
            ledger,
            unlocker,
            token,
            consensus,
            store,
            clock,
            transfer,
        })
    }

    /// Publish an assignment and lock `amount`.
    pub fn lock(&mut self, validator_id: u64, amount: Amount) -> StakingResult<VaultSlot> {
        self.ledger
            .set_next_validator_info(TREASURY, validator_id, LOCKUP)?;
        self.ledger.lock(TREASURY, amount)
    }

    /// Worth and rate, the pair every reclassification must preserve.
    pub fn snapshot(&self) -> StakingResult<(Amount, ExchangeRate)> {
        Ok((self.ledger.total_ftm_worth()?, self.ledger.exchange_rate()?))
    }
}

/// Configuration shared by the flows.
pub fn config() -> StakingConfig {
    StakingConfig::default()
        .with_treasury(TREASURY)
        .with_reward_reporter(REPORTER)
}
