//! Test harness wiring the ledger to in-memory adapters.

use super::{LedgerDeps, StakeLedger};
use crate::adapters::{
    InMemoryConsensus, InMemoryLiquidToken, InMemoryNativeTransfer, InMemoryStateStore,
    ManualClock, SingleSlotSelector,
};
use crate::algorithms::NoPenalty;
use crate::domain::{ExchangeRate, StakingConfig};
use crate::ports::{LiquidStakingApi, PenaltyPolicy};
use shared_types::{Address, Amount, DurationSecs, Timestamp, VaultSlot, ONE_DAY_SECS, ONE_FTM};
use std::sync::Arc;

pub(crate) const TREASURY: Address = [0x7e; 20];
pub(crate) const REPORTER: Address = [0x5e; 20];
pub(crate) const ALICE: Address = [0xa1; 20];
pub(crate) const BOB: Address = [0xb0; 20];
pub(crate) const START: Timestamp = 1_700_000_000;
pub(crate) const LOCKUP: DurationSecs = 30 * ONE_DAY_SECS;

pub(crate) fn ftm(n: u128) -> Amount {
    n * ONE_FTM
}

pub(crate) fn test_config() -> StakingConfig {
    StakingConfig::default()
        .with_treasury(TREASURY)
        .with_reward_reporter(REPORTER)
}

pub(crate) struct Harness {
    pub ledger: StakeLedger,
    pub token: Arc<InMemoryLiquidToken>,
    pub consensus: Arc<InMemoryConsensus>,
    pub selector: Arc<SingleSlotSelector>,
    pub store: Arc<InMemoryStateStore>,
    pub clock: Arc<ManualClock>,
    pub transfer: Arc<InMemoryNativeTransfer>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(test_config(), Arc::new(NoPenalty))
    }

    pub fn with_penalty(policy: Arc<dyn PenaltyPolicy>) -> Self {
        Self::with(test_config(), policy)
    }

    pub fn with(config: StakingConfig, penalty: Arc<dyn PenaltyPolicy>) -> Self {
        let token = Arc::new(InMemoryLiquidToken::new());
        let consensus = Arc::new(InMemoryConsensus::new());
        let selector = Arc::new(SingleSlotSelector::new());
        let store = Arc::new(InMemoryStateStore::new());
        let clock = Arc::new(ManualClock::new(START));
        let transfer = Arc::new(InMemoryNativeTransfer::new());
        let deps = LedgerDeps {
            token: token.clone(),
            consensus: consensus.clone(),
            selector: selector.clone(),
            penalty,
            store: store.clone(),
            clock: clock.clone(),
            transfer: transfer.clone(),
        };
        let ledger = StakeLedger::new(config, deps).unwrap();
        Self {
            ledger,
            token,
            consensus,
            selector,
            store,
            clock,
            transfer,
        }
    }

    /// Publish an assignment and lock `amount` from the pool.
    pub fn lock(&mut self, validator_id: u64, amount: Amount) -> VaultSlot {
        self.ledger
            .set_next_validator_info(TREASURY, validator_id, LOCKUP)
            .unwrap();
        self.ledger.lock(TREASURY, amount).unwrap()
    }

    pub fn worth(&self) -> Amount {
        self.ledger.total_ftm_worth().unwrap()
    }

    pub fn rate(&self) -> ExchangeRate {
        self.ledger.exchange_rate().unwrap()
    }
}
