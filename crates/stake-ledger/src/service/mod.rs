//! Stake Ledger Service - operation dispatch and atomic commit
//!
//! Every public operation runs through [`StakeLedger::execute`]: the body
//! validates against a cloned [`LedgerState`], records its external effects,
//! and the engine commits or unwinds them as one unit.

mod admin;
mod api;
mod pool;
mod recovery;
mod rewards;
mod transaction;
mod vaults;
mod withdrawals;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::domain::{LedgerState, StakingConfig, StakingError, StakingResult};
use crate::ports::{
    ConsensusStaking, LiquidToken, NativeTransfer, PenaltyPolicy, StateStore, TimeSource,
    ValidatorSelector,
};
use shared_types::{short_address, Amount};
use std::sync::Arc;
use tracing::{debug, info, warn};
use transaction::{Journal, Transaction};

pub use recovery::unlock_penalty;

/// Injected collaborators.
#[derive(Clone)]
pub struct LedgerDeps {
    /// Liquid token issuer.
    pub token: Arc<dyn LiquidToken>,
    /// Consensus-layer staking.
    pub consensus: Arc<dyn ConsensusStaking>,
    /// Next-validator source.
    pub selector: Arc<dyn ValidatorSelector>,
    /// Early-unstake penalty schedule.
    pub penalty: Arc<dyn PenaltyPolicy>,
    /// Durable state.
    pub store: Arc<dyn StateStore>,
    /// Clock.
    pub clock: Arc<dyn TimeSource>,
    /// Outbound FTM transfers.
    pub transfer: Arc<dyn NativeTransfer>,
}

/// The staking core: ledger, vault registry and withdrawal queue.
///
/// Mutating operations take `&mut self`, so no operation can start while
/// another, including its outbound payout, is still in flight.
pub struct StakeLedger {
    deps: LedgerDeps,
    state: LedgerState,
}

impl StakeLedger {
    /// Create a ledger with fresh state and persist it.
    pub fn new(config: StakingConfig, deps: LedgerDeps) -> StakingResult<Self> {
        config.validate()?;
        let state = LedgerState::new(config);
        deps.store.commit(&state)?;
        info!(
            "[staking] ledger initialised, treasury {}",
            short_address(&state.config.treasury)
        );
        Ok(Self { deps, state })
    }

    /// Resume from the last state committed to `deps.store`.
    pub fn restore(deps: LedgerDeps) -> StakingResult<Self> {
        let state = deps
            .store
            .load()?
            .ok_or_else(|| StakingError::Storage("no committed ledger state".to_string()))?;
        state.config.validate()?;
        info!(
            "[staking] ledger restored: pool {}, {} vault(s)",
            state.pool_balance,
            state.registry.current_vault_count()
        );
        Ok(Self { deps, state })
    }

    /// Committed state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Injected collaborators.
    pub fn deps(&self) -> &LedgerDeps {
        &self.deps
    }

    /// FTM held outside the consensus layer.
    pub fn held_funds(&self) -> StakingResult<Amount> {
        self.state.held_funds()
    }

    /// Run `body` as one atomic operation.
    pub(crate) fn execute<T>(
        &mut self,
        operation: &'static str,
        body: impl FnOnce(&mut Transaction<'_>) -> StakingResult<T>,
    ) -> StakingResult<T> {
        let mut tx = Transaction::begin(&self.deps, self.state.clone());
        let output = match body(&mut tx) {
            Ok(output) => output,
            Err(err) => {
                debug!("[staking] {} rejected: {}", operation, err);
                return Err(err);
            }
        };
        let (id, next, effects) = tx.finish();

        let mut journal = Journal::default();
        if let Err(err) = journal.apply(&self.deps, &next, &effects) {
            warn!("[staking] {} ({}) rolled back: {}", operation, id, err);
            journal.unwind(&self.deps, &self.state);
            return Err(err);
        }
        let previous = std::mem::replace(&mut self.state, next);

        if let Some((to, amount)) = effects.payout {
            if let Err(err) = self.deps.transfer.send(&to, amount) {
                warn!(
                    "[staking] {} ({}) payout to {} failed, rolled back: {}",
                    operation,
                    id,
                    short_address(&to),
                    err
                );
                journal.unwind(&self.deps, &previous);
                self.state = previous;
                return Err(err);
            }
        }

        debug!("[staking] {} ({}) committed", operation, id);
        Ok(output)
    }
}
