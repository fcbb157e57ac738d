//! # Transaction Engine
//!
//! Operations run against a private copy of the ledger state and only
//! *record* their external effects. Commit applies those effects in a
//! fixed order and journals each step:
//!
//! ```text
//! consume assignment -> burn -> mint -> consensus batch -> store commit
//!        -> swap in-memory state -> single outbound payout
//! ```
//!
//! A failure at any step unwinds the journal in reverse, so a rejected
//! operation leaves no trace in any collaborator.

use super::LedgerDeps;
use crate::domain::{
    invariant_treasury, LedgerState, PauseTarget, StakingError, StakingResult,
    ValidatorAssignment,
};
use crate::ports::DelegationOp;
use shared_types::{short_address, Address, Amount, Timestamp};
use tracing::error;
use uuid::Uuid;

/// External effects collected while an operation runs.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub(crate) consume: Option<ValidatorAssignment>,
    pub(crate) burns: Vec<(Address, Amount)>,
    pub(crate) mints: Vec<(Address, Amount)>,
    pub(crate) ops: Vec<DelegationOp>,
    pub(crate) payout: Option<(Address, Amount)>,
}

/// Working context of one ledger operation.
pub(crate) struct Transaction<'a> {
    pub(crate) id: Uuid,
    pub(crate) state: LedgerState,
    pub(crate) now: Timestamp,
    pub(crate) deps: &'a LedgerDeps,
    effects: Effects,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(deps: &'a LedgerDeps, state: LedgerState) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            now: deps.clock.now(),
            deps,
            effects: Effects::default(),
        }
    }

    pub(crate) fn require_treasury(&self, caller: &Address) -> StakingResult<()> {
        invariant_treasury(&self.state.config, caller)
    }

    pub(crate) fn ensure_active(&self, target: PauseTarget) -> StakingResult<()> {
        self.state.config.pause_flags.ensure_active(target)
    }

    pub(crate) fn fee_bips(&self) -> u32 {
        self.state.config.protocol_fee_bips
    }

    pub(crate) fn mint(&mut self, to: Address, amount: Amount) {
        self.effects.mints.push((to, amount));
    }

    pub(crate) fn burn(&mut self, from: Address, amount: Amount) {
        self.effects.burns.push((from, amount));
    }

    pub(crate) fn submit(&mut self, op: DelegationOp) {
        self.effects.ops.push(op);
    }

    pub(crate) fn consume_assignment(&mut self, assignment: ValidatorAssignment) {
        self.effects.consume = Some(assignment);
    }

    /// Schedule the single outbound transfer of this operation.
    pub(crate) fn pay(&mut self, to: Address, amount: Amount) -> StakingResult<()> {
        if self.effects.payout.is_some() {
            return Err(StakingError::InvalidState(
                "operation already schedules a payout".to_string(),
            ));
        }
        self.effects.payout = Some((to, amount));
        Ok(())
    }

    pub(crate) fn finish(self) -> (Uuid, LedgerState, Effects) {
        (self.id, self.state, self.effects)
    }
}

enum Applied {
    Consumed(ValidatorAssignment),
    Burned(Address, Amount),
    Minted(Address, Amount),
    Submitted(Vec<DelegationOp>),
    Committed,
}

/// Steps already applied to collaborators, in order.
#[derive(Default)]
pub(crate) struct Journal {
    applied: Vec<Applied>,
}

impl Journal {
    /// Apply everything except the payout; stops at the first failure.
    pub(crate) fn apply(
        &mut self,
        deps: &LedgerDeps,
        next: &LedgerState,
        effects: &Effects,
    ) -> StakingResult<()> {
        if let Some(assignment) = effects.consume {
            deps.selector.consume(&assignment)?;
            self.applied.push(Applied::Consumed(assignment));
        }
        for (from, amount) in &effects.burns {
            deps.token.burn(from, *amount)?;
            self.applied.push(Applied::Burned(*from, *amount));
        }
        for (to, amount) in &effects.mints {
            deps.token.mint(to, *amount)?;
            self.applied.push(Applied::Minted(*to, *amount));
        }
        if !effects.ops.is_empty() {
            deps.consensus.submit(&effects.ops)?;
            self.applied.push(Applied::Submitted(effects.ops.clone()));
        }
        deps.store.commit(next)?;
        self.applied.push(Applied::Committed);
        Ok(())
    }

    /// Undo every applied step, newest first.
    pub(crate) fn unwind(self, deps: &LedgerDeps, previous: &LedgerState) {
        for step in self.applied.into_iter().rev() {
            match step {
                Applied::Committed => {
                    if let Err(e) = deps.store.commit(previous) {
                        error!("[staking] failed to restore committed state: {}", e);
                    }
                }
                Applied::Submitted(ops) => deps.consensus.revert(&ops),
                Applied::Minted(to, amount) => {
                    if let Err(e) = deps.token.burn(&to, amount) {
                        error!(
                            "[staking] failed to reverse mint to {}: {}",
                            short_address(&to),
                            e
                        );
                    }
                }
                Applied::Burned(from, amount) => {
                    if let Err(e) = deps.token.mint(&from, amount) {
                        error!(
                            "[staking] failed to reverse burn from {}: {}",
                            short_address(&from),
                            e
                        );
                    }
                }
                Applied::Consumed(assignment) => deps.selector.restore(assignment),
            }
        }
    }
}
