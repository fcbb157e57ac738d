//! Single-slot validator selector.
//!
//! Holds at most one pending assignment. Writing overwrites it; a
//! successful lock consumes it.

use crate::domain::{StakingError, StakingResult, ValidatorAssignment};
use crate::ports::ValidatorSelector;
use parking_lot::Mutex;
use shared_types::Amount;
use tracing::info;

/// Commit-then-consume selector with an optional minimum lock size.
#[derive(Default)]
pub struct SingleSlotSelector {
    pending: Mutex<Option<ValidatorAssignment>>,
    min_amount: Amount,
}

impl SingleSlotSelector {
    /// Selector that accepts locks of any size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector that only offers its assignment for locks of at least `min_amount`.
    pub fn with_min_amount(min_amount: Amount) -> Self {
        Self {
            pending: Mutex::new(None),
            min_amount,
        }
    }

    /// Pending assignment regardless of eligibility.
    pub fn pending(&self) -> Option<ValidatorAssignment> {
        *self.pending.lock()
    }
}

impl ValidatorSelector for SingleSlotSelector {
    fn next_validator(&self, amount: Amount) -> Option<ValidatorAssignment> {
        if amount < self.min_amount {
            return None;
        }
        *self.pending.lock()
    }

    fn set_next(&self, assignment: ValidatorAssignment) {
        info!(
            "[selector] next validator {} for {}s",
            assignment.validator_id, assignment.lockup_duration
        );
        *self.pending.lock() = Some(assignment);
    }

    fn consume(&self, expected: &ValidatorAssignment) -> StakingResult<()> {
        let mut pending = self.pending.lock();
        match *pending {
            Some(current) if current == *expected => {
                *pending = None;
                Ok(())
            }
            Some(_) => Err(StakingError::InvalidState(
                "validator assignment changed during lock".to_string(),
            )),
            None => Err(StakingError::NoValidatorAssigned),
        }
    }

    fn restore(&self, assignment: ValidatorAssignment) {
        let mut pending = self.pending.lock();
        if pending.is_none() {
            *pending = Some(assignment);
        }
    }
}
